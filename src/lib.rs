//! Structured exception handling over a bounded handler stack.
//!
//! A [`Context`] holds the nested TRY scopes of one execution context and
//! the exception currently in flight. Scopes are opened with
//! [`Context::attempt`] and continue with `catch`, `catch_all` and
//! `finally` clauses, in that order, before `end` closes them. Throwing
//! returns a [`Thrown`] signal that travels back to the innermost scope
//! with `?`; a FINALLY clause runs exactly once on every path, and an
//! exception no scope accepts terminates the process.
//!
//! ```
//! use unwinder::{exception_category, Context};
//!
//! exception_category! {
//!     NOT_FOUND = "Not found";
//! }
//!
//! let mut ctx = Context::new();
//! let mut status = "pending";
//!
//! ctx.attempt(|ctx| Err(ctx.throw(&NOT_FOUND, "missing")))
//!     .catch(&NOT_FOUND, |ctx| {
//!         assert_eq!(ctx.exception().message(), "missing");
//!         status = "handled";
//!         Ok(())
//!     })
//!     .finally(|ctx| {
//!         assert!(!ctx.is_uncaught());
//!         Ok(())
//!     })
//!     .end()
//!     .unwrap();
//!
//! assert_eq!(status, "handled");
//! ```

pub mod context;
pub mod engine;
pub mod exception;
mod macros;
pub mod report;

pub use context::{
    Config, ConfigError, Context, ContractError, Frame, OverflowAction, Stage, UncaughtAction,
};
pub use engine::{CatchAllScope, CatchScope, FinallyScope, Outcome, Thrown, TryScope};
pub use exception::{Category, Exception, Origin};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
