// engine - TRY/CATCH/FINALLY stage machine and the throw/propagate signal

pub mod scope;

pub use scope::{CatchAllScope, CatchScope, FinallyScope, TryScope};

use std::fmt;

use thiserror::Error;

use crate::context::Context;
use crate::exception::Category;
use crate::report;

/// Signal that an exception is travelling to the innermost TRY scope.
///
/// Only [`Context::throw`] and its siblings produce it. Return it with `?` or
/// `Err(..)` until it reaches the scope that owns the current frame; the
/// exception itself stays in the [`Context`].
///
/// A `Thrown` belongs to the context that minted it. Returning it into a
/// scope of another context that has never recorded an exception is a
/// [`ContractError::ForeignSignal`](crate::ContractError::ForeignSignal).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("exception propagating to the enclosing TRY block")]
#[must_use = "a thrown exception only reaches its handler when returned"]
pub struct Thrown {
    _private: (),
}

impl Thrown {
    fn new() -> Self {
        Thrown { _private: () }
    }
}

/// Result of code that may throw.
pub type Outcome<T = ()> = Result<T, Thrown>;

impl Context {
    /// Open a TRY scope and run `body` as its protected code.
    ///
    /// Continue with `catch`, `catch_all` and/or `finally` on the returned
    /// scope, then `end` it. Exceeding the configured nesting depth is a
    /// contract violation and runs the overflow action.
    #[track_caller]
    pub fn attempt<F>(&mut self, body: F) -> TryScope<'_>
    where
        F: FnOnce(&mut Context) -> Outcome,
    {
        TryScope::open(self, body)
    }

    /// Throw an exception of `category` with `message`.
    ///
    /// Without an enclosing TRY scope this reports the exception and runs the
    /// uncaught action instead of returning.
    #[track_caller]
    pub fn throw(&mut self, category: &Category, message: &str) -> Thrown {
        self.thrown.fill(category, Some(message));
        self.raise()
    }

    /// Throw an exception of `category` whose message is the category's display text.
    #[track_caller]
    pub fn throw_default(&mut self, category: &Category) -> Thrown {
        self.thrown.fill(category, None);
        self.raise()
    }

    /// Throw an exception of `category` with a formatted message.
    #[track_caller]
    pub fn throw_fmt(&mut self, category: &Category, args: fmt::Arguments<'_>) -> Thrown {
        self.thrown.fill_fmt(category, args);
        self.raise()
    }

    /// Throw the current exception again, unchanged except for its origin.
    #[track_caller]
    pub fn rethrow(&mut self) -> Thrown {
        self.raise()
    }

    #[track_caller]
    fn raise(&mut self) -> Thrown {
        let origin = self.origin_here();
        self.thrown.set_origin(origin);
        tracing::debug!(
            name = self.thrown.name(),
            message = self.thrown.message(),
            depth = self.depth(),
            "exception thrown"
        );
        self.propagate()
    }

    /// Hand the current exception to the innermost frame, or terminate when
    /// there is none.
    pub(crate) fn propagate(&mut self) -> Thrown {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.uncaught = true;
                Thrown::new()
            }
            None => report::terminate(self.config().on_uncaught, &self.thrown),
        }
    }
}
