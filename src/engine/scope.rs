// scope.rs - Typestate scopes driving one handler frame through its stages

use std::thread;

use crate::context::{Context, ContractError, Frame, Stage};
use crate::exception::Category;

use super::Outcome;

/// Owns one frame of the handler stack for the lifetime of a TRY scope.
///
/// Dropping a guard that was never closed (a Rust panic unwinding through
/// the scope, or a scope left without `end`) pops its frame so the stack
/// stays balanced.
struct ScopeGuard<'a> {
    ctx: &'a mut Context,
    depth: usize,
    closed: bool,
}

impl<'a> ScopeGuard<'a> {
    #[track_caller]
    fn open(ctx: &'a mut Context) -> Self {
        let pushed = ctx.push_frame().map(|_| ());
        if let Err(error) = pushed {
            ctx.fatal(&error);
        }
        let depth = ctx.depth();
        ScopeGuard {
            ctx,
            depth,
            closed: false,
        }
    }

    /// The frame this scope pushed. Anything above or missing is a contract violation.
    fn frame(&mut self) -> &mut Frame {
        let found = self.ctx.depth();
        if found != self.depth {
            self.ctx.fatal(&ContractError::UnbalancedScopes {
                expected: self.depth,
                found,
            });
        }
        &mut self.ctx.frames[self.depth - 1]
    }

    /// Record a clause's outcome. A returned `Thrown` means the exception
    /// reached this frame, even if the flag was already set by the throw.
    fn settle(&mut self, outcome: Outcome) {
        if outcome.is_err() {
            if self.ctx.thrown.category().is_none() {
                self.ctx.fatal(&ContractError::ForeignSignal);
            }
            self.frame().uncaught = true;
        }
    }

    fn run_body<F>(&mut self, body: F)
    where
        F: FnOnce(&mut Context) -> Outcome,
    {
        let outcome = body(&mut *self.ctx);
        self.settle(outcome);
        self.frame().advance_to(Stage::CatchEval);
    }

    /// Run `handler` if this frame is still evaluating catches, holds an
    /// uncaught exception, and `category` (when given) matches it.
    fn run_catch<H>(&mut self, category: Option<&Category>, handler: H)
    where
        H: FnOnce(&mut Context) -> Outcome,
    {
        let eligible = {
            let frame = self.frame();
            frame.stage == Stage::CatchEval && frame.uncaught
        };
        let matches = category.map_or(true, |category| self.ctx.thrown.is(category));
        if !eligible || !matches {
            return;
        }

        self.frame().uncaught = false;
        tracing::trace!(
            depth = self.depth,
            name = self.ctx.thrown.name(),
            "exception caught"
        );

        // Stays in CatchEval while the handler runs; leaving it closes the
        // remaining clauses of this frame.
        let outcome = handler(&mut *self.ctx);
        self.settle(outcome);
        self.frame().advance_to(Stage::Finalize);
    }

    fn run_finally<H>(&mut self, handler: H)
    where
        H: FnOnce(&mut Context) -> Outcome,
    {
        if self.frame().stage >= Stage::Done {
            return;
        }
        self.frame().advance_to(Stage::Finalize);

        let outcome = handler(&mut *self.ctx);
        self.settle(outcome);
        self.frame().advance_to(Stage::Done);
    }

    /// Pop the frame and either finish normally or pass the exception on.
    fn close(mut self) -> Outcome {
        self.frame().advance_to(Stage::Done);
        let frame = match self.ctx.pop_frame() {
            Ok(frame) => frame,
            Err(error) => self.ctx.fatal(&error),
        };
        self.closed = true;

        if !frame.uncaught {
            return Ok(());
        }
        tracing::trace!(depth = self.ctx.depth(), "propagating to enclosing scope");
        Err(self.ctx.propagate())
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        let frame = self.ctx.frames.get(self.depth - 1).copied();
        self.ctx.frames.truncate(self.depth - 1);

        if let Some(frame) = frame {
            if frame.uncaught && !thread::panicking() {
                self.ctx
                    .fatal(&ContractError::scope_abandoned(frame.opened_at));
            }
        }
    }
}

/// A TRY scope whose body has run. Add at least one clause.
#[must_use = "a TRY block needs a catch, catch_all or finally clause and a final `end()`"]
pub struct TryScope<'a> {
    guard: ScopeGuard<'a>,
}

impl<'a> TryScope<'a> {
    #[track_caller]
    pub(super) fn open<F>(ctx: &'a mut Context, body: F) -> Self
    where
        F: FnOnce(&mut Context) -> Outcome,
    {
        let mut guard = ScopeGuard::open(ctx);
        guard.run_body(body);
        TryScope { guard }
    }

    /// Handle exceptions of `category`.
    pub fn catch<H>(mut self, category: &Category, handler: H) -> CatchScope<'a>
    where
        H: FnOnce(&mut Context) -> Outcome,
    {
        self.guard.run_catch(Some(category), handler);
        CatchScope { guard: self.guard }
    }

    /// Handle any exception.
    pub fn catch_all<H>(mut self, handler: H) -> CatchAllScope<'a>
    where
        H: FnOnce(&mut Context) -> Outcome,
    {
        self.guard.run_catch(None, handler);
        CatchAllScope { guard: self.guard }
    }

    /// Run `handler` whether or not an exception was thrown or caught.
    pub fn finally<H>(mut self, handler: H) -> FinallyScope<'a>
    where
        H: FnOnce(&mut Context) -> Outcome,
    {
        self.guard.run_finally(handler);
        FinallyScope { guard: self.guard }
    }
}

/// A TRY scope with one or more `catch` clauses.
#[must_use = "a TRY block must be closed with `end()`"]
pub struct CatchScope<'a> {
    guard: ScopeGuard<'a>,
}

impl<'a> CatchScope<'a> {
    pub fn catch<H>(mut self, category: &Category, handler: H) -> CatchScope<'a>
    where
        H: FnOnce(&mut Context) -> Outcome,
    {
        self.guard.run_catch(Some(category), handler);
        self
    }

    pub fn catch_all<H>(mut self, handler: H) -> CatchAllScope<'a>
    where
        H: FnOnce(&mut Context) -> Outcome,
    {
        self.guard.run_catch(None, handler);
        CatchAllScope { guard: self.guard }
    }

    pub fn finally<H>(mut self, handler: H) -> FinallyScope<'a>
    where
        H: FnOnce(&mut Context) -> Outcome,
    {
        self.guard.run_finally(handler);
        FinallyScope { guard: self.guard }
    }

    /// Leave the scope, passing an uncaught exception to the enclosing one.
    pub fn end(self) -> Outcome {
        self.guard.close()
    }
}

/// A TRY scope whose `catch_all` clause has been given. Only `finally` may follow.
#[must_use = "a TRY block must be closed with `end()`"]
pub struct CatchAllScope<'a> {
    guard: ScopeGuard<'a>,
}

impl<'a> CatchAllScope<'a> {
    pub fn finally<H>(mut self, handler: H) -> FinallyScope<'a>
    where
        H: FnOnce(&mut Context) -> Outcome,
    {
        self.guard.run_finally(handler);
        FinallyScope { guard: self.guard }
    }

    pub fn end(self) -> Outcome {
        self.guard.close()
    }
}

/// A TRY scope whose cleanup has run.
#[must_use = "a TRY block must be closed with `end()`"]
pub struct FinallyScope<'a> {
    guard: ScopeGuard<'a>,
}

impl FinallyScope<'_> {
    pub fn end(self) -> Outcome {
        self.guard.close()
    }
}
