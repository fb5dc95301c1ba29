use crate::exception::Origin;

/// Position of a TRY scope in its one-way stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// The protected code runs.
    Body,
    /// CATCH and CATCH_ALL clauses are eligible.
    CatchEval,
    /// The FINALLY clause is eligible.
    Finalize,
    /// Cleanup ran; the frame is about to be popped.
    Done,
}

impl Stage {
    /// The stage that follows this one. `Done` is terminal.
    pub fn next(self) -> Stage {
        match self {
            Stage::Body => Stage::CatchEval,
            Stage::CatchEval => Stage::Finalize,
            Stage::Finalize | Stage::Done => Stage::Done,
        }
    }
}

/// Per-nesting-level state backing one TRY scope.
///
/// The resumption point is the Rust call frame of the scope that pushed this
/// frame: a throw travels back to it as `Err(Thrown)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub(crate) stage: Stage,
    pub(crate) uncaught: bool,
    pub(crate) opened_at: Option<Origin>,
}

impl Frame {
    pub(crate) fn new(opened_at: Option<Origin>) -> Self {
        Frame {
            stage: Stage::Body,
            uncaught: false,
            opened_at,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Whether the current exception reached this frame and no clause accepted it yet.
    pub fn is_uncaught(&self) -> bool {
        self.uncaught
    }

    /// Where the TRY scope was opened, when origin capture is enabled.
    pub fn opened_at(&self) -> Option<Origin> {
        self.opened_at
    }

    /// Move forward to `stage`, never backwards.
    pub(crate) fn advance_to(&mut self, stage: Stage) {
        if stage > self.stage {
            self.stage = stage;
        }
    }
}
