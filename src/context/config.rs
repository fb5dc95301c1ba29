use crate::exception::{Exception, DEFAULT_MAX_MESSAGE_LENGTH};

use super::error::{ConfigError, ContractError};

/// Default maximum number of nested TRY scopes.
pub const DEFAULT_MAX_BLOCKS: usize = 32;

/// What happens when a contract violation such as nesting overflow occurs.
///
/// The violation is reported on stderr before the action runs.
#[derive(Debug, Clone, Copy, Default)]
pub enum OverflowAction {
    /// Abort the process.
    #[default]
    Abort,
    /// Panic with the violation as message.
    Panic,
    /// Hand the violation to a diverging hook.
    Custom(fn(&ContractError) -> !),
}

/// What happens when an exception leaves the outermost TRY scope.
///
/// The exception is reported on stderr before the action runs.
#[derive(Debug, Clone, Copy, Default)]
pub enum UncaughtAction {
    /// Exit the process with a failure status.
    #[default]
    Exit,
    /// Abort the process.
    Abort,
    /// Panic with the exception as message.
    Panic,
    /// Hand the exception to a diverging hook.
    Custom(fn(&Exception) -> !),
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of TRY scopes that can be nested.
    pub max_blocks: usize,
    /// Maximum exception message length, in bytes.
    pub max_message_length: usize,
    /// Record the file and line of throws and TRY scopes.
    pub capture_origin: bool,
    pub on_overflow: OverflowAction,
    pub on_uncaught: UncaughtAction,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_blocks: DEFAULT_MAX_BLOCKS,
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
            capture_origin: cfg!(debug_assertions),
            on_overflow: OverflowAction::default(),
            on_uncaught: UncaughtAction::default(),
        }
    }
}

impl Config {
    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    pub fn with_max_message_length(mut self, max_message_length: usize) -> Self {
        self.max_message_length = max_message_length;
        self
    }

    pub fn with_capture_origin(mut self, capture_origin: bool) -> Self {
        self.capture_origin = capture_origin;
        self
    }

    pub fn with_overflow_action(mut self, action: OverflowAction) -> Self {
        self.on_overflow = action;
        self
    }

    pub fn with_uncaught_action(mut self, action: UncaughtAction) -> Self {
        self.on_uncaught = action;
        self
    }

    /// Panic instead of terminating the process on both failure paths.
    pub fn panicking(self) -> Self {
        self.with_overflow_action(OverflowAction::Panic)
            .with_uncaught_action(UncaughtAction::Panic)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_blocks == 0 {
            return Err(ConfigError::NoBlocks);
        }
        Ok(())
    }
}
