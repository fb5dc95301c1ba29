pub mod config;
pub mod error;
pub mod frame;

pub use config::{Config, OverflowAction, UncaughtAction, DEFAULT_MAX_BLOCKS};
pub use error::{ConfigError, ContractError};
pub use frame::{Frame, Stage};

use crate::exception::{Exception, Origin};
use crate::report;

/// The handler stack of one execution context.
///
/// Holds the nested TRY frames and the single exception currently in flight.
/// Storage for both is allocated up front and never grows. Every operation
/// needs `&mut Context`, so each thread (or fiber) works on its own instance.
#[derive(Debug)]
pub struct Context {
    config: Config,
    pub(crate) frames: Vec<Frame>,
    pub(crate) thrown: Exception,
}

impl Context {
    /// A context with the default configuration.
    pub fn new() -> Self {
        let config = Config::default();
        Context {
            frames: Vec::with_capacity(config.max_blocks),
            thrown: Exception::with_limit(config.max_message_length),
            config,
        }
    }

    /// A context with `config`, after validating it and allocating its storage.
    pub fn with_config(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut frames = Vec::new();
        frames
            .try_reserve_exact(config.max_blocks)
            .map_err(|_| ConfigError::TooManyBlocks {
                max_blocks: config.max_blocks,
            })?;
        let thrown = Exception::try_with_limit(config.max_message_length).map_err(|_| {
            ConfigError::MessageTooLong {
                max_message_length: config.max_message_length,
            }
        })?;

        Ok(Context {
            frames,
            thrown,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Number of TRY scopes currently open.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Maximum number of TRY scopes that can be open at once.
    pub fn capacity(&self) -> usize {
        self.config.max_blocks
    }

    /// The last exception thrown in this context.
    pub fn exception(&self) -> &Exception {
        &self.thrown
    }

    /// Whether the innermost TRY scope holds an exception no clause accepted.
    ///
    /// Meaningful inside FINALLY; `false` outside any scope.
    pub fn is_uncaught(&self) -> bool {
        self.frames.last().is_some_and(|frame| frame.uncaught)
    }

    /// Open a new frame at the `Body` stage.
    #[track_caller]
    pub fn push_frame(&mut self) -> Result<&mut Frame, ContractError> {
        let opened_at = self.origin_here();
        if self.frames.len() >= self.config.max_blocks {
            return Err(ContractError::too_many_nested_scopes(
                self.config.max_blocks,
                opened_at,
            ));
        }

        self.frames.push(Frame::new(opened_at));
        tracing::trace!(depth = self.frames.len(), "pushed handler frame");
        let top = self.frames.len() - 1;
        Ok(&mut self.frames[top])
    }

    /// Remove the innermost frame.
    pub fn pop_frame(&mut self) -> Result<Frame, ContractError> {
        let frame = self.frames.pop().ok_or(ContractError::NoActiveScope)?;
        tracing::trace!(
            depth = self.frames.len(),
            uncaught = frame.uncaught,
            "popped handler frame"
        );
        Ok(frame)
    }

    /// The innermost frame.
    pub fn current_frame(&self) -> Result<&Frame, ContractError> {
        self.frames.last().ok_or(ContractError::NoActiveScope)
    }

    #[track_caller]
    pub(crate) fn origin_here(&self) -> Option<Origin> {
        if self.config.capture_origin {
            Some(Origin::caller())
        } else {
            None
        }
    }

    /// Report a contract violation and run the overflow action.
    pub(crate) fn fatal(&self, error: &ContractError) -> ! {
        report::fatal(self.config.on_overflow, error)
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::new()
    }
}
