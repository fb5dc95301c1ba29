use thiserror::Error;

use crate::exception::Origin;

/// Structural misuse of the handler stack.
///
/// These are not exceptions: they cannot be caught by any scope. The engine
/// reports them and runs the configured [`OverflowAction`](super::OverflowAction).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Too many TRY blocks nested (limit {limit}){}", at(.origin))]
    TooManyNestedScopes { limit: usize, origin: Option<Origin> },

    #[error("No active TRY block")]
    NoActiveScope,

    #[error("Handler stack out of balance: expected {expected} open TRY blocks, found {found}")]
    UnbalancedScopes { expected: usize, found: usize },

    #[error("TRY block dropped with an uncaught exception{}", at(.origin))]
    ScopeAbandoned { origin: Option<Origin> },

    #[error("Thrown signal reached a TRY block of a context with no exception recorded")]
    ForeignSignal,
}

impl ContractError {
    pub fn too_many_nested_scopes(limit: usize, origin: Option<Origin>) -> Self {
        ContractError::TooManyNestedScopes { limit, origin }
    }

    pub fn scope_abandoned(origin: Option<Origin>) -> Self {
        ContractError::ScopeAbandoned { origin }
    }
}

/// Rejected [`Config`](super::Config) values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max_blocks must be at least 1")]
    NoBlocks,

    #[error("cannot allocate room for {max_blocks} nested TRY blocks")]
    TooManyBlocks { max_blocks: usize },

    #[error("cannot allocate a {max_message_length}-byte message buffer")]
    MessageTooLong { max_message_length: usize },
}

fn at(origin: &Option<Origin>) -> String {
    match origin {
        Some(origin) => format!("\n    at {}", origin),
        None => String::new(),
    }
}
