//! # Presentation Errors

use thiserror::Error;

use crate::config::ConfigError;

/// Result type for change model mutation
pub type ChangeResult<T> = Result<T, ChangeError>;

/// Rejected change model operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeError {
    /// Neither axiom of the match concerns an entity of its version
    #[error("No entity of either version is concerned by {0}")]
    Unresolvable(String),

    #[error("Matched axiom has neither a source nor a target axiom")]
    EmptyMatch,
}

/// Result type for presentation strategy hooks
pub type PresentationResult<T> = Result<T, PresentationError>;

/// Failure reported by a presentation strategy hook
#[derive(Debug, Error)]
pub enum PresentationError {
    #[error("{0}")]
    Failed(String),

    #[error("{0} used before initialize")]
    NotInitialized(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Change(#[from] ChangeError),
}

impl PresentationError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// A presentation hook that failed; aborts the rest of the phase
#[derive(Debug, Error)]
#[error("Presentation strategy {strategy} failed: {error}")]
pub struct PresentationFailure {
    pub strategy: String,
    #[source]
    pub error: PresentationError,
}

impl PresentationFailure {
    pub fn new(strategy: impl Into<String>, error: PresentationError) -> Self {
        Self {
            strategy: strategy.into(),
            error,
        }
    }
}
