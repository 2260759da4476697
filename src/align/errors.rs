//! # Alignment Errors

use thiserror::Error;

use crate::config::ConfigError;
use crate::model::{AnonymousIndividual, Entity};

/// Result type for alignment map mutation
pub type AlignmentResult<T> = Result<T, AlignmentError>;

/// Rejected alignment map operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignmentError {
    #[error("Alignment map is finished; no further matches accepted")]
    Frozen,

    #[error("Source entity {0} is already matched")]
    SourceAlreadyMatched(Entity),

    #[error("Target entity {0} is already matched")]
    TargetAlreadyMatched(Entity),

    #[error("Entity {0} is not part of the aligned version")]
    UnknownEntity(Entity),

    #[error("Cannot match {source_entity} with {target_entity}: kinds differ")]
    KindMismatch {
        source_entity: Entity,
        target_entity: Entity,
    },

    #[error("Anonymous individual {0} is not available for matching")]
    IndividualUnavailable(AnonymousIndividual),

    #[error("Axiom is not available for matching: {0}")]
    AxiomUnavailable(String),

    #[error("Alignment orchestrator used before initialize")]
    NotInitialized,
}

/// Result type for strategy hooks
pub type StrategyResult<T> = Result<T, StrategyError>;

/// Failure reported by a strategy hook
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("{0}")]
    Failed(String),

    #[error("Strategy {0} used before initialize")]
    NotInitialized(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Alignment(#[from] AlignmentError),
}

impl StrategyError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}

/// A strategy hook that failed, with the reason it gave
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Strategy {strategy} failed: {reason}")]
pub struct StrategyFailure {
    pub strategy: String,
    pub reason: String,
}

impl StrategyFailure {
    pub fn new(strategy: impl Into<String>, error: &StrategyError) -> Self {
        Self {
            strategy: strategy.into(),
            reason: error.to_string(),
        }
    }
}
