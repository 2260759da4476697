//! # Engine Errors

use thiserror::Error;

use crate::align::{AlignmentError, StrategyFailure};
use crate::model::ModelError;
use crate::present::PresentationFailure;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A phase entry point was called in a state that does not allow it
    #[error("Illegal state: cannot {operation} while {state}")]
    IllegalState {
        operation: &'static str,
        state: &'static str,
    },

    /// An alignment strategy could not initialize; phase 1 did not run
    #[error(transparent)]
    Initialization(#[from] StrategyFailure),

    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    /// A presentation strategy failed; the change model is partial
    #[error(transparent)]
    Presentation(#[from] PresentationFailure),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl EngineError {
    pub fn illegal_state(operation: &'static str, state: &'static str) -> Self {
        Self::IllegalState { operation, state }
    }

    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState { .. })
    }
}
