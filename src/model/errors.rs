//! # Model Errors

use thiserror::Error;

/// Result type for ontology loading
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while reading ontology documents
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Failed to read ontology {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ontology document: {0}")]
    Json(#[from] serde_json::Error),
}
