//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero status.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::engine::EngineError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Run configuration missing or invalid
    ConfigError,
    /// I/O error (files, stdout)
    IoError,
    /// A configured strategy name is not in the catalog
    UnknownStrategy,
    /// Ontology documents could not be loaded
    LoadFailed,
    /// Phase 1 could not run
    AlignmentFailed,
    /// Phase 2 aborted
    PresentationFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ONTODIFF_CLI_CONFIG_ERROR",
            Self::IoError => "ONTODIFF_CLI_IO_ERROR",
            Self::UnknownStrategy => "ONTODIFF_CLI_UNKNOWN_STRATEGY",
            Self::LoadFailed => "ONTODIFF_CLI_LOAD_FAILED",
            Self::AlignmentFailed => "ONTODIFF_CLI_ALIGNMENT_FAILED",
            Self::PresentationFailed => "ONTODIFF_CLI_PRESENTATION_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn unknown_strategy(kind: &str, name: &str) -> Self {
        Self::new(
            CliErrorCode::UnknownStrategy,
            format!("Unknown {} strategy '{}'. Run 'ontodiff strategies' for the list.", kind, name),
        )
    }

    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        let code = match &e {
            EngineError::Model(_) => CliErrorCode::LoadFailed,
            EngineError::Presentation(_) => CliErrorCode::PresentationFailed,
            EngineError::Initialization(_)
            | EngineError::Alignment(_)
            | EngineError::IllegalState { .. } => CliErrorCode::AlignmentFailed,
        };
        Self::new(code, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_code() {
        let err = CliError::unknown_strategy("alignment", "match_by_magic");
        let shown = err.to_string();
        assert!(shown.starts_with("ONTODIFF_CLI_UNKNOWN_STRATEGY: "));
        assert!(shown.contains("match_by_magic"));
    }

    #[test]
    fn test_config_error_maps_to_config_code() {
        let err: CliError = ConfigError::MissingParameter("code.annotation.property".into()).into();
        assert_eq!(err.code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_illegal_state_maps_to_alignment_code() {
        let err: CliError = EngineError::illegal_state("run phase 2", "Unstarted").into();
        assert_eq!(err.code_str(), "ONTODIFF_CLI_ALIGNMENT_FAILED");
    }
}
