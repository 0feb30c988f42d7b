//! Error types for the interactive client

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Invalid configuration: {field}: {reason}")]
    InvalidConfiguration { field: String, reason: String },

    #[error("Console I/O failed: {0}")]
    Console(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn invalid_configuration(field: impl Into<String>, reason: impl Into<String>) -> Self {
        CliError::InvalidConfiguration {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type CliResult<T> = std::result::Result<T, CliError>;
