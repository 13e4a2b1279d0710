//! Common error types for the analysis engine

use thiserror::Error;

/// Common result type for tsc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by tsc-core
///
/// Data irregularities (missing signals, empty sequences, all-unknown scores)
/// are never errors; they surface as unset optional fields in the output.
#[derive(Error, Debug)]
pub enum Error {
    /// Analysis configuration violates its contract
    #[error("Invalid configuration: {parameter}: {reason}")]
    InvalidConfig {
        parameter: &'static str,
        reason: String,
    },

    /// Configuration file loading error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub(crate) fn invalid_config(parameter: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            parameter,
            reason: reason.into(),
        }
    }
}
