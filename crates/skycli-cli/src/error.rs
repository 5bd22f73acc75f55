//! CLI error types.

use skycli_config::ConfigError;
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Loading, migrating or saving configuration failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A command needs something the resolved context does not provide.
    #[error("{0}")]
    Precondition(String),

    /// A named context, cluster or user does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
