//! Error types for loading and saving the skycli configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading, migrating or writing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing a config file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// The file that could not be accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not valid YAML/JSON.
    #[error("failed to parse {}: {reason}", path.display())]
    Parse {
        /// The file that could not be parsed.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// The document parsed but does not have a recognisable config shape.
    #[error("malformed config: {reason}")]
    Malformed {
        /// Why the document was rejected.
        reason: String,
    },

    /// The document declares an `api_version` this build cannot read.
    #[error("unsupported config api_version: {version}")]
    UnsupportedVersion {
        /// The declared version.
        version: String,
    },

    /// Serializing the config for writing failed.
    #[error("failed to serialize config: {reason}")]
    Serialize {
        /// Serializer diagnostic.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
