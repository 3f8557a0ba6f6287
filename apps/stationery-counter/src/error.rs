//! # Counter Error Types
//!
//! Errors that end a session. Anything the customer can fix at the prompt
//! (a bad product id, a zero quantity, a malformed name) is rendered as a
//! console message by the session and never reaches this type.
//!
//! ## Exit Codes
//! ```text
//! SessionError ───────────► exit 1
//! ConfigError  ───────────► exit 2
//! clap usage error ───────► clap's own code
//! ```

use std::io;
use thiserror::Error;

use stationery_db::DbError;

/// Fatal session fault.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Storage rejected or failed an operation.
    #[error("Database error: {0}")]
    Storage(#[from] DbError),

    /// The console could not be read or written.
    #[error("Console I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input ended while a prompt was outstanding.
    #[error("Input closed before the session finished")]
    InputClosed,
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Invalid startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown variant '{0}' (expected 'simple' or 'strict')")]
    UnknownVariant(String),

    #[error("Unknown catalog source '{0}' (expected 'static' or 'database')")]
    UnknownCatalog(String),

    #[error("Unknown flush mode '{0}' (expected 'atomic' or 'per-item')")]
    UnknownFlushMode(String),

    #[error("max connections must be at least 1")]
    NoConnections,

    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("Could not create data directory {path}: {source}")]
    DataDir {
        path: String,
        #[source]
        source: io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_converts() {
        let err: SessionError = DbError::RegistrationFailed {
            name: "John".to_string(),
        }
        .into();
        assert!(matches!(err, SessionError::Storage(_)));
        assert!(err.to_string().contains("John"));
    }

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::UnknownVariant("fancy".to_string()).to_string(),
            "Unknown variant 'fancy' (expected 'simple' or 'strict')"
        );
    }
}
