//! Secure credential storage error types.

use thiserror::Error;

/// Keyring failure, tagged with the entry involved.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("secure storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read {entry} credential: {message}")]
    Read { entry: &'static str, message: String },

    #[error("failed to write {entry} credential: {message}")]
    Write { entry: &'static str, message: String },

    #[error("failed to delete {entry} credential: {message}")]
    Delete { entry: &'static str, message: String },

    #[error("stored {entry} credential is malformed")]
    Malformed { entry: &'static str },
}
