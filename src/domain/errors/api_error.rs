//! Backend interaction error types.

use thiserror::Error;

use super::{RejectionBody, SecretError, ValidationErrors};

/// Failure of a storefront operation.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("session expired, please log in again")]
    Unauthorized,

    #[error("request rejected with status {status}")]
    Rejected { status: u16, body: RejectionBody },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("local storage error: {message}")]
    Storage { message: String },

    #[error("secure storage error: {0}")]
    Secret(#[from] SecretError),

    #[error("unexpected error: {message}")]
    Unexpected { message: String },
}

impl ApiError {
    #[must_use]
    pub fn rejected(status: u16, body: RejectionBody) -> Self {
        Self::Rejected { status, body }
    }

    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Whether the user can fix the cause and retry the same action.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::Rejected { .. } | Self::Network { .. }
        )
    }

    #[must_use]
    pub const fn rejection(&self) -> Option<&RejectionBody> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }

    /// User-facing text: the backend's own message when it sent one, else `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Validation(errors) => errors.to_string(),
            Self::Unauthorized => self.to_string(),
            Self::Rejected { body, .. } => body.summary().unwrap_or_else(|| fallback.to_string()),
            Self::Network { .. } => format!("{fallback}: server unreachable"),
            _ => fallback.to_string(),
        }
    }

    #[must_use]
    pub fn registration_message(&self) -> String {
        match self {
            Self::Rejected { body, .. } => body.registration_message(),
            other => other.user_message(super::rejection::REGISTRATION_FALLBACK),
        }
    }

    #[must_use]
    pub fn verification_message(&self) -> String {
        match self {
            Self::Rejected { body, .. } => body.verification_message(),
            other => other.user_message(super::rejection::VERIFICATION_FALLBACK),
        }
    }

    #[must_use]
    pub fn login_message(&self) -> String {
        match self {
            Self::Rejected { body, .. } => body.login_message(),
            Self::Unauthorized => super::rejection::LOGIN_FALLBACK.to_string(),
            other => other.user_message(super::rejection::LOGIN_FALLBACK),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
