//! Authenticated session types.

use serde::{Deserialize, Serialize};

use super::token::{AuthToken, TokenPair};
use super::user::User;

/// In-memory authenticated identity.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: User,
    pub access_token: AuthToken,
}

impl Session {
    #[must_use]
    pub const fn new(user: User, access_token: AuthToken) -> Self {
        Self { user, access_token }
    }
}

/// Session record written to disk; tokens live in secure storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default)]
    pub is_authenticated: bool,
    pub user: User,
}

impl StoredSession {
    #[must_use]
    pub const fn authenticated(user: User) -> Self {
        Self {
            user,
            is_authenticated: true,
        }
    }
}

/// Credentials issued by login or OTP verification.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    pub tokens: TokenPair,
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend answered 401 and durable credentials were wiped.
    Expired,
}
