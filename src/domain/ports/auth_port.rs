//! Account port definition.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::entities::{AuthGrant, PhoneNumber, RegistrationDraft, User};
use crate::domain::errors::ApiError;

/// Editable profile fields sent with `PATCH /v2/users/me/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
}

/// Port for account operations against the pharmacy backend.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Creates the account and asks the backend to text a verification code.
    async fn register(&self, draft: &RegistrationDraft) -> Result<(), ApiError>;

    /// Exchanges a verification code for session credentials.
    async fn verify_otp(&self, phone: &PhoneNumber, code: &str) -> Result<AuthGrant, ApiError>;

    async fn login(&self, phone: &PhoneNumber, password: &str) -> Result<AuthGrant, ApiError>;

    async fn fetch_profile(&self) -> Result<User, ApiError>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError>;
}
