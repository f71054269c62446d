//! Registration and code verification use cases.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::RegistrationForm;
use crate::application::dto::auth_dto::fields;
use crate::application::services::SessionContext;
use crate::domain::entities::{RegistrationDraft, User};
use crate::domain::errors::{ApiError, ValidationErrors};
use crate::domain::ports::AuthPort;

/// Submits registrations and re-requests verification codes.
#[derive(Clone)]
pub struct RegisterUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl RegisterUseCase {
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// Validates the form and asks the backend to text a code.
    ///
    /// # Errors
    /// Returns [`ApiError::Validation`] without contacting the backend when the
    /// form is invalid, or the backend error otherwise.
    pub async fn execute(&self, form: &RegistrationForm) -> Result<RegistrationDraft, ApiError> {
        let draft = form.validate()?;
        debug!(phone = %draft.phone, "Submitting registration");

        self.auth_port
            .register(&draft)
            .await
            .inspect_err(|e| warn!(error = %e, "Registration rejected"))?;

        info!(phone = %draft.phone, "Verification code requested");
        Ok(draft)
    }

    /// Sends the original registration payload again.
    ///
    /// # Errors
    /// Returns the backend error; the caller re-enables resend.
    pub async fn resend(&self, draft: &RegistrationDraft) -> Result<(), ApiError> {
        debug!(phone = %draft.phone, "Resending verification code");
        self.auth_port.register(draft).await
    }
}

/// Exchanges a verification code for a session.
#[derive(Clone)]
pub struct VerifyOtpUseCase {
    auth_port: Arc<dyn AuthPort>,
    session: SessionContext,
}

impl VerifyOtpUseCase {
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>, session: SessionContext) -> Self {
        Self { auth_port, session }
    }

    /// # Errors
    /// Returns a validation error for incomplete codes, or the backend error.
    pub async fn execute(
        &self,
        draft: &RegistrationDraft,
        code: Option<String>,
    ) -> Result<User, ApiError> {
        let code = code.ok_or_else(|| {
            ValidationErrors::single(fields::CODE, "Enter the full 4-digit code")
        })?;

        let grant = self
            .auth_port
            .verify_otp(&draft.phone, &code)
            .await
            .inspect_err(|e| warn!(error = %e, "Verification rejected"))?;

        let user = self.session.establish(grant).await?;
        info!(user_id = %user.id(), "Phone verified, session established");
        Ok(user)
    }
}
