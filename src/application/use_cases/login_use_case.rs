//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::LoginForm;
use crate::application::services::SessionContext;
use crate::domain::entities::User;
use crate::domain::errors::ApiError;
use crate::domain::ports::AuthPort;

/// Handles phone and password authentication.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
    session: SessionContext,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>, session: SessionContext) -> Self {
        Self { auth_port, session }
    }

    /// Validates the form, logs in and establishes the session.
    ///
    /// # Errors
    /// Returns error if the form is invalid, the backend rejects the
    /// credentials, or the session cannot be persisted.
    pub async fn execute(&self, form: &LoginForm) -> Result<User, ApiError> {
        let phone = form.validate()?;

        debug!(phone = %phone, "Attempting login");

        let grant = self
            .auth_port
            .login(&phone, &form.password)
            .await
            .inspect_err(|e| warn!(error = %e, "Login rejected"))?;

        let user = self.session.establish(grant).await?;

        info!(user_id = %user.id(), "Successfully authenticated");

        Ok(user)
    }
}
