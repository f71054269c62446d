//! Profile update use case.

use std::sync::Arc;

use tracing::info;

use crate::application::dto::ProfileForm;
use crate::application::services::SessionContext;
use crate::domain::entities::User;
use crate::domain::errors::ApiError;
use crate::domain::ports::AuthPort;

#[derive(Clone)]
pub struct UpdateProfileUseCase {
    auth_port: Arc<dyn AuthPort>,
    session: SessionContext,
}

impl UpdateProfileUseCase {
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>, session: SessionContext) -> Self {
        Self { auth_port, session }
    }

    /// Saves the profile and refreshes the session user.
    ///
    /// # Errors
    /// Returns validation, backend or session persistence errors.
    pub async fn execute(&self, form: &ProfileForm) -> Result<User, ApiError> {
        let update = form.validate()?;
        let user = self.auth_port.update_profile(&update).await?;
        self.session.update_user(user.clone()).await?;
        info!(user_id = %user.id(), "Profile updated");
        Ok(user)
    }
}
