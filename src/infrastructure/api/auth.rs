//! Account endpoints.

use async_trait::async_trait;
use tracing::debug;

use super::client::ApiClient;
use super::dto::{LoginRequest, RegisterRequest, TokenGrantResponse, VerifyRequest};
use crate::domain::entities::{AuthGrant, PhoneNumber, RegistrationDraft, User};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, ProfileUpdate};

#[async_trait]
impl AuthPort for ApiClient {
    async fn register(&self, draft: &RegistrationDraft) -> Result<(), ApiError> {
        debug!(phone = %draft.phone, "POST register");
        let body = RegisterRequest {
            phone_number: draft.phone.as_str(),
            password: &draft.password,
            first_name: &draft.first_name,
            last_name: &draft.last_name,
        };
        self.execute(self.post("/v2/users/register/").json(&body)).await
    }

    async fn verify_otp(&self, phone: &PhoneNumber, code: &str) -> Result<AuthGrant, ApiError> {
        debug!(phone = %phone, "POST verify");
        let body = VerifyRequest {
            phone_number: phone.as_str(),
            code,
        };
        let grant: TokenGrantResponse = self.fetch_json(self.post("/v2/users/verify/"), &body).await?;
        AuthGrant::try_from(grant)
    }

    async fn login(&self, phone: &PhoneNumber, password: &str) -> Result<AuthGrant, ApiError> {
        debug!(phone = %phone, "POST login");
        let body = LoginRequest {
            phone_number: phone.as_str(),
            password,
        };
        let grant: TokenGrantResponse = self.fetch_json(self.post("/v2/users/login/"), &body).await?;
        AuthGrant::try_from(grant)
    }

    async fn fetch_profile(&self) -> Result<User, ApiError> {
        self.fetch(self.get("/v2/users/me/")).await
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.fetch_json(self.patch("/v2/users/me/"), update).await
    }
}
