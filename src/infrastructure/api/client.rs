//! Pharmacy REST API HTTP client.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::dto::unwrap_envelope;
use crate::domain::entities::SessionEvent;
use crate::domain::errors::{ApiError, RejectionBody};
use crate::domain::ports::{SessionStoragePort, TokenStoragePort};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
const USER_AGENT: &str = concat!("dorixona/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP wrapper: bearer injection, 401 handling and envelope decoding.
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenStoragePort>,
    sessions: Arc<dyn SessionStoragePort>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl ApiClient {
    /// Creates the client and the receiver for session expiry events.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        tokens: Arc<dyn TokenStoragePort>,
        sessions: Arc<dyn SessionStoragePort>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SessionEvent>), ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        let (events, rx) = mpsc::unbounded_channel();
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok((
            Self {
                client,
                base_url,
                tokens,
                sessions,
                events,
            },
            rx,
        ))
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(self.url(path))
    }

    pub(crate) fn patch(&self, path: &str) -> RequestBuilder {
        self.client.patch(self.url(path))
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.client.delete(self.url(path))
    }

    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.access_token().await {
            Ok(Some(token)) => request.header(header::AUTHORIZATION, token.bearer()),
            Ok(None) => request,
            Err(e) => {
                warn!(error = %e, "Failed to read access token, sending anonymously");
                request
            }
        }
    }

    /// Sends the request and maps every non-2xx status to [`ApiError`].
    ///
    /// # Errors
    /// Returns [`ApiError::Unauthorized`] after wiping credentials on 401,
    /// [`ApiError::Rejected`] for other failures, or a network error.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self
            .authorize(request)
            .await
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        debug!(status = %status, url = %response.url().path(), "Response received");

        if status == StatusCode::UNAUTHORIZED {
            self.expire_session().await;
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let body = RejectionBody::parse(&raw);
            warn!(status = %status, body = ?body, "Request rejected");
            return Err(ApiError::rejected(status.as_u16(), body));
        }

        Ok(response)
    }

    async fn expire_session(&self) {
        info!("Backend answered 401, clearing stored session");
        if let Err(e) = self.tokens.delete_tokens().await {
            warn!(error = %e, "Failed to delete tokens after 401");
        }
        if let Err(e) = self.sessions.clear().await {
            warn!(error = %e, "Failed to clear session record after 401");
        }
        if self.events.send(SessionEvent::Expired).is_err() {
            debug!("No listener for session events");
        }
    }

    /// Sends and decodes the (possibly enveloped) JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        decode(response).await
    }

    /// Sends and discards the response body.
    pub(crate) async fn execute(&self, request: RequestBuilder) -> Result<(), ApiError> {
        self.send(request).await.map(drop)
    }

    pub(crate) async fn fetch_json<B, T>(
        &self,
        request: RequestBuilder,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.fetch(request.json(body)).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let body: Value = response.json().await.map_err(|e| {
        warn!(error = %e, "Failed to read response body");
        ApiError::unexpected(format!("invalid response body: {e}"))
    })?;

    serde_json::from_value(unwrap_envelope(body)).map_err(|e| {
        warn!(error = %e, "Failed to decode response");
        ApiError::unexpected(format!("failed to parse response: {e}"))
    })
}

fn map_transport_error(e: reqwest::Error) -> ApiError {
    warn!(error = %e, "Failed to reach the pharmacy API");
    if e.is_timeout() {
        ApiError::network("request timed out")
    } else if e.is_connect() {
        ApiError::network("failed to connect to the server")
    } else {
        ApiError::network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MockSessionStorage, MockTokenStorage};

    fn client(base: &str) -> ApiClient {
        ApiClient::new(
            base,
            Duration::from_secs(5),
            Arc::new(MockTokenStorage::new()),
            Arc::new(MockSessionStorage::new()),
        )
        .unwrap()
        .0
    }

    #[test]
    fn test_url_joining() {
        let api = client("http://localhost:8000/api/");
        assert_eq!(api.base_url(), "http://localhost:8000/api");
        assert_eq!(
            api.url("/v3/orders/cart/"),
            "http://localhost:8000/api/v3/orders/cart/"
        );
        assert_eq!(api.url("v8/dashboard/admin/"), "http://localhost:8000/api/v8/dashboard/admin/");
    }
}
