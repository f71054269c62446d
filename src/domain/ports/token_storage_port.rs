//! Token storage port definition.

use async_trait::async_trait;

use crate::domain::entities::{AuthToken, TokenPair};
use crate::domain::errors::SecretError;

/// Port for durable credential persistence.
#[async_trait]
pub trait TokenStoragePort: Send + Sync {
    /// Retrieves the stored pair; `None` unless both halves exist.
    async fn get_tokens(&self) -> Result<Option<TokenPair>, SecretError>;

    async fn store_tokens(&self, tokens: &TokenPair) -> Result<(), SecretError>;

    /// Deletes both tokens; deleting absent entries is not an error.
    async fn delete_tokens(&self) -> Result<(), SecretError>;

    /// Returns the access half of the stored pair.
    async fn access_token(&self) -> Result<Option<AuthToken>, SecretError> {
        Ok(self.get_tokens().await?.map(|pair| pair.access.clone()))
    }
}
