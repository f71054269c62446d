//! Stub keyring storage for builds without keyring support.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::domain::entities::TokenPair;
use crate::domain::errors::SecretError;
use crate::domain::ports::TokenStoragePort;

/// Process-lifetime token storage; every launch starts signed out.
#[derive(Default)]
pub struct KeyringTokenStorage {
    tokens: Mutex<Option<TokenPair>>,
}

impl KeyringTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_service(_service: impl Into<String>) -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStoragePort for KeyringTokenStorage {
    async fn get_tokens(&self) -> Result<Option<TokenPair>, SecretError> {
        Ok(self.tokens.lock().clone())
    }

    async fn store_tokens(&self, tokens: &TokenPair) -> Result<(), SecretError> {
        debug!("Keyring feature disabled - tokens kept in memory only");
        *self.tokens.lock() = Some(tokens.clone());
        Ok(())
    }

    async fn delete_tokens(&self) -> Result<(), SecretError> {
        *self.tokens.lock() = None;
        Ok(())
    }
}
