//! Session record storage port definition.

use async_trait::async_trait;

use crate::domain::entities::StoredSession;
use crate::domain::errors::ApiError;

/// Port for persisting the non-secret half of a session.
#[async_trait]
pub trait SessionStoragePort: Send + Sync {
    async fn load(&self) -> Result<Option<StoredSession>, ApiError>;

    async fn save(&self, session: &StoredSession) -> Result<(), ApiError>;

    async fn clear(&self) -> Result<(), ApiError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory session storage for testing.
    #[derive(Clone, Default)]
    pub struct MockSessionStorage {
        session: Arc<RwLock<Option<StoredSession>>>,
        reject_saves: bool,
    }

    impl MockSessionStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_session(session: StoredSession) -> Self {
            Self {
                session: Arc::new(RwLock::new(Some(session))),
                reject_saves: false,
            }
        }

        /// Storage whose writes always fail, as on a read-only disk.
        pub fn rejecting_saves() -> Self {
            Self {
                reject_saves: true,
                ..Self::default()
            }
        }

        pub async fn stored(&self) -> Option<StoredSession> {
            self.session.read().await.clone()
        }
    }

    #[async_trait]
    impl SessionStoragePort for MockSessionStorage {
        async fn load(&self) -> Result<Option<StoredSession>, ApiError> {
            Ok(self.session.read().await.clone())
        }

        async fn save(&self, session: &StoredSession) -> Result<(), ApiError> {
            if self.reject_saves {
                return Err(ApiError::Storage {
                    message: "read-only".to_string(),
                });
            }
            *self.session.write().await = Some(session.clone());
            Ok(())
        }

        async fn clear(&self) -> Result<(), ApiError> {
            *self.session.write().await = None;
            Ok(())
        }
    }
}
