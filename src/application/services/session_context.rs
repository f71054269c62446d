//! Authenticated session lifecycle.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::domain::entities::{AuthGrant, Role, Session, StoredSession, User};
use crate::domain::errors::ApiError;
use crate::domain::ports::{SessionStoragePort, TokenStoragePort};

/// Owns the current session and both of its durable stores.
///
/// Tokens and the session record are always written and cleared together.
#[derive(Clone)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Session>>>,
    tokens: Arc<dyn TokenStoragePort>,
    records: Arc<dyn SessionStoragePort>,
}

impl SessionContext {
    #[must_use]
    pub fn new(tokens: Arc<dyn TokenStoragePort>, records: Arc<dyn SessionStoragePort>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            tokens,
            records,
        }
    }

    /// Persists credentials and marks the session authenticated.
    ///
    /// # Errors
    /// Returns error if either store rejects the write; nothing stays half-written.
    pub async fn establish(&self, grant: AuthGrant) -> Result<User, ApiError> {
        let AuthGrant { tokens, user } = grant;

        self.tokens.store_tokens(&tokens).await?;
        if let Err(e) = self.records.save(&StoredSession::authenticated(user.clone())).await {
            warn!(error = %e, "Failed to persist session record, rolling back tokens");
            if let Err(rollback) = self.tokens.delete_tokens().await {
                warn!(error = %rollback, "Token rollback failed, keyring may hold stale tokens");
            }
            return Err(e);
        }

        *self.current.write() = Some(Session::new(user.clone(), tokens.access.clone()));
        info!(user_id = %user.id(), role = %user.role(), "Session established");
        Ok(user)
    }

    /// Logs out: clears memory and both durable stores.
    pub async fn destroy(&self) {
        self.invalidate();
        if let Err(e) = self.tokens.delete_tokens().await {
            warn!(error = %e, "Failed to delete stored tokens");
        }
        if let Err(e) = self.records.clear().await {
            warn!(error = %e, "Failed to clear session record");
        }
        info!("Session destroyed");
    }

    /// Clears memory only; used after the HTTP layer already wiped durable state.
    pub fn invalidate(&self) {
        if self.current.write().take().is_some() {
            debug!("In-memory session dropped");
        }
    }

    /// Loads a persisted session, requiring both the record and the access token.
    ///
    /// Any partial state is wiped so the two stores never disagree.
    pub async fn restore(&self) -> Option<User> {
        let record = self.records.load().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read session record");
            None
        });
        let tokens = self.tokens.get_tokens().await.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read stored tokens");
            None
        });

        match (record, tokens) {
            (Some(record), Some(tokens)) if record.is_authenticated => {
                info!(user_id = %record.user.id(), "Session restored");
                *self.current.write() = Some(Session::new(record.user.clone(), tokens.access.clone()));
                Some(record.user)
            }
            (None, None) => None,
            _ => {
                debug!("Discarding partial session state");
                self.destroy().await;
                None
            }
        }
    }

    /// Replaces the session user after a profile update and re-persists it.
    ///
    /// # Errors
    /// Returns error if the session record cannot be written.
    pub async fn update_user(&self, user: User) -> Result<(), ApiError> {
        {
            let mut guard = self.current.write();
            let Some(session) = guard.as_mut() else {
                return Ok(());
            };
            session.user = user.clone();
        }
        self.records.save(&StoredSession::authenticated(user)).await
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.current.read().as_ref().map(|s| s.user.clone())
    }

    #[must_use]
    pub fn current(&self) -> Option<Session> {
        self.current.read().clone()
    }

    /// Role of the signed-in user, `customer` when signed out.
    #[must_use]
    pub fn role(&self) -> Role {
        self.current
            .read()
            .as_ref()
            .map_or_else(Role::default, |s| s.user.role())
    }
}
