//! On-disk session record.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};

use crate::domain::entities::StoredSession;
use crate::domain::errors::ApiError;
use crate::domain::ports::SessionStoragePort;

/// Keeps the signed-in user in `session.toml`; tokens stay in the keyring.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("toml.tmp")
    }
}

#[async_trait]
impl SessionStoragePort for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, ApiError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ApiError::storage(format!("failed to read session: {e}"))),
        };

        match toml::from_str::<StoredSession>(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(error = %e, path = %self.path.display(), "Discarding malformed session file");
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &StoredSession) -> Result<(), ApiError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ApiError::storage(format!("failed to create data directory: {e}")))?;
        }

        let content = toml::to_string_pretty(session)
            .map_err(|e| ApiError::storage(format!("failed to serialize session: {e}")))?;

        let temp = self.temp_path();
        fs::write(&temp, content)
            .await
            .map_err(|e| ApiError::storage(format!("failed to write session: {e}")))?;
        fs::rename(&temp, &self.path)
            .await
            .map_err(|e| ApiError::storage(format!("failed to persist session: {e}")))?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), ApiError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ApiError::storage(format!("failed to remove session: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Role, User};
    use tempfile::tempdir;

    fn user() -> User {
        User::new(3, "+998901112233", "Dilnoza", "Karimova", Role::Customer)
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.toml"));

        assert!(store.load().await.unwrap().is_none());

        store.save(&StoredSession::authenticated(user())).await.unwrap();
        let loaded = store.load().await.unwrap().unwrap();
        assert!(loaded.is_authenticated);
        assert_eq!(loaded.user.first_name(), "Dilnoza");
        assert!(!store.temp_path().exists());

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_file_reads_as_signed_out() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.toml"));
        std::fs::write(store.path(), "user = [").unwrap();

        assert!(store.load().await.unwrap().is_none());
    }
}
