//! Layout of the per-user profile directory.

use super::app_config::AppConfig;
use directories::ProjectDirs;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

pub(crate) const APP_QUALIFIER: &str = "uz";
pub(crate) const APP_ORGANIZATION: &str = "dorixona";
pub(crate) const APP_NAME: &str = "dorixona";

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const SESSION_FILE_NAME: &str = "session.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no home directory to place the profile in")]
    ConfigDirNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode config: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Resolves where the client keeps its files.
///
/// `config.toml` holds user settings and `session.toml` the signed-in user.
/// Tokens never land here; they go to the OS keyring.
#[derive(Debug, Clone)]
pub struct StorageManager {
    root: PathBuf,
}

impl StorageManager {
    /// Profile rooted in the platform config directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ConfigDirNotFound`] when the platform reports no home.
    pub fn new() -> Result<Self, ConfigError> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| Self::with_dir(dirs.config_dir().to_path_buf()))
            .ok_or(ConfigError::ConfigDirNotFound)
    }

    #[must_use]
    pub const fn with_dir(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Where the session record is kept.
    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_FILE_NAME)
    }

    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the directory cannot be created.
    pub fn ensure_config_dir(&self) -> Result<(), ConfigError> {
        if !self.root.is_dir() {
            info!(path = %self.root.display(), "Creating profile directory");
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    /// Reads settings from `path_override` or the profile's `config.toml`.
    ///
    /// A missing file is seeded with defaults. A file that does not parse is
    /// left untouched and the defaults are used for this run.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or the defaults cannot be written.
    pub fn load_config(&self, path_override: Option<&Path>) -> Result<AppConfig, ConfigError> {
        self.ensure_config_dir()?;
        let path = path_override.map_or_else(|| self.config_path(), Path::to_path_buf);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %path.display(), "No config file, writing defaults");
                let defaults = AppConfig::default();
                write_toml(&path, &defaults)?;
                return Ok(defaults);
            }
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content).or_else(|e| {
            warn!(path = %path.display(), error = %e, "Config file is malformed, using defaults");
            Ok(AppConfig::default())
        })
    }
}

/// Replaces `path` through a sibling temp file so readers never see half a file.
fn write_toml<T: serde::Serialize>(path: &Path, data: &T) -> Result<(), ConfigError> {
    let body = toml::to_string_pretty(data)?;
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::other("config path has no parent"))?;
    fs::create_dir_all(dir)?;

    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    staged.write_all(body.as_bytes())?;
    staged.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), "Config written");
    Ok(())
}
