//! Infrastructure layer with external service adapters.

/// Pharmacy REST API client.
pub mod api;
/// Application configuration.
pub mod config;
/// Session record persistence.
pub mod session_store;
/// Token storage adapters.
pub mod storage;

pub use api::ApiClient;
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use session_store::FileSessionStore;
pub use storage::KeyringTokenStorage;
