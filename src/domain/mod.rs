//! Domain layer with core business entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Toast notifications.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Navigable screens.
pub mod route;

pub use entities::{AuthToken, Session, TokenPair, User};
pub use errors::{ApiError, SecretError, ValidationErrors};
pub use notification::{Notification, NotificationLevel};
pub use ports::{AuthPort, SessionStoragePort, StorefrontPort, TokenStoragePort};
pub use route::Route;
