mod auth_port;
mod session_storage_port;
mod storefront_port;
mod token_storage_port;

pub use auth_port::{AuthPort, ProfileUpdate};
pub use session_storage_port::SessionStoragePort;
pub use storefront_port::{PrescriptionUpload, StorefrontPort};
pub use token_storage_port::TokenStoragePort;

#[cfg(test)]
pub use storefront_port::MockStorefrontPort;
