//! Domain error types.

mod api_error;
mod rejection;
mod secret_error;
mod validation;

pub use api_error::ApiError;
pub use rejection::{
    LOGIN_FALLBACK, REGISTRATION_FALLBACK, RejectionBody, UNVERIFIED_PHONE, VERIFICATION_FALLBACK,
};
pub use secret_error::SecretError;
pub use validation::ValidationErrors;
