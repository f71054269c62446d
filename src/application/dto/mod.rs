//! Form DTOs validated before dispatch.

pub mod auth_dto;
pub mod storefront_dto;

pub use auth_dto::{LoginForm, MIN_PASSWORD_LEN, RegistrationForm};
pub use storefront_dto::{CheckoutForm, PrescriptionForm, ProfileForm};
