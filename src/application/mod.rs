//! Application layer with use cases, services and form DTOs.

/// Form DTOs.
pub mod dto;
/// Session, registration flow, view stores and routing.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{NotificationManager, SessionContext};
pub use use_cases::{LoginUseCase, RegisterUseCase, UpdateProfileUseCase, VerifyOtpUseCase};
