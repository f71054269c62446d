//! Application services.

pub mod cart_store;
pub mod catalog_store;
pub mod countdown;
pub mod notification_manager;
pub mod registration_flow;
pub mod route_guard;
pub mod session_context;

pub use cart_store::CartStore;
pub use catalog_store::CatalogStore;
pub use countdown::CountdownTimer;
pub use notification_manager::NotificationManager;
pub use registration_flow::{
    OTP_LENGTH, OtpEntry, RegistrationFlow, RegistrationStep, ResendCountdown,
};
pub use route_guard::guard;
pub use session_context::SessionContext;
