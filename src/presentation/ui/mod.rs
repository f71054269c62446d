//! UI screens.

mod app;
mod cart_screen;
mod catalog_screen;
mod checkout_screen;
mod dashboard_screen;
mod intent;
mod login_screen;
mod notification_popup;
mod order_detail_screen;
mod orders_screen;
mod payments_screen;
mod prescriptions_screen;
mod product_screen;
mod profile_screen;
mod register_screen;
mod utils;

pub use app::{App, AppSettings};
