//! Pharmacy REST API adapter.

mod auth;
mod client;
pub mod dto;
mod storefront;

pub use client::{ApiClient, DEFAULT_API_URL};
