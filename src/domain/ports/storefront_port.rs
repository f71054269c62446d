//! Storefront port for catalog, cart, orders, payments and prescriptions.

use std::path::PathBuf;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::domain::entities::{
    Cart, CartItemId, Category, Dashboard, Order, OrderId, Payment, PaymentProvider, Prescription,
    PrescriptionId, Product, ProductId, ProductQuery, Role,
};
use crate::domain::errors::ApiError;

/// Prescription images to attach to an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrescriptionUpload {
    pub order_id: OrderId,
    pub images: Vec<PathBuf>,
}

impl PrescriptionUpload {
    #[must_use]
    pub const fn new(order_id: OrderId, images: Vec<PathBuf>) -> Self {
        Self { order_id, images }
    }
}

/// Port for every authenticated or public storefront call.
///
/// Cart mutations return the cart as the backend reports it afterwards.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StorefrontPort: Send + Sync {
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError>;

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError>;

    async fn list_alternatives(&self, id: ProductId) -> Result<Vec<Product>, ApiError>;

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError>;

    async fn get_cart(&self) -> Result<Cart, ApiError>;

    async fn add_to_cart(&self, product: ProductId, quantity: u32) -> Result<Cart, ApiError>;

    async fn update_cart_item(&self, item: CartItemId, quantity: u32) -> Result<Cart, ApiError>;

    async fn remove_cart_item(&self, item: CartItemId) -> Result<Cart, ApiError>;

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError>;

    async fn get_order(&self, id: OrderId) -> Result<Order, ApiError>;

    async fn checkout(&self, delivery_address: &str) -> Result<Order, ApiError>;

    async fn cancel_order(&self, id: OrderId) -> Result<Order, ApiError>;

    async fn create_payment(
        &self,
        order: OrderId,
        provider: PaymentProvider,
    ) -> Result<Payment, ApiError>;

    async fn list_payments(&self) -> Result<Vec<Payment>, ApiError>;

    async fn get_payment(&self, payment_id: &str) -> Result<Payment, ApiError>;

    async fn upload_prescription(
        &self,
        upload: &PrescriptionUpload,
    ) -> Result<Prescription, ApiError>;

    async fn list_prescriptions(&self) -> Result<Vec<Prescription>, ApiError>;

    async fn get_prescription(&self, id: PrescriptionId) -> Result<Prescription, ApiError>;

    /// Fetches the dashboard served for `role`.
    async fn dashboard(&self, role: Role) -> Result<Dashboard, ApiError>;
}
