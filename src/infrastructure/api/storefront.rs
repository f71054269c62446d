//! Catalog, cart, order, payment, prescription and dashboard endpoints.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::{debug, warn};

use super::client::ApiClient;
use super::dto::{
    AddToCartRequest, CartDto, CheckoutRequest, CreatePaymentRequest, Listing, QuantityRequest,
};
use crate::domain::entities::{
    Cart, CartItemId, Category, Dashboard, Order, OrderId, Payment, PaymentProvider, Prescription,
    PrescriptionId, Product, ProductId, ProductQuery, Role,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::{PrescriptionUpload, StorefrontPort};

const PRODUCTS: &str = "/v1/products/products/";
const CATEGORIES: &str = "/v1/products/categories/";
const CART: &str = "/v3/orders/cart/";
const ORDERS: &str = "/v3/orders/";
const PAYMENTS: &str = "/v6/payments/";
const PRESCRIPTIONS: &str = "/v7/prescriptions/";

impl ApiClient {
    async fn cart_from(&self, request: reqwest::RequestBuilder) -> Result<Cart, ApiError> {
        let dto: CartDto = self.fetch(request).await?;
        Cart::try_from(dto)
    }

    async fn listing<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let listing: Listing<T> = self.fetch(self.get(path)).await?;
        Ok(listing.into_vec())
    }
}

#[async_trait]
impl StorefrontPort for ApiClient {
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, ApiError> {
        let listing: Listing<Product> =
            self.fetch(self.get(PRODUCTS).query(&query.to_params())).await?;
        Ok(listing.into_vec())
    }

    async fn get_product(&self, id: ProductId) -> Result<Product, ApiError> {
        self.fetch(self.get(&format!("{PRODUCTS}{id}/"))).await
    }

    async fn list_alternatives(&self, id: ProductId) -> Result<Vec<Product>, ApiError> {
        self.listing(&format!("{PRODUCTS}{id}/alternatives/")).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.listing(CATEGORIES).await
    }

    async fn get_cart(&self) -> Result<Cart, ApiError> {
        self.cart_from(self.get(CART)).await
    }

    async fn add_to_cart(&self, product: ProductId, quantity: u32) -> Result<Cart, ApiError> {
        debug!(product = %product, quantity, "Adding to cart");
        let body = AddToCartRequest {
            product_id: product,
            quantity,
        };
        self.cart_from(self.post(&format!("{CART}add/")).json(&body))
            .await
    }

    async fn update_cart_item(&self, item: CartItemId, quantity: u32) -> Result<Cart, ApiError> {
        debug!(item = %item, quantity, "Updating cart line");
        self.cart_from(
            self.patch(&format!("{CART}{item}/"))
                .json(&QuantityRequest { quantity }),
        )
        .await
    }

    async fn remove_cart_item(&self, item: CartItemId) -> Result<Cart, ApiError> {
        debug!(item = %item, "Removing cart line");
        self.cart_from(self.delete(&format!("{CART}{item}/"))).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        self.listing(ORDERS).await
    }

    async fn get_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.fetch(self.get(&format!("{ORDERS}{id}/"))).await
    }

    async fn checkout(&self, delivery_address: &str) -> Result<Order, ApiError> {
        self.fetch_json(
            self.post(&format!("{ORDERS}checkout/")),
            &CheckoutRequest { delivery_address },
        )
        .await
    }

    async fn cancel_order(&self, id: OrderId) -> Result<Order, ApiError> {
        self.fetch(self.post(&format!("{ORDERS}{id}/cancel/"))).await
    }

    async fn create_payment(
        &self,
        order: OrderId,
        provider: PaymentProvider,
    ) -> Result<Payment, ApiError> {
        debug!(order = %order, provider = provider.label(), "Creating payment");
        self.fetch_json(
            self.post(&format!("{PAYMENTS}create/")),
            &CreatePaymentRequest {
                order_id: order,
                provider,
            },
        )
        .await
    }

    async fn list_payments(&self) -> Result<Vec<Payment>, ApiError> {
        self.listing(PAYMENTS).await
    }

    async fn get_payment(&self, payment_id: &str) -> Result<Payment, ApiError> {
        self.fetch(self.get(&format!("{PAYMENTS}{payment_id}/"))).await
    }

    async fn upload_prescription(
        &self,
        upload: &PrescriptionUpload,
    ) -> Result<Prescription, ApiError> {
        let mut form = Form::new().text("order_id", upload.order_id.to_string());
        for path in &upload.images {
            form = form.part("images", image_part(path).await?);
        }

        debug!(order = %upload.order_id, images = upload.images.len(), "Uploading prescription");
        self.fetch(self.post(PRESCRIPTIONS).multipart(form)).await
    }

    async fn list_prescriptions(&self) -> Result<Vec<Prescription>, ApiError> {
        self.listing(PRESCRIPTIONS).await
    }

    async fn get_prescription(&self, id: PrescriptionId) -> Result<Prescription, ApiError> {
        self.fetch(self.get(&format!("{PRESCRIPTIONS}{id}/"))).await
    }

    async fn dashboard(&self, role: Role) -> Result<Dashboard, ApiError> {
        self.fetch(self.get(&format!("/v8/dashboard/{}/", role.as_str())))
            .await
    }
}

async fn image_part(path: &Path) -> Result<Part, ApiError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to read prescription image");
        ApiError::storage(format!("cannot read {}: {e}", path.display()))
    })?;

    let file_name = path
        .file_name()
        .map_or_else(|| "image".to_string(), |n| n.to_string_lossy().into_owned());

    Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(image_mime(path))
        .map_err(|e| ApiError::unexpected(format!("invalid image part: {e}")))
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(&PathBuf::from("scan.JPG")), "image/jpeg");
        assert_eq!(image_mime(&PathBuf::from("a/b/rx.png")), "image/png");
        assert_eq!(image_mime(&PathBuf::from("rx")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_missing_image_is_storage_error() {
        let err = image_part(Path::new("/nonexistent/dorixona/rx.png"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Storage { .. }));
    }
}
