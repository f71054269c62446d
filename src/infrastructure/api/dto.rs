//! Wire formats for the pharmacy REST API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::{
    AuthGrant, AuthToken, Cart, CartItem, CartItemId, CartProduct, OrderId, PaymentProvider,
    ProductId, TokenPair, User,
};
use crate::domain::errors::ApiError;

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub phone_number: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct VerifyRequest<'a> {
    pub phone_number: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub phone_number: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct QuantityRequest {
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
pub struct CheckoutRequest<'a> {
    pub delivery_address: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CreatePaymentRequest {
    pub order_id: OrderId,
    pub provider: PaymentProvider,
}

/// `{access, refresh, user}` issued by login and verification.
#[derive(Deserialize)]
pub struct TokenGrantResponse {
    pub access: String,
    pub refresh: String,
    pub user: User,
}

impl TryFrom<TokenGrantResponse> for AuthGrant {
    type Error = ApiError;

    fn try_from(response: TokenGrantResponse) -> Result<Self, Self::Error> {
        let access = AuthToken::new(response.access)
            .ok_or_else(|| ApiError::unexpected("backend issued a malformed access token"))?;
        let refresh = AuthToken::new(response.refresh)
            .ok_or_else(|| ApiError::unexpected("backend issued a malformed refresh token"))?;

        Ok(Self {
            tokens: TokenPair::new(access, refresh),
            user: response.user,
        })
    }
}

/// List endpoints answer with a bare array or a paginated `{results}` page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Bare(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Paged { results: items } => items,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NestedProductDto {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
}

/// Cart line in either the flat `product_*` or the nested `product` shape.
#[derive(Debug, Deserialize)]
pub struct CartItemDto {
    pub id: CartItemId,
    pub quantity: u32,
    #[serde(default)]
    pub product: Option<NestedProductDto>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_price: Option<Decimal>,
}

impl TryFrom<CartItemDto> for CartItem {
    type Error = ApiError;

    fn try_from(dto: CartItemDto) -> Result<Self, Self::Error> {
        let product = match dto.product {
            Some(nested) => CartProduct {
                id: nested.id,
                name: nested.name,
                price: nested.price,
            },
            None => CartProduct {
                id: dto.product_id.ok_or_else(|| {
                    ApiError::unexpected(format!("cart line {} has no product", dto.id))
                })?,
                name: dto.product_name.unwrap_or_default(),
                price: dto.product_price.unwrap_or_default(),
            },
        };

        Ok(Self {
            id: dto.id,
            product,
            quantity: dto.quantity,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CartDto {
    #[serde(default)]
    pub items: Vec<CartItemDto>,
}

impl TryFrom<CartDto> for Cart {
    type Error = ApiError;

    fn try_from(dto: CartDto) -> Result<Self, Self::Error> {
        dto.items
            .into_iter()
            .map(CartItem::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(Cart::new)
    }
}

/// Strips the `{message, data}` envelope; other bodies pass through.
#[must_use]
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map)
            if map.contains_key("data")
                && map.keys().all(|k| matches!(k.as_str(), "message" | "data")) =>
        {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope() {
        let body = json!({"message": "Tasdiqlandi", "data": {"access": "a"}});
        assert_eq!(unwrap_envelope(body), json!({"access": "a"}));

        let bare = json!({"id": 1, "data": "keep", "name": "x"});
        assert_eq!(unwrap_envelope(bare.clone()), bare);

        let list = json!([1, 2]);
        assert_eq!(unwrap_envelope(list.clone()), list);
    }

    #[test]
    fn test_listing_shapes() {
        let bare: Listing<u32> = serde_json::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(bare.into_vec(), vec![1, 2, 3]);

        let paged: Listing<u32> =
            serde_json::from_value(json!({"count": 2, "next": null, "results": [4, 5]})).unwrap();
        assert_eq!(paged.into_vec(), vec![4, 5]);
    }

    #[test]
    fn test_cart_flat_and_nested_lines() {
        let dto: CartDto = serde_json::from_value(json!({
            "id": 1,
            "items": [
                {"id": 10, "product_id": 3, "product_name": "A", "product_price": "1000.00", "quantity": 2, "subtotal": "2000.00"},
                {"id": 11, "product": {"id": 4, "name": "B", "price": 2000}, "quantity": 3}
            ],
            "total_price": "8000.00",
            "total_items": 5,
            "is_empty": false
        }))
        .unwrap();

        let cart = Cart::try_from(dto).unwrap();
        assert_eq!(cart.total(), Decimal::from(8000));
        assert_eq!(cart.items[1].product.name, "B");
    }

    #[test]
    fn test_cart_line_without_product_is_rejected() {
        let dto: CartDto =
            serde_json::from_value(json!({"items": [{"id": 1, "quantity": 1}]})).unwrap();
        assert!(Cart::try_from(dto).is_err());
    }

    #[test]
    fn test_grant_rejects_malformed_tokens() {
        let response: TokenGrantResponse = serde_json::from_value(json!({
            "access": "not-a-jwt",
            "refresh": "a.b.c",
            "user": {"id": 1, "phone_number": "+998901234567"}
        }))
        .unwrap();
        assert!(AuthGrant::try_from(response).is_err());
    }
}
