//! Order entities and the status-driven action set.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OrderId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().trim_start_matches('#').parse().map(Self)
    }
}

/// Order lifecycle states; transitions are owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Draft,
    AwaitingPrescription,
    AwaitingPayment,
    Paid,
    Preparing,
    ReadyForDelivery,
    OnTheWay,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Created",
            Self::AwaitingPrescription => "Awaiting prescription",
            Self::AwaitingPayment => "Awaiting payment",
            Self::Paid => "Paid",
            Self::Preparing => "Preparing",
            Self::ReadyForDelivery => "Ready for delivery",
            Self::OnTheWay => "On the way",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Actions the client offers for an order in this status.
    #[must_use]
    pub fn available_actions(self) -> Vec<OrderAction> {
        let mut actions = Vec::new();
        match self {
            Self::AwaitingPrescription => actions.push(OrderAction::UploadPrescription),
            Self::AwaitingPayment => actions.push(OrderAction::Pay),
            _ => {}
        }
        if self.is_cancellable() {
            actions.push(OrderAction::Cancel);
        }
        actions
    }

    #[must_use]
    pub const fn is_cancellable(self) -> bool {
        matches!(
            self,
            Self::Draft | Self::AwaitingPrescription | Self::AwaitingPayment
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    UploadPrescription,
    Pay,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: u64,
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
}

impl OrderItem {
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.subtotal
            .unwrap_or_else(|| self.price * Decimal::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub status: OrderStatus,
    #[serde(default)]
    pub total_price: Decimal,
    #[serde(default)]
    pub delivery_address: String,
    #[serde(default)]
    pub needs_prescription: bool,
    #[serde(default)]
    pub items_count: Option<u32>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items_count.unwrap_or_else(|| {
            self.items
                .iter()
                .fold(0u32, |count, i| count.saturating_add(i.quantity))
        })
    }
}
