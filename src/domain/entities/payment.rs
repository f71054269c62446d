//! Payment records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::order::OrderId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProvider {
    Click,
    Payme,
    Cash,
}

impl PaymentProvider {
    /// Providers a customer may request from the client.
    pub const ONLINE: [Self; 2] = [Self::Click, Self::Payme];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Click => "Click",
            Self::Payme => "Payme",
            Self::Cash => "Cash",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Success,
    Failed,
    Cancelled,
    Refunded,
}

impl PaymentStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Success => "Successful",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
            Self::Refunded => "Refunded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: u64,
    pub payment_id: String,
    pub order_id: OrderId,
    pub provider: PaymentProvider,
    pub status: PaymentStatus,
    pub amount: Decimal,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_payment() {
        let json = r#"{
            "id": 5,
            "payment_id": "PAY-8f2c",
            "order_id": 41,
            "user_phone": "+998901234567",
            "provider": "payme",
            "provider_display": "Payme",
            "status": "pending",
            "status_display": "Kutilmoqda",
            "amount": "8000.00",
            "click_trans_id": null,
            "payme_transaction_id": null,
            "error_message": null,
            "created_at": "2025-02-01T10:30:00Z",
            "completed_at": null
        }"#;

        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.provider, PaymentProvider::Payme);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.order_id, OrderId(41));
        assert!(payment.completed_at.is_none());
    }

    #[test]
    fn test_online_providers_exclude_cash() {
        assert!(!PaymentProvider::ONLINE.contains(&PaymentProvider::Cash));
    }
}
