//! Prescription records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrescriptionId(pub u64);

impl std::fmt::Display for PrescriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    Pending,
    Approved,
    Rejected,
}

impl PrescriptionStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Under review",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionImage {
    pub id: u64,
    pub image: String,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Medicine line the reviewing operator attached to a prescription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrescriptionItem {
    pub id: u64,
    #[serde(default)]
    pub product: Option<u64>,
    #[serde(rename = "dori_nomi", default)]
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: PrescriptionId,
    pub status: PrescriptionStatus,
    #[serde(rename = "holat_nomi", default)]
    pub status_label: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reviewed_at: Option<DateTime<Utc>>,
    #[serde(rename = "rasmlar", default)]
    pub images: Vec<PrescriptionImage>,
    #[serde(rename = "dorilar", default)]
    pub items: Vec<PrescriptionItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_field_names() {
        let json = r#"{
            "id": 9,
            "holat_nomi": "Rad etildi",
            "status": "rejected",
            "rejection_reason": "Image is unreadable",
            "created_at": "2025-02-01T10:30:00Z",
            "reviewed_at": null,
            "rasmlar": [{"id": 1, "image": "/media/p/1.jpg", "uploaded_at": "2025-02-01T10:30:00Z"}],
            "dorilar": [{"id": 3, "product": 12, "dori_nomi": "Amoxicillin", "quantity": 2}]
        }"#;

        let prescription: Prescription = serde_json::from_str(json).unwrap();
        assert_eq!(prescription.status, PrescriptionStatus::Rejected);
        assert_eq!(prescription.images.len(), 1);
        assert_eq!(prescription.items[0].name, "Amoxicillin");
        assert_eq!(
            prescription.rejection_reason.as_deref(),
            Some("Image is unreadable")
        );
    }
}
