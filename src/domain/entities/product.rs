//! Catalog entities.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveSubstance {
    pub id: u64,
    pub name: String,
}

/// Product as listed in the catalog; detail-only fields are empty on list fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_prescription_required: bool,
    #[serde(default = "default_available")]
    pub is_available: bool,
    #[serde(default)]
    pub category: Option<Category>,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub manufacturer: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub active_substances: Vec<ActiveSubstance>,
}

const fn default_available() -> bool {
    true
}

impl Product {
    #[must_use]
    pub fn category_id(&self) -> Option<CategoryId> {
        self.category.as_ref().map(|c| c.id)
    }

    #[must_use]
    pub fn category_name(&self) -> &str {
        self.category.as_ref().map_or("", |c| c.name.as_str())
    }
}

/// Catalog list filter forwarded as query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<CategoryId>,
}

impl ProductQuery {
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(category) = self.category {
            params.push(("category", category.0.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_list_item_deserializes_with_string_price() {
        let json = r#"{
            "id": 12,
            "name": "Paracetamol 500mg",
            "slug": "paracetamol-500mg",
            "price": "12500.00",
            "image": null,
            "is_prescription_required": false,
            "is_available": true,
            "category": {"id": 2, "name": "Analgesics", "slug": "analgesics"}
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::from_str("12500").unwrap());
        assert_eq!(product.category_id(), Some(CategoryId(2)));
        assert!(product.active_substances.is_empty());
    }

    #[test]
    fn test_detail_fields() {
        let json = r#"{
            "id": 12,
            "name": "Amoxicillin",
            "price": 30000,
            "is_prescription_required": true,
            "manufacturer": "Nobel",
            "stock": 40,
            "expiry_date": "2027-03-01",
            "active_substances": [{"id": 1, "name": "amoxicillin"}]
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.is_available);
        assert_eq!(product.manufacturer.as_deref(), Some("Nobel"));
        assert_eq!(product.active_substances.len(), 1);
        assert_eq!(product.category_name(), "");
    }

    #[test]
    fn test_query_params_skip_blank_search() {
        let query = ProductQuery {
            search: Some("   ".to_string()),
            category: Some(CategoryId(4)),
        };
        assert_eq!(query.to_params(), vec![("category", "4".to_string())]);
    }
}
