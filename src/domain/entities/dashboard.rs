//! Role-specific dashboard payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named sections, each a map of metric name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(flatten)]
    pub sections: BTreeMap<String, Value>,
}

impl Dashboard {
    /// Flattens a section into printable `(metric, value)` rows.
    ///
    /// Scalar sections become a single row keyed by the section name.
    #[must_use]
    pub fn rows(&self, section: &str) -> Vec<(String, String)> {
        match self.sections.get(section) {
            Some(Value::Object(map)) => map
                .iter()
                .map(|(key, value)| (humanize(key), render_value(value)))
                .collect(),
            Some(value) => vec![(humanize(section), render_value(value))],
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.keys().map(String::as_str).collect()
    }
}

/// Turns `order_summary` into `Order summary`.
#[must_use]
pub fn humanize(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("{} entries", items.len()),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| format!("{k}: {}", render_value(v)))
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_dashboard_rows() {
        let json = r#"{
            "order_summary": {"total_orders": 4, "active_orders": 1, "total_spent": "52000.00"},
            "prescription_summary": {"pending": 0, "approved": 2},
            "purchase_stats": {"favorite_category": null}
        }"#;

        let dashboard: Dashboard = serde_json::from_str(json).unwrap();
        assert_eq!(
            dashboard.section_names(),
            vec!["order_summary", "prescription_summary", "purchase_stats"]
        );

        let rows = dashboard.rows("order_summary");
        assert!(rows.contains(&("Total orders".to_string(), "4".to_string())));
        assert!(rows.contains(&("Total spent".to_string(), "52000.00".to_string())));

        let stats = dashboard.rows("purchase_stats");
        assert_eq!(stats, vec![("Favorite category".to_string(), "-".to_string())]);
    }

    #[test]
    fn test_scalar_section() {
        let dashboard: Dashboard = serde_json::from_str(r#"{"today_deliveries": 3}"#).unwrap();
        assert_eq!(
            dashboard.rows("today_deliveries"),
            vec![("Today deliveries".to_string(), "3".to_string())]
        );
        assert!(dashboard.rows("missing").is_empty());
    }
}
