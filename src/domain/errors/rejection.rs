//! Typed view over backend rejection bodies.

use std::collections::BTreeMap;

use serde_json::Value;

pub const REGISTRATION_FALLBACK: &str = "Registration failed";
pub const VERIFICATION_FALLBACK: &str = "Invalid or expired code";
pub const LOGIN_FALLBACK: &str = "Login failed. Check your phone number and password.";
pub const UNVERIFIED_PHONE: &str = "Phone number is not verified. Please register first.";

/// Known shapes of a non-2xx response body.
///
/// The backend mixes a top-level `errors` map, plain `error`, `message`
/// and `detail` strings, and field errors nested under `data`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionBody {
    pub errors: BTreeMap<String, Vec<String>>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub detail: Option<String>,
    pub data: BTreeMap<String, Vec<String>>,
}

impl RejectionBody {
    /// Parses raw response text; non-JSON bodies yield an empty rejection.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str::<Value>(raw)
            .map(|value| Self::from_value(&value))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(map) = value else {
            return Self::default();
        };

        Self {
            errors: map.get("errors").map(field_errors).unwrap_or_default(),
            error: map.get("error").and_then(text),
            message: map.get("message").and_then(text),
            detail: map.get("detail").and_then(text),
            data: map.get("data").map(field_errors).unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// First message nested under `data.<field>`.
    #[must_use]
    pub fn data_field(&self, field: &str) -> Option<&str> {
        self.data
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// All `errors` messages flattened and joined with ", ".
    #[must_use]
    pub fn joined_errors(&self) -> Option<String> {
        let joined = self
            .errors
            .values()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        (!joined.is_empty()).then_some(joined)
    }

    #[must_use]
    pub fn registration_message(&self) -> String {
        self.joined_errors()
            .or_else(|| self.error.clone())
            .or_else(|| self.message.clone())
            .or_else(|| self.detail.clone())
            .unwrap_or_else(|| REGISTRATION_FALLBACK.to_string())
    }

    #[must_use]
    pub fn verification_message(&self) -> String {
        self.data_field("code")
            .or(self.detail.as_deref())
            .unwrap_or(VERIFICATION_FALLBACK)
            .to_string()
    }

    /// Login failure text; unverified-phone rejections get a fixed hint.
    #[must_use]
    pub fn login_message(&self) -> String {
        let message = self
            .data_field("phone_number")
            .or_else(|| self.data_field("detail"))
            .or(self.detail.as_deref())
            .unwrap_or(LOGIN_FALLBACK);

        if mentions_unverified(message) {
            UNVERIFIED_PHONE.to_string()
        } else {
            message.to_string()
        }
    }

    /// Most specific message available, for operations without a dedicated chain.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        self.detail
            .clone()
            .or_else(|| self.error.clone())
            .or_else(|| self.joined_errors())
            .or_else(|| self.message.clone())
    }
}

fn mentions_unverified(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("tasdiq") || lower.contains("not verified")
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(text),
        _ => None,
    }
}

fn messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().flat_map(messages).collect(),
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(|s| vec![s.to_string()])
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn field_errors(value: &Value) -> BTreeMap<String, Vec<String>> {
    let Value::Object(map) = value else {
        return BTreeMap::new();
    };

    map.iter()
        .map(|(field, value)| (field.clone(), messages(value)))
        .filter(|(_, messages)| !messages.is_empty())
        .collect()
}
