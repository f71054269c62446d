//! Pharmacy account entity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account role, which selects the dashboard the backend serves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    #[default]
    Customer,
    Admin,
    Operator,
    Courier,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::Operator => "operator",
            Self::Courier => "courier",
        }
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Self::Admin,
            "operator" => Self::Operator,
            "courier" => Self::Courier,
            _ => Self::Customer,
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    id: UserId,
    phone_number: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    role: Role,
    #[serde(default)]
    is_verified: bool,
}

impl User {
    #[must_use]
    pub fn new(
        id: u64,
        phone_number: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: UserId(id),
            phone_number: phone_number.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            address: None,
            role,
            is_verified: true,
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    #[must_use]
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    #[must_use]
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    #[must_use]
    pub const fn is_verified(&self) -> bool {
        self.is_verified
    }

    /// Returns "First Last", or the phone number when both names are blank.
    #[must_use]
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.phone_number.clone()
        } else {
            full.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_profile() {
        let json = r#"{
            "id": 7,
            "phone_number": "+998901234567",
            "first_name": "Ali",
            "last_name": "Valiyev",
            "address": null,
            "role": "courier",
            "is_verified": true
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id(), UserId(7));
        assert_eq!(user.role(), Role::Courier);
        assert_eq!(user.display_name(), "Ali Valiyev");
        assert!(user.address().is_none());
    }

    #[test]
    fn test_unknown_role_is_customer() {
        let json = r#"{"id": 1, "phone_number": "+998901234567", "role": "pharmacist"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role(), Role::Customer);
    }

    #[test]
    fn test_display_name_falls_back_to_phone() {
        let user = User::new(1, "+998901234567", " ", "", Role::Customer);
        assert_eq!(user.display_name(), "+998901234567");
    }

    #[test]
    fn test_role_round_trips_through_toml() {
        let user = User::new(3, "+998901234567", "Ali", "Valiyev", Role::Admin);
        let encoded = toml::to_string(&user).unwrap();
        assert!(encoded.contains("role = \"admin\""));
        let decoded: User = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded, user);
    }
}
