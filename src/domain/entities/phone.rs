//! Uzbek mobile phone number.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Phone number in the national `+998XXXXXXXXX` format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Example shown as input placeholder.
    pub const EXAMPLE: &'static str = "+998901234567";

    /// Parses a phone number, rejecting anything outside the national format.
    ///
    /// # Panics
    ///
    /// Panics if the internal regex is invalid.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| Regex::new(r"^\+998[0-9]{9}$").expect("Invalid regex"));

        let value = value.trim();
        re.is_match(value).then(|| Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("+998901234567" ; "canonical")]
    #[test_case(" +998947077178 " ; "surrounding whitespace")]
    fn test_accepts(value: &str) {
        assert!(PhoneNumber::parse(value).is_some());
    }

    #[test_case("" ; "empty")]
    #[test_case("998901234567" ; "missing plus")]
    #[test_case("901234567" ; "local digits only")]
    #[test_case("+99890123456" ; "too short")]
    #[test_case("+9989012345678" ; "too long")]
    #[test_case("+998 90 123 45 67" ; "spaced")]
    #[test_case("+7901234567a" ; "foreign prefix")]
    #[test_case("+998٩٠١٢٣٤٥٦٧" ; "arabic indic digits")]
    #[test_case("+998９０１２３４５６７" ; "fullwidth digits")]
    #[test_case("+998९०१२३४५६७" ; "devanagari digits")]
    fn test_rejects(value: &str) {
        assert!(PhoneNumber::parse(value).is_none());
    }
}
