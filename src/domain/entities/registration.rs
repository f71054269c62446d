//! Pending registration held between form submission and OTP success.

use std::fmt;

use zeroize::Zeroize;

use super::phone::PhoneNumber;

/// Registration payload kept in memory for code resends. Never persisted.
#[derive(Clone)]
pub struct RegistrationDraft {
    pub phone: PhoneNumber,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl RegistrationDraft {
    #[must_use]
    pub fn new(
        phone: PhoneNumber,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            phone,
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl Drop for RegistrationDraft {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

impl fmt::Debug for RegistrationDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationDraft")
            .field("phone", &self.phone)
            .field("password", &"***")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_password() {
        let draft = RegistrationDraft::new(
            PhoneNumber::parse("+998901234567").unwrap(),
            "secret1",
            "Ali",
            "Valiyev",
        );
        let debug = format!("{draft:?}");
        assert!(!debug.contains("secret1"));
        assert!(debug.contains("+998901234567"));
    }
}
