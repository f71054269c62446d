//! Authentication form DTOs.

use zeroize::Zeroize;

use crate::domain::entities::{PhoneNumber, RegistrationDraft};
use crate::domain::errors::ValidationErrors;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Field keys used in [`ValidationErrors`].
pub mod fields {
    pub const PHONE: &str = "phone";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirm_password";
    pub const FIRST_NAME: &str = "first_name";
    pub const LAST_NAME: &str = "last_name";
    pub const CODE: &str = "code";
}

fn validate_phone(raw: &str, errors: &mut ValidationErrors) -> Option<PhoneNumber> {
    if raw.trim().is_empty() {
        errors.add(fields::PHONE, "Phone number is required");
        return None;
    }
    let phone = PhoneNumber::parse(raw);
    if phone.is_none() {
        errors.add(fields::PHONE, "Format: +998XXXXXXXXX");
    }
    phone
}

fn validate_password(password: &str, errors: &mut ValidationErrors) {
    if password.is_empty() {
        errors.add(fields::PASSWORD, "Password is required");
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            fields::PASSWORD,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
}

/// Login form contents.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub phone: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn new(phone: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            phone: phone.into(),
            password: password.into(),
        }
    }

    /// Checks the form before any request is sent.
    ///
    /// # Errors
    /// Returns field-scoped messages for every failing field.
    pub fn validate(&self) -> Result<PhoneNumber, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let phone = validate_phone(&self.phone, &mut errors);
        validate_password(&self.password, &mut errors);
        match phone {
            Some(phone) => errors.into_result(phone),
            None => Err(errors),
        }
    }
}

impl Drop for LoginForm {
    fn drop(&mut self) {
        self.password.zeroize();
    }
}

/// Registration form contents.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Validates the form into a draft ready to send.
    ///
    /// # Errors
    /// Returns field-scoped messages; nothing may be dispatched in that case.
    pub fn validate(&self) -> Result<RegistrationDraft, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.first_name.trim().is_empty() {
            errors.add(fields::FIRST_NAME, "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.add(fields::LAST_NAME, "Last name is required");
        }
        let phone = validate_phone(&self.phone, &mut errors);
        validate_password(&self.password, &mut errors);
        if self.confirm_password.is_empty() {
            errors.add(fields::CONFIRM_PASSWORD, "Confirm your password");
        } else if self.confirm_password != self.password {
            errors.add(fields::CONFIRM_PASSWORD, "Passwords do not match");
        }

        let Some(phone) = phone else {
            return Err(errors);
        };
        errors.into_result(RegistrationDraft::new(
            phone,
            self.password.clone(),
            self.first_name.trim(),
            self.last_name.trim(),
        ))
    }
}

impl Drop for RegistrationForm {
    fn drop(&mut self) {
        self.password.zeroize();
        self.confirm_password.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn form() -> RegistrationForm {
        RegistrationForm {
            first_name: "Ali".to_string(),
            last_name: "Valiyev".to_string(),
            phone: "+998901234567".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_valid_registration() {
        let draft = form().validate().unwrap();
        assert_eq!(draft.phone.as_str(), "+998901234567");
        assert_eq!(draft.password, "secret1");
        assert_eq!(draft.first_name, "Ali");
    }

    #[test_case("901234567" ; "missing country code")]
    #[test_case("+99890123456" ; "too short")]
    #[test_case("+7901234567" ; "foreign prefix")]
    #[test_case("+998 90 123 45 67" ; "spaces")]
    #[test_case("+998٩٠١٢٣٤٥٦٧" ; "arabic indic digits")]
    #[test_case("+998９０１２３４５６７" ; "fullwidth digits")]
    fn test_bad_phone_is_field_error(phone: &str) {
        let mut form = form();
        form.phone = phone.to_string();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains(fields::PHONE));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_phone_format_hint() {
        let mut form = form();
        form.phone = "12".to_string();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(fields::PHONE), Some("Format: +998XXXXXXXXX"));
    }

    #[test]
    fn test_password_rules() {
        let mut short = form();
        short.password = "abc".to_string();
        short.confirm_password = "abc".to_string();
        assert!(short.validate().unwrap_err().contains(fields::PASSWORD));

        let mut mismatch = form();
        mismatch.confirm_password = "secret2".to_string();
        let errors = mismatch.validate().unwrap_err();
        assert_eq!(errors.get(fields::CONFIRM_PASSWORD), Some("Passwords do not match"));
    }

    #[test]
    fn test_blank_names() {
        let mut form = form();
        form.first_name = "  ".to_string();
        form.last_name = String::new();
        let errors = form.validate().unwrap_err();
        assert!(errors.contains(fields::FIRST_NAME));
        assert!(errors.contains(fields::LAST_NAME));
    }

    #[test]
    fn test_login_form() {
        assert!(LoginForm::new("+998901234567", "secret1").validate().is_ok());
        let errors = LoginForm::new("", "").validate().unwrap_err();
        assert_eq!(errors.get(fields::PHONE), Some("Phone number is required"));
        assert_eq!(errors.get(fields::PASSWORD), Some("Password is required"));
    }
}
