//! Login screen.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::intent::Intent;
use crate::application::dto::LoginForm;
use crate::application::dto::auth_dto::fields;
use crate::domain::Route;
use crate::domain::entities::PhoneNumber;
use crate::domain::errors::ValidationErrors;
use crate::presentation::widgets::{Form, TextInput};

/// Phone and password sign-in.
pub struct LoginScreen {
    form: Form,
    submitting: bool,
    error_message: Option<String>,
}

impl LoginScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: Form::new(vec![
                (
                    fields::PHONE,
                    TextInput::new("Phone number").placeholder(PhoneNumber::EXAMPLE),
                ),
                (fields::PASSWORD, TextInput::new("Password").password()),
            ]),
            submitting: false,
            error_message: None,
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn set_validation_errors(&mut self, errors: &ValidationErrors) {
        self.submitting = false;
        self.form.apply_errors(errors);
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error_message = Some(message.into());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Intent {
        if key.code == KeyCode::Esc {
            return Intent::Unhandled;
        }
        if self.submitting {
            return Intent::None;
        }
        if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Intent::Navigate(Route::Register);
        }

        if key.code == KeyCode::Enter {
            self.form.clear_errors();
            self.error_message = None;
            self.submitting = true;
            return Intent::Login(LoginForm::new(
                self.form.value(fields::PHONE),
                self.form.value(fields::PASSWORD),
            ));
        }

        if self.form.handle_key(key) {
            self.error_message = None;
        }
        Intent::None
    }

    #[must_use]
    pub const fn hints() -> &'static [(&'static str, &'static str)] {
        &[
            ("Tab", "Next field"),
            ("Enter", "Sign in"),
            ("Ctrl+R", "Register"),
            ("Esc", "Back"),
        ]
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &LoginScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(self.form.height() + 5),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, content_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ])
        .areas(center);

        Clear.render(content_area, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Sign in ");
        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let [title_area, form_area, _, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(self.form.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Paragraph::new("Sign in with your phone number").render(title_area, buf);
        (&self.form).render(form_area, buf);

        let status = if self.submitting {
            Line::styled(
                "Signing in...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )
        } else if let Some(message) = &self.error_message {
            Line::styled(message.as_str(), Style::default().fg(Color::Red))
        } else {
            Line::styled(
                "No account yet? Ctrl+R to register",
                Style::default().fg(Color::DarkGray),
            )
        };
        Paragraph::new(status).render(status_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut LoginScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_submit_carries_both_fields() {
        let mut screen = LoginScreen::new();
        type_text(&mut screen, "+998901234567");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "secret1");

        let Intent::Login(form) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected login intent");
        };
        assert_eq!(form.phone, "+998901234567");
        assert_eq!(form.password, "secret1");
        assert!(screen.is_submitting());
    }

    #[test]
    fn test_digits_are_typed_not_navigated() {
        let mut screen = LoginScreen::new();
        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('3'))),
            Intent::None
        ));
        assert_eq!(screen.form().value(fields::PHONE), "3");
    }

    #[test]
    fn test_keys_ignored_while_submitting() {
        let mut screen = LoginScreen::new();
        screen.handle_key(key(KeyCode::Enter));
        screen.handle_key(key(KeyCode::Char('9')));
        assert_eq!(screen.form().value(fields::PHONE), "");
    }

    #[test]
    fn test_validation_errors_reenable_form() {
        let mut screen = LoginScreen::new();
        screen.handle_key(key(KeyCode::Enter));
        screen.set_validation_errors(&ValidationErrors::single(
            fields::PASSWORD,
            "Password is required",
        ));
        assert!(!screen.is_submitting());
        assert_eq!(
            screen.form().field(fields::PASSWORD).and_then(TextInput::error),
            Some("Password is required")
        );
    }

    #[test]
    fn test_ctrl_r_opens_registration() {
        let mut screen = LoginScreen::new();
        let intent = screen.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert!(matches!(intent, Intent::Navigate(Route::Register)));
    }
}
