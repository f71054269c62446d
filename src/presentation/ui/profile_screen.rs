//! Editable profile of the signed-in user.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::intent::Intent;
use crate::application::dto::ProfileForm;
use crate::application::dto::auth_dto::fields::{FIRST_NAME, LAST_NAME, PHONE};
use crate::domain::User;
use crate::domain::errors::ValidationErrors;
use crate::presentation::widgets::{Form, TextInput};

const ADDRESS: &str = "address";

pub struct ProfileScreen {
    form: Form,
    role: Option<&'static str>,
    saving: bool,
}

impl ProfileScreen {
    #[must_use]
    pub fn new(user: Option<&User>) -> Self {
        let mut screen = Self {
            form: Form::new(vec![
                (FIRST_NAME, TextInput::new("First name")),
                (LAST_NAME, TextInput::new("Last name")),
                (ADDRESS, TextInput::new("Address")),
                (PHONE, TextInput::new("Phone").read_only()),
            ]),
            role: None,
            saving: false,
        };
        if let Some(user) = user {
            screen.load(user);
        }
        screen
    }

    /// Replaces every field with the user's current values.
    pub fn load(&mut self, user: &User) {
        self.form.set_value(FIRST_NAME, user.first_name());
        self.form.set_value(LAST_NAME, user.last_name());
        self.form.set_value(ADDRESS, user.address().unwrap_or_default());
        self.form.set_value(PHONE, user.phone_number());
        self.role = Some(user.role().as_str());
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn saved(&mut self, user: &User) {
        self.saving = false;
        self.form.clear_errors();
        self.load(user);
    }

    pub fn set_validation_errors(&mut self, errors: &ValidationErrors) {
        self.saving = false;
        self.form.apply_errors(errors);
    }

    pub const fn failed(&mut self) {
        self.saving = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Intent {
        if key.code == KeyCode::Esc {
            return Intent::Unhandled;
        }
        if self.saving {
            return Intent::None;
        }
        if key.code == KeyCode::Enter {
            self.form.clear_errors();
            self.saving = true;
            return Intent::SaveProfile(ProfileForm {
                first_name: self.form.value(FIRST_NAME).to_string(),
                last_name: self.form.value(LAST_NAME).to_string(),
                address: self.form.value(ADDRESS).to_string(),
            });
        }
        self.form.handle_key(key);
        Intent::None
    }

    #[must_use]
    pub const fn hints() -> &'static [(&'static str, &'static str)] {
        &[("Tab", "Next field"), ("Enter", "Save"), ("Esc", "Back")]
    }
}

impl Widget for &ProfileScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [role_area, form_area, status_area, _] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(self.form.height()),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        if let Some(role) = self.role {
            Paragraph::new(Line::from(vec![
                Span::styled("Role: ", Style::default().fg(Color::DarkGray)),
                Span::styled(role, Style::default().fg(Color::Cyan)),
            ]))
            .render(role_area, buf);
        }

        (&self.form).render(form_area, buf);

        if self.saving {
            Paragraph::new(Line::styled(
                "Saving...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
            .render(status_area, buf);
        }
    }
}
