//! Focus-cycling group of text inputs.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::Widget,
};

use super::TextInput;
use crate::domain::errors::ValidationErrors;

/// Rows taken by one field.
pub const FIELD_HEIGHT: u16 = 3;

/// Ordered fields keyed by their validation field name.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<(&'static str, TextInput)>,
    focus: usize,
}

impl Form {
    #[must_use]
    pub fn new(fields: Vec<(&'static str, TextInput)>) -> Self {
        let mut form = Self { fields, focus: 0 };
        form.sync_focus();
        form
    }

    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.field(name).map_or("", TextInput::value)
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.field_mut(name) {
            field.set_value(value);
        }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&TextInput> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, f)| f)
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut TextInput> {
        self.fields
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| f)
    }

    #[must_use]
    pub fn focused(&self) -> Option<&'static str> {
        self.fields.get(self.focus).map(|(n, _)| *n)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
            self.sync_focus();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
            self.sync_focus();
        }
    }

    fn sync_focus(&mut self) {
        let focus = self.focus;
        for (i, (_, field)) in self.fields.iter_mut().enumerate() {
            field.set_focused(i == focus);
        }
    }

    /// Shows each field's message and moves focus to the first failing field.
    pub fn apply_errors(&mut self, errors: &ValidationErrors) {
        for (name, field) in &mut self.fields {
            field.set_error(errors.get(name).map(str::to_string));
        }
        if let Some(first) = self.fields.iter().position(|(_, f)| f.error().is_some()) {
            self.focus = first;
            self.sync_focus();
        }
    }

    pub fn clear_errors(&mut self) {
        for (_, field) in &mut self.fields {
            field.set_error(None);
        }
    }

    /// Tab cycling plus editing of the focused field.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                true
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                true
            }
            _ => self
                .fields
                .get_mut(self.focus)
                .is_some_and(|(_, field)| field.handle_key(key)),
        }
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        u16::try_from(self.fields.len())
            .unwrap_or(u16::MAX)
            .saturating_mul(FIELD_HEIGHT)
    }
}

impl Widget for &Form {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = Layout::vertical(
            self.fields
                .iter()
                .map(|_| Constraint::Length(FIELD_HEIGHT)),
        )
        .split(area);

        for ((_, field), row) in self.fields.iter().zip(rows.iter()) {
            field.render(*row, buf);
        }
    }
}
