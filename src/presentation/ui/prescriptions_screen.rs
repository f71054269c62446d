//! Uploaded prescriptions and the upload form.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::intent::Intent;
use super::utils::{
    clamp_selection, format_datetime, prescription_status_color, select_next, select_prev,
};
use crate::application::dto::PrescriptionForm;
use crate::application::dto::storefront_dto::fields::{IMAGES, ORDER_ID};
use crate::domain::entities::{MAX_PRESCRIPTION_IMAGES, Prescription};
use crate::presentation::widgets::{Form, TextInput};

pub struct PrescriptionsScreen {
    prescriptions: Vec<Prescription>,
    list: ListState,
    form: Option<Form>,
    loading: bool,
    uploading: bool,
}

impl PrescriptionsScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prescriptions: Vec::new(),
            list: ListState::default(),
            form: None,
            loading: true,
            uploading: false,
        }
    }

    #[must_use]
    pub const fn is_form_open(&self) -> bool {
        self.form.is_some()
    }

    pub fn set_prescriptions(&mut self, prescriptions: Vec<Prescription>) {
        self.loading = false;
        self.prescriptions = prescriptions;
        clamp_selection(&mut self.list, self.prescriptions.len());
    }

    pub const fn failed(&mut self) {
        self.loading = false;
    }

    /// Swaps in the full record fetched for a list entry.
    pub fn set_detail(&mut self, prescription: Prescription) {
        if let Some(entry) = self
            .prescriptions
            .iter_mut()
            .find(|p| p.id == prescription.id)
        {
            *entry = prescription;
        }
    }

    pub fn upload_finished(&mut self, success: bool) {
        self.uploading = false;
        if success {
            self.form = None;
        }
    }

    fn open_form() -> Form {
        Form::new(vec![
            (ORDER_ID, TextInput::new("Order number").placeholder("42")),
            (
                IMAGES,
                TextInput::new(format!("Images (up to {MAX_PRESCRIPTION_IMAGES})"))
                    .placeholder("/path/to/photo.jpg, /path/to/second.png"),
            ),
        ])
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Intent {
        if let Some(form) = self.form.as_mut() {
            if self.uploading {
                return Intent::None;
            }
            return match key.code {
                KeyCode::Esc => {
                    self.form = None;
                    Intent::None
                }
                KeyCode::Enter => {
                    let entry = PrescriptionForm {
                        order_id: form.value(ORDER_ID).to_string(),
                        images: form.value(IMAGES).to_string(),
                    };
                    match entry.validate() {
                        Ok(upload) => {
                            form.clear_errors();
                            self.uploading = true;
                            Intent::UploadPrescription(upload)
                        }
                        Err(errors) => {
                            form.apply_errors(&errors);
                            Intent::None
                        }
                    }
                }
                _ => {
                    form.handle_key(key);
                    Intent::None
                }
            };
        }

        match key.code {
            KeyCode::Char('n') => {
                self.form = Some(Self::open_form());
                Intent::None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                select_next(&mut self.list, self.prescriptions.len());
                Intent::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                select_prev(&mut self.list, self.prescriptions.len());
                Intent::None
            }
            KeyCode::Enter => self
                .list
                .selected()
                .and_then(|i| self.prescriptions.get(i))
                .map_or(Intent::None, |p| Intent::ShowPrescription(p.id)),
            KeyCode::Char('r') => {
                self.loading = true;
                Intent::Refresh
            }
            _ => Intent::Unhandled,
        }
    }

    #[must_use]
    pub fn hints(&self) -> &'static [(&'static str, &'static str)] {
        if self.form.is_some() {
            &[("Tab", "Next field"), ("Enter", "Upload"), ("Esc", "Cancel")]
        } else {
            &[
                ("n", "New upload"),
                ("j/k", "Move"),
                ("Enter", "Details"),
                ("r", "Reload"),
            ]
        }
    }

    fn detail_lines(prescription: &Prescription) -> Vec<Line<'_>> {
        let label = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Submitted: ", label),
                Span::raw(format_datetime(prescription.created_at)),
            ]),
            Line::from(vec![
                Span::styled("Reviewed: ", label),
                Span::raw(format_datetime(prescription.reviewed_at)),
            ]),
            Line::from(vec![
                Span::styled("Images: ", label),
                Span::raw(prescription.images.len().to_string()),
            ]),
        ];
        if let Some(reason) = &prescription.rejection_reason {
            lines.push(Line::from(vec![
                Span::styled("Rejected: ", Style::default().fg(Color::Red)),
                Span::raw(reason.as_str()),
            ]));
        }
        for image in &prescription.images {
            lines.push(Line::styled(
                format!("  {}", image.image),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if !prescription.items.is_empty() {
            lines.push(Line::default());
            for item in &prescription.items {
                lines.push(Line::raw(format!("{} x{}", item.name, item.quantity)));
            }
        }
        lines
    }
}

impl Default for PrescriptionsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &mut PrescriptionsScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(form) = &self.form {
            let [form_area, status_area, _] = Layout::vertical([
                Constraint::Length(form.height()),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(area);
            form.render(form_area, buf);
            if self.uploading {
                Paragraph::new(Line::styled(
                    "Uploading...",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                ))
                .render(status_area, buf);
            }
            return;
        }

        let [list_area, detail_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Prescriptions ");
        if self.prescriptions.is_empty() {
            let text = if self.loading {
                "Loading..."
            } else {
                "No prescriptions uploaded. Press n to upload one."
            };
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .prescriptions
            .iter()
            .map(|p| {
                let status = p.status_label.as_deref().unwrap_or(p.status.label());
                ListItem::new(Line::from(vec![
                    Span::raw(format!("#{:<6}", p.id.0)),
                    Span::styled(status, Style::default().fg(prescription_status_color(p.status))),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        StatefulWidget::render(list, list_area, buf, &mut self.list);

        let detail = Block::default().borders(Borders::ALL).title(" Details ");
        match self.list.selected().and_then(|i| self.prescriptions.get(i)) {
            Some(p) => Paragraph::new(PrescriptionsScreen::detail_lines(p))
                .block(detail)
                .render(detail_area, buf),
            None => detail.render(detail_area, buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OrderId;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(screen: &mut PrescriptionsScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_upload_form_requires_both_fields() {
        let mut screen = PrescriptionsScreen::new();
        screen.handle_key(key(KeyCode::Char('n')));
        assert!(screen.is_form_open());

        assert!(matches!(screen.handle_key(key(KeyCode::Enter)), Intent::None));
        let form = screen.form.as_ref().unwrap();
        assert!(form.field(ORDER_ID).and_then(TextInput::error).is_some());
        assert!(form.field(IMAGES).and_then(TextInput::error).is_some());
    }

    #[test]
    fn test_valid_upload() {
        let mut screen = PrescriptionsScreen::new();
        screen.handle_key(key(KeyCode::Char('n')));
        type_text(&mut screen, "42");
        screen.handle_key(key(KeyCode::Tab));
        type_text(&mut screen, "scan.jpg");

        let Intent::UploadPrescription(upload) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected upload intent");
        };
        assert_eq!(upload.order_id, OrderId(42));
        assert_eq!(upload.images.len(), 1);

        screen.upload_finished(true);
        assert!(!screen.is_form_open());
    }

    #[test]
    fn test_enter_fetches_selected_and_detail_replaces_entry() {
        let summary: Prescription =
            serde_json::from_value(serde_json::json!({"id": 9, "status": "pending"})).unwrap();
        let full: Prescription = serde_json::from_value(serde_json::json!({
            "id": 9,
            "status": "approved",
            "dorilar": [{"id": 1, "dori_nomi": "Amoxicillin", "quantity": 2}]
        }))
        .unwrap();
        let mut screen = PrescriptionsScreen::new();
        screen.set_prescriptions(vec![summary]);

        let Intent::ShowPrescription(id) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected detail lookup");
        };
        assert_eq!(id.0, 9);

        screen.set_detail(full);
        assert_eq!(screen.prescriptions[0].items.len(), 1);
    }

    #[test]
    fn test_escape_closes_form() {
        let mut screen = PrescriptionsScreen::new();
        screen.handle_key(key(KeyCode::Char('n')));
        assert!(matches!(screen.handle_key(key(KeyCode::Esc)), Intent::None));
        assert!(!screen.is_form_open());
    }
}
