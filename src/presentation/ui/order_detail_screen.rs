//! Single order with status-driven actions.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::intent::Intent;
use super::utils::{format_datetime, format_money, order_status_color};
use crate::application::dto::PrescriptionForm;
use crate::application::dto::storefront_dto::fields::IMAGES;
use crate::domain::entities::{MAX_PRESCRIPTION_IMAGES, Order, OrderAction, OrderId, PaymentProvider};
use crate::presentation::widgets::TextInput;

pub struct OrderDetailScreen {
    id: OrderId,
    order: Option<Order>,
    provider: PaymentProvider,
    upload: Option<TextInput>,
    busy: bool,
}

impl OrderDetailScreen {
    #[must_use]
    pub const fn new(id: OrderId) -> Self {
        Self {
            id,
            order: None,
            provider: PaymentProvider::Click,
            upload: None,
            busy: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    #[must_use]
    pub const fn provider(&self) -> PaymentProvider {
        self.provider
    }

    #[must_use]
    pub const fn is_uploading(&self) -> bool {
        self.upload.is_some()
    }

    pub fn set_order(&mut self, order: Order) {
        self.busy = false;
        self.order = Some(order);
    }

    /// A mutation finished; the order is fetched again either way.
    pub fn action_finished(&mut self, success: bool) {
        self.busy = false;
        if success {
            self.upload = None;
        }
    }

    fn actions(&self) -> Vec<OrderAction> {
        self.order
            .as_ref()
            .map(|o| o.status.available_actions())
            .unwrap_or_default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Intent {
        if self.upload.is_some() {
            return self.handle_upload_key(key);
        }
        if self.busy && key.code != KeyCode::Esc {
            return Intent::None;
        }

        let actions = self.actions();
        match key.code {
            KeyCode::Char('u') if actions.contains(&OrderAction::UploadPrescription) => {
                let mut input = TextInput::new("Prescription images")
                    .placeholder("/path/to/photo.jpg, /path/to/second.png");
                input.set_focused(true);
                self.upload = Some(input);
                Intent::None
            }
            KeyCode::Tab if actions.contains(&OrderAction::Pay) => {
                self.provider = match self.provider {
                    PaymentProvider::Click => PaymentProvider::Payme,
                    _ => PaymentProvider::Click,
                };
                Intent::None
            }
            KeyCode::Char('p') if actions.contains(&OrderAction::Pay) => {
                self.busy = true;
                Intent::Pay {
                    order: self.id,
                    provider: self.provider,
                }
            }
            KeyCode::Char('x') if actions.contains(&OrderAction::Cancel) => {
                self.busy = true;
                Intent::CancelOrder(self.id)
            }
            KeyCode::Char('u' | 'p' | 'x') if self.order.is_some() => {
                Intent::Warn("Not available for this order status".to_string())
            }
            KeyCode::Char('r') => Intent::Refresh,
            _ => Intent::Unhandled,
        }
    }

    fn handle_upload_key(&mut self, key: KeyEvent) -> Intent {
        let Some(input) = self.upload.as_mut() else {
            return Intent::None;
        };
        match key.code {
            KeyCode::Esc => {
                self.upload = None;
                Intent::None
            }
            KeyCode::Enter if !self.busy => {
                let form = PrescriptionForm {
                    order_id: self.id.to_string(),
                    images: input.value().to_string(),
                };
                match form.validate() {
                    Ok(upload) => {
                        self.busy = true;
                        Intent::UploadPrescription(upload)
                    }
                    Err(errors) => {
                        input.set_error(errors.get(IMAGES).map(str::to_string));
                        Intent::None
                    }
                }
            }
            _ => {
                if !self.busy {
                    input.handle_key(key);
                }
                Intent::None
            }
        }
    }

    #[must_use]
    pub fn hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.upload.is_some() {
            return vec![("Enter", "Upload"), ("Esc", "Cancel")];
        }
        let mut hints = Vec::new();
        for action in self.actions() {
            match action {
                OrderAction::UploadPrescription => hints.push(("u", "Upload prescription")),
                OrderAction::Pay => {
                    hints.push(("Tab", "Provider"));
                    hints.push(("p", "Pay"));
                }
                OrderAction::Cancel => hints.push(("x", "Cancel order")),
            }
        }
        hints.push(("r", "Reload"));
        hints.push(("Esc", "Back"));
        hints
    }

    fn order_lines(order: &Order) -> Vec<Line<'_>> {
        let label = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::from(vec![
                Span::styled("Status: ", label),
                Span::styled(
                    order.status.label(),
                    Style::default()
                        .fg(order_status_color(order.status))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Placed: ", label),
                Span::raw(format_datetime(order.created_at)),
            ]),
            Line::from(vec![
                Span::styled("Delivery address: ", label),
                Span::raw(order.delivery_address.as_str()),
            ]),
        ];
        if order.needs_prescription {
            lines.push(Line::styled(
                "Contains prescription medicines",
                Style::default().fg(Color::Magenta),
            ));
        }
        lines.push(Line::default());
        for item in &order.items {
            lines.push(Line::from(vec![
                Span::raw(item.product_name.as_str()),
                Span::styled(
                    format!("  {} x {}", item.quantity, format_money(item.price)),
                    label,
                ),
                Span::raw(format!("  = {}", format_money(item.line_total()))),
            ]));
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Items: ", label),
            Span::raw(order.item_count().to_string()),
            Span::styled("   Total: ", label),
            Span::styled(
                format_money(order.total_price),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));
        lines
    }

    fn action_line(&self) -> Line<'static> {
        let actions = self.actions();
        if self.busy {
            return Line::styled(
                "Working...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            );
        }
        if actions.contains(&OrderAction::Pay) {
            let mut spans = vec![Span::raw("Pay with: ")];
            for provider in PaymentProvider::ONLINE {
                let style = if provider == self.provider {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                spans.push(Span::styled(format!(" {} ", provider.label()), style));
                spans.push(Span::raw(" "));
            }
            return Line::from(spans);
        }
        if actions.contains(&OrderAction::UploadPrescription) {
            return Line::styled(
                format!("Upload up to {MAX_PRESCRIPTION_IMAGES} prescription photos with u"),
                Style::default().fg(Color::Yellow),
            );
        }
        Line::default()
    }
}

impl Widget for &OrderDetailScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let upload_height = if self.upload.is_some() { 3 } else { 0 };
        let [detail_area, action_area, upload_area] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(upload_height),
        ])
        .areas(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Order #{} ", self.id));
        match &self.order {
            Some(order) => Paragraph::new(OrderDetailScreen::order_lines(order))
                .wrap(Wrap { trim: false })
                .block(block)
                .render(detail_area, buf),
            None => Paragraph::new("Loading...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(detail_area, buf),
        }

        Paragraph::new(self.action_line()).render(action_area, buf);

        if let Some(input) = &self.upload {
            input.render(upload_area, buf);
        }
    }
}
