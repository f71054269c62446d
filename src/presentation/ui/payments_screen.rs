//! Payment history with a detail pane.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::intent::Intent;
use super::utils::{
    clamp_selection, format_datetime, format_money, payment_status_color, select_next, select_prev,
};
use crate::domain::entities::Payment;

pub struct PaymentsScreen {
    payments: Vec<Payment>,
    list: ListState,
    detail: Option<Payment>,
    loading: bool,
}

impl PaymentsScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            payments: Vec::new(),
            list: ListState::default(),
            detail: None,
            loading: true,
        }
    }

    #[must_use]
    pub const fn detail(&self) -> Option<&Payment> {
        self.detail.as_ref()
    }

    pub fn set_payments(&mut self, payments: Vec<Payment>) {
        self.loading = false;
        self.payments = payments;
        clamp_selection(&mut self.list, self.payments.len());
    }

    pub fn set_detail(&mut self, payment: Payment) {
        self.detail = Some(payment);
    }

    pub const fn failed(&mut self) {
        self.loading = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Intent {
        match key.code {
            KeyCode::Esc if self.detail.is_some() => {
                self.detail = None;
                Intent::None
            }
            KeyCode::Char('j') | KeyCode::Down => {
                select_next(&mut self.list, self.payments.len());
                self.detail = None;
                Intent::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                select_prev(&mut self.list, self.payments.len());
                self.detail = None;
                Intent::None
            }
            KeyCode::Enter => self
                .list
                .selected()
                .and_then(|i| self.payments.get(i))
                .map_or(Intent::None, |p| Intent::ShowPayment(p.payment_id.clone())),
            KeyCode::Char('r') => {
                self.loading = true;
                Intent::Refresh
            }
            _ => Intent::Unhandled,
        }
    }

    #[must_use]
    pub const fn hints() -> &'static [(&'static str, &'static str)] {
        &[("j/k", "Move"), ("Enter", "Details"), ("r", "Reload")]
    }
}

impl Default for PaymentsScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn detail_lines(payment: &Payment) -> Vec<Line<'_>> {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("Payment: ", label),
            Span::raw(payment.payment_id.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Order: ", label),
            Span::raw(format!("#{}", payment.order_id)),
        ]),
        Line::from(vec![
            Span::styled("Provider: ", label),
            Span::raw(payment.provider.label()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", label),
            Span::styled(
                payment.status.label(),
                Style::default().fg(payment_status_color(payment.status)),
            ),
        ]),
        Line::from(vec![
            Span::styled("Amount: ", label),
            Span::raw(format_money(payment.amount)),
        ]),
        Line::from(vec![
            Span::styled("Created: ", label),
            Span::raw(format_datetime(payment.created_at)),
        ]),
        Line::from(vec![
            Span::styled("Completed: ", label),
            Span::raw(format_datetime(payment.completed_at)),
        ]),
    ];
    if let Some(error) = &payment.error_message {
        lines.push(Line::styled(error.as_str(), Style::default().fg(Color::Red)));
    }
    lines
}

impl Widget for &mut PaymentsScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [list_area, detail_area] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(area);

        let block = Block::default().borders(Borders::ALL).title(" Payments ");
        if self.payments.is_empty() {
            let text = if self.loading {
                "Loading..."
            } else {
                "No payments yet"
            };
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(list_area, buf);
        } else {
            let items: Vec<ListItem> = self
                .payments
                .iter()
                .map(|p| {
                    ListItem::new(Line::from(vec![
                        Span::raw(format!("#{:<6}", p.order_id.0)),
                        Span::raw(format!("{:<8}", p.provider.label())),
                        Span::styled(
                            format!("{:<12}", p.status.label()),
                            Style::default().fg(payment_status_color(p.status)),
                        ),
                        Span::raw(format_money(p.amount)),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            StatefulWidget::render(list, list_area, buf, &mut self.list);
        }

        let detail = Block::default().borders(Borders::ALL).title(" Details ");
        match &self.detail {
            Some(payment) => Paragraph::new(detail_lines(payment))
                .wrap(Wrap { trim: false })
                .block(detail)
                .render(detail_area, buf),
            None => Paragraph::new("Press Enter to load details")
                .style(Style::default().fg(Color::DarkGray))
                .block(detail)
                .render(detail_area, buf),
        }
    }
}
