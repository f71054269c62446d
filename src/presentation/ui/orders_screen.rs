//! Order history.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::intent::Intent;
use super::utils::{
    clamp_selection, format_datetime, format_money, order_status_color, select_next, select_prev,
};
use crate::domain::Route;
use crate::domain::entities::Order;

pub struct OrdersScreen {
    orders: Vec<Order>,
    list: ListState,
    loading: bool,
}

impl OrdersScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            list: ListState::default(),
            loading: true,
        }
    }

    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn set_orders(&mut self, orders: Vec<Order>) {
        self.loading = false;
        self.orders = orders;
        clamp_selection(&mut self.list, self.orders.len());
    }

    pub const fn failed(&mut self) {
        self.loading = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Intent {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                select_next(&mut self.list, self.orders.len());
                Intent::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                select_prev(&mut self.list, self.orders.len());
                Intent::None
            }
            KeyCode::Enter => self
                .list
                .selected()
                .and_then(|i| self.orders.get(i))
                .map_or(Intent::None, |o| Intent::Navigate(Route::OrderDetail(o.id))),
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

impl Default for OrdersScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &mut OrdersScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default().borders(Borders::ALL).title(" Orders ");
        if self.orders.is_empty() {
            let text = if self.loading {
                "Loading..."
            } else {
                "You have no orders yet"
            };
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .orders
            .iter()
            .map(|order| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("#{:<6}", order.id.0),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!("{:<24}", order.status.label()),
                        Style::default().fg(order_status_color(order.status)),
                    ),
                    Span::raw(format!("{:>16}", format_money(order.total_price))),
                    Span::styled(
                        format!(
                            "  {} items  {}",
                            order.item_count(),
                            format_datetime(order.created_at)
                        ),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        StatefulWidget::render(list, area, buf, &mut self.list);
    }
}
