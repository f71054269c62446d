//! Cart contents with quantity controls.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::intent::Intent;
use super::utils::{clamp_selection, format_money, select_next, select_prev};
use crate::application::services::CartStore;
use crate::domain::Route;
use crate::domain::entities::CartItem;

pub struct CartScreen {
    list: ListState,
}

impl CartScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            list: ListState::default(),
        }
    }

    pub fn cart_changed(&mut self, cart: &CartStore) {
        clamp_selection(&mut self.list, cart.items().len());
    }

    fn selected<'a>(&self, cart: &'a CartStore) -> Option<&'a CartItem> {
        self.list.selected().and_then(|i| cart.items().get(i))
    }

    pub fn handle_key(&mut self, key: KeyEvent, cart: &CartStore) -> Intent {
        let len = cart.items().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                select_next(&mut self.list, len);
                Intent::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                select_prev(&mut self.list, len);
                Intent::None
            }
            KeyCode::Char(c @ ('+' | '=' | '-')) => {
                let delta = if c == '-' { -1 } else { 1 };
                self.selected(cart)
                    .and_then(|item| {
                        cart.stepped_quantity(item.id, delta)
                            .map(|quantity| Intent::SetCartQuantity {
                                item: item.id,
                                quantity,
                            })
                    })
                    .unwrap_or(Intent::None)
            }
            KeyCode::Char('d') | KeyCode::Delete => self
                .selected(cart)
                .map_or(Intent::None, |item| Intent::RemoveCartItem(item.id)),
            KeyCode::Enter if cart.is_empty() => {
                Intent::Warn("Your cart is empty".to_string())
            }
            KeyCode::Enter => Intent::Navigate(Route::Checkout),
            KeyCode::Char('r') => Intent::Refresh,
            _ => Intent::Unhandled,
        }
    }

    #[must_use]
    pub const fn hints() -> &'static [(&'static str, &'static str)] {
        &[
            ("+/-", "Quantity"),
            ("d", "Remove"),
            ("Enter", "Checkout"),
            ("r", "Reload"),
        ]
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, cart: &CartStore) {
        let [list_area, summary_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(4)]).areas(area);

        let block = Block::default().borders(Borders::ALL).title(" Cart ");
        if !cart.is_loaded() {
            Paragraph::new("Loading...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(list_area, buf);
        } else if cart.is_empty() {
            Paragraph::new("Your cart is empty. Press 1 to browse products.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(list_area, buf);
        } else {
            let items: Vec<ListItem> = cart.items().iter().map(cart_row).collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");
            StatefulWidget::render(list, list_area, buf, &mut self.list);
        }

        summary(cart).render(summary_area, buf);
    }
}

impl Default for CartScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn cart_row(item: &CartItem) -> ListItem<'_> {
    ListItem::new(Line::from(vec![
        Span::raw(item.product.name.as_str()),
        Span::styled(
            format!("  {} x {}", item.quantity, format_money(item.product.price)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  = {}", format_money(item.line_total())),
            Style::default().fg(Color::Green),
        ),
    ]))
}

/// Item count and total block shared with checkout.
pub(super) fn summary(cart: &CartStore) -> Paragraph<'static> {
    let label = Style::default().fg(Color::DarkGray);
    Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Items: ", label),
            Span::raw(cart.item_count().to_string()),
            Span::styled("   Delivery: ", label),
            Span::styled("free", Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled("Total: ", label),
            Span::styled(
                format_money(cart.total()),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL))
}
