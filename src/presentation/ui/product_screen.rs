//! Product detail with quantity selector and alternatives.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};
use rust_decimal::Decimal;

use super::intent::Intent;
use super::utils::{clamp_selection, format_money, select_next, select_prev};
use crate::domain::Route;
use crate::domain::entities::{Product, ProductId};

pub struct ProductScreen {
    id: ProductId,
    product: Option<Product>,
    alternatives: Vec<Product>,
    list: ListState,
    quantity: u32,
    adding: bool,
}

impl ProductScreen {
    #[must_use]
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            product: None,
            alternatives: Vec::new(),
            list: ListState::default(),
            quantity: 1,
            adding: false,
        }
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn set_product(&mut self, product: Product) {
        self.product = Some(product);
    }

    pub fn set_alternatives(&mut self, alternatives: Vec<Product>) {
        self.alternatives = alternatives;
        clamp_selection(&mut self.list, self.alternatives.len());
    }

    /// Add-to-cart finished; quantity goes back to one on success.
    pub fn added(&mut self, success: bool) {
        self.adding = false;
        if success {
            self.quantity = 1;
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Intent {
        match key.code {
            KeyCode::Char('+' | '=') => {
                self.quantity = self.quantity.saturating_add(1);
                Intent::None
            }
            KeyCode::Char('-') => {
                self.quantity = self.quantity.saturating_sub(1).max(1);
                Intent::None
            }
            KeyCode::Char('a') => {
                let Some(product) = &self.product else {
                    return Intent::None;
                };
                if !product.is_available {
                    return Intent::Warn(format!("{} is out of stock", product.name));
                }
                if self.adding {
                    return Intent::None;
                }
                self.adding = true;
                Intent::AddToCart {
                    product: self.id,
                    quantity: self.quantity,
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                select_next(&mut self.list, self.alternatives.len());
                Intent::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                select_prev(&mut self.list, self.alternatives.len());
                Intent::None
            }
            KeyCode::Enter => self
                .list
                .selected()
                .and_then(|i| self.alternatives.get(i))
                .map_or(Intent::None, |p| Intent::Navigate(Route::ProductDetail(p.id))),
            KeyCode::Char('r') => Intent::Refresh,
            _ => Intent::Unhandled,
        }
    }

    #[must_use]
    pub const fn hints() -> &'static [(&'static str, &'static str)] {
        &[
            ("+/-", "Quantity"),
            ("a", "Add to cart"),
            ("Enter", "Open alternative"),
            ("Esc", "Back"),
        ]
    }

    fn detail_lines(product: &Product, quantity: u32) -> Vec<Line<'_>> {
        let label = Style::default().fg(Color::DarkGray);
        let mut lines = vec![
            Line::styled(
                product.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::from(vec![
                Span::styled("Price: ", label),
                Span::styled(format_money(product.price), Style::default().fg(Color::Green)),
            ]),
        ];
        if !product.category_name().is_empty() {
            lines.push(Line::from(vec![
                Span::styled("Category: ", label),
                Span::raw(product.category_name()),
            ]));
        }
        if let Some(manufacturer) = &product.manufacturer {
            lines.push(Line::from(vec![
                Span::styled("Manufacturer: ", label),
                Span::raw(manufacturer.as_str()),
            ]));
        }
        if let Some(expiry) = product.expiry_date {
            lines.push(Line::from(vec![
                Span::styled("Expires: ", label),
                Span::raw(expiry.format("%d.%m.%Y").to_string()),
            ]));
        }
        if let Some(stock) = product.stock {
            lines.push(Line::from(vec![
                Span::styled("In stock: ", label),
                Span::raw(stock.to_string()),
            ]));
        }
        if !product.active_substances.is_empty() {
            let names: Vec<&str> = product
                .active_substances
                .iter()
                .map(|s| s.name.as_str())
                .collect();
            lines.push(Line::from(vec![
                Span::styled("Active substances: ", label),
                Span::raw(names.join(", ")),
            ]));
        }
        if product.is_prescription_required {
            lines.push(Line::styled(
                "Prescription required",
                Style::default().fg(Color::Magenta),
            ));
        }
        if !product.is_available {
            lines.push(Line::styled("Out of stock", Style::default().fg(Color::Red)));
        }
        if let Some(description) = &product.description {
            lines.push(Line::default());
            lines.push(Line::raw(description.as_str()));
        }
        if let Some(usage) = &product.usage {
            lines.push(Line::default());
            lines.push(Line::styled("Usage", label));
            lines.push(Line::raw(usage.as_str()));
        }
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("Quantity: ", label),
            Span::styled(
                format!("- {quantity} +"),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "  Total {}",
                    format_money(product.price * Decimal::from(quantity))
                ),
                label,
            ),
        ]));
        lines
    }
}

impl Widget for &mut ProductScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [detail_area, alternatives_area] =
            Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)])
                .areas(area);

        let detail_block = Block::default().borders(Borders::ALL).title(" Product ");
        match &self.product {
            Some(product) => Paragraph::new(ProductScreen::detail_lines(product, self.quantity))
                .wrap(Wrap { trim: false })
                .block(detail_block)
                .render(detail_area, buf),
            None => Paragraph::new("Loading...")
                .style(Style::default().fg(Color::DarkGray))
                .block(detail_block)
                .render(detail_area, buf),
        }

        let block = Block::default().borders(Borders::ALL).title(" Alternatives ");
        if self.alternatives.is_empty() {
            Paragraph::new("No alternatives")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(alternatives_area, buf);
            return;
        }
        let items: Vec<ListItem> = self
            .alternatives
            .iter()
            .map(|p| {
                ListItem::new(Line::from(vec![
                    Span::raw(p.name.as_str()),
                    Span::raw("  "),
                    Span::styled(format_money(p.price), Style::default().fg(Color::Green)),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        StatefulWidget::render(list, alternatives_area, buf, &mut self.list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded() -> ProductScreen {
        let mut screen = ProductScreen::new(ProductId(7));
        screen.set_product(
            serde_json::from_value(serde_json::json!({
                "id": 7, "name": "Ibuprofen", "price": "9000.00"
            }))
            .unwrap(),
        );
        screen
    }

    #[test]
    fn test_quantity_never_below_one() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('-')));
        screen.handle_key(key(KeyCode::Char('-')));
        assert_eq!(screen.quantity(), 1);

        screen.handle_key(key(KeyCode::Char('+')));
        screen.handle_key(key(KeyCode::Char('+')));
        assert_eq!(screen.quantity(), 3);
    }

    #[test]
    fn test_add_sends_quantity_then_resets() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('+')));

        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('a'))),
            Intent::AddToCart {
                product: ProductId(7),
                quantity: 2
            }
        ));
        screen.added(true);
        assert_eq!(screen.quantity(), 1);
    }

    #[test]
    fn test_failed_add_keeps_quantity() {
        let mut screen = loaded();
        screen.handle_key(key(KeyCode::Char('+')));
        screen.handle_key(key(KeyCode::Char('a')));
        screen.added(false);
        assert_eq!(screen.quantity(), 2);
    }

    #[test]
    fn test_add_before_load_does_nothing() {
        let mut screen = ProductScreen::new(ProductId(7));
        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('a'))),
            Intent::None
        ));
    }
}
