//! Delivery details and order placement.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
};

use super::cart_screen::summary;
use super::intent::Intent;
use super::utils::format_money;
use crate::application::dto::auth_dto::fields::PHONE;
use crate::application::dto::storefront_dto::fields::DELIVERY_ADDRESS;
use crate::application::services::CartStore;
use crate::domain::User;
use crate::domain::errors::ValidationErrors;
use crate::presentation::widgets::{Form, TextInput};

pub struct CheckoutScreen {
    form: Form,
    submitting: bool,
}

impl CheckoutScreen {
    /// Address and phone come from the signed-in profile.
    #[must_use]
    pub fn new(user: Option<&User>) -> Self {
        let mut form = Form::new(vec![
            (
                DELIVERY_ADDRESS,
                TextInput::new("Delivery address").placeholder("City, street, house"),
            ),
            (PHONE, TextInput::new("Phone").read_only()),
        ]);
        if let Some(user) = user {
            form.set_value(DELIVERY_ADDRESS, user.address().unwrap_or_default());
            form.set_value(PHONE, user.phone_number());
        }
        Self {
            form,
            submitting: false,
        }
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn address(&self) -> &str {
        self.form.value(DELIVERY_ADDRESS)
    }

    pub fn set_validation_errors(&mut self, errors: &ValidationErrors) {
        self.submitting = false;
        self.form.apply_errors(errors);
    }

    pub fn failed(&mut self) {
        self.submitting = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent, cart: &CartStore) -> Intent {
        if key.code == KeyCode::Esc {
            return Intent::Unhandled;
        }
        if self.submitting {
            return Intent::None;
        }
        if key.code == KeyCode::Enter {
            if cart.is_empty() {
                return Intent::Warn("Your cart is empty".to_string());
            }
            self.form.clear_errors();
            self.submitting = true;
            return Intent::Checkout(self.address().to_string());
        }
        self.form.handle_key(key);
        Intent::None
    }

    #[must_use]
    pub const fn hints() -> &'static [(&'static str, &'static str)] {
        &[("Enter", "Place order"), ("Esc", "Back to cart")]
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, cart: &CartStore) {
        let [form_area, items_area, summary_area, status_area] = Layout::vertical([
            Constraint::Length(self.form.height()),
            Constraint::Fill(1),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .areas(area);

        (&self.form).render(form_area, buf);

        let items: Vec<ListItem> = cart
            .items()
            .iter()
            .map(|item| {
                ListItem::new(format!(
                    "{} x{}  {}",
                    item.product.name,
                    item.quantity,
                    format_money(item.line_total())
                ))
            })
            .collect();
        Widget::render(
            List::new(items).block(Block::default().borders(Borders::ALL).title(" Order ")),
            items_area,
            buf,
        );

        summary(cart).render(summary_area, buf);

        if self.submitting {
            Paragraph::new(Line::styled(
                "Placing order...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
            .render(status_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Cart, CartItem, CartItemId, CartProduct, ProductId, Role};
    use crossterm::event::KeyModifiers;
    use rust_decimal::Decimal;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn cart() -> CartStore {
        let mut store = CartStore::new();
        store.replace(Cart::new(vec![CartItem {
            id: CartItemId(1),
            product: CartProduct {
                id: ProductId(1),
                name: "Aspirin".to_string(),
                price: Decimal::from(1000),
            },
            quantity: 1,
        }]));
        store
    }

    #[test]
    fn test_prefills_from_profile() {
        let user = User::new(1, "+998901234567", "Ali", "Valiyev", Role::Customer)
            .with_address("Tashkent, Amir Temur 1");
        let screen = CheckoutScreen::new(Some(&user));
        assert_eq!(screen.address(), "Tashkent, Amir Temur 1");
    }

    #[test]
    fn test_enter_submits_address() {
        let mut screen = CheckoutScreen::new(None);
        let cart = cart();
        for c in "Chilonzor 5".chars() {
            screen.handle_key(key(KeyCode::Char(c)), &cart);
        }

        let Intent::Checkout(address) = screen.handle_key(key(KeyCode::Enter), &cart) else {
            panic!("expected checkout intent");
        };
        assert_eq!(address, "Chilonzor 5");
        assert!(screen.is_submitting());
    }

    #[test]
    fn test_phone_is_read_only() {
        let user = User::new(1, "+998901234567", "Ali", "Valiyev", Role::Customer);
        let mut screen = CheckoutScreen::new(Some(&user));
        let cart = cart();
        screen.handle_key(key(KeyCode::Tab), &cart);
        screen.handle_key(key(KeyCode::Char('9')), &cart);
        assert_eq!(screen.form.value(PHONE), "+998901234567");
    }
}
