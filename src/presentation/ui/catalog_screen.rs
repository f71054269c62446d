//! Product catalog with search and category filter.

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
use crate::application::services::CatalogStore;
use crate::domain::Route;
use crate::domain::entities::Product;
use crate::presentation::widgets::TextInput;

pub struct CatalogScreen {
    list: ListState,
    search: TextInput,
    searching: bool,
    loading: bool,
}

impl CatalogScreen {
    #[must_use]
    pub fn new(catalog: &CatalogStore) -> Self {
        let mut search = TextInput::new("Search").placeholder("Product name");
        search.set_value(catalog.search());
        Self {
            list: ListState::default(),
            search,
            searching: false,
            loading: true,
        }
    }

    #[must_use]
    pub const fn is_searching(&self) -> bool {
        self.searching
    }

    #[must_use]
    pub const fn selected(&self) -> Option<usize> {
        self.list.selected()
    }

    pub const fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn products_loaded(&mut self, catalog: &CatalogStore) {
        self.loading = false;
        clamp_selection(&mut self.list, catalog.filtered().len());
    }

    fn selected_product<'a>(&self, catalog: &'a CatalogStore) -> Option<&'a Product> {
        self.list
            .selected()
            .and_then(|i| catalog.filtered().get(i).copied())
    }

    pub fn handle_key(&mut self, key: KeyEvent, catalog: &CatalogStore) -> Intent {
        if self.searching {
            return self.handle_search_key(key, catalog);
        }

        let len = catalog.filtered().len();
        match key.code {
            KeyCode::Char('/') => {
                self.searching = true;
                self.search.set_focused(true);
                Intent::None
            }
            KeyCode::Char('c') => Intent::CycleCategory,
            KeyCode::Char('r') => Intent::Refresh,
            KeyCode::Char('j') | KeyCode::Down => {
                select_next(&mut self.list, len);
                Intent::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                select_prev(&mut self.list, len);
                Intent::None
            }
            KeyCode::Enter => self
                .selected_product(catalog)
                .map_or(Intent::None, |p| Intent::Navigate(Route::ProductDetail(p.id))),
            KeyCode::Char('a') => match self.selected_product(catalog) {
                Some(p) if !p.is_available => Intent::Warn(format!("{} is out of stock", p.name)),
                Some(p) => Intent::AddToCart {
                    product: p.id,
                    quantity: 1,
                },
                None => Intent::None,
            },
            _ => Intent::Unhandled,
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent, catalog: &CatalogStore) -> Intent {
        match key.code {
            KeyCode::Enter => {
                self.searching = false;
                self.search.set_focused(false);
                self.loading = true;
                self.list.select(None);
                Intent::Search(self.search.value().trim().to_string())
            }
            KeyCode::Esc => {
                self.searching = false;
                self.search.set_focused(false);
                self.search.set_value(catalog.search());
                Intent::None
            }
            _ => {
                self.search.handle_key(key);
                Intent::None
            }
        }
    }

    #[must_use]
    pub fn hints(&self) -> &'static [(&'static str, &'static str)] {
        if self.searching {
            &[("Enter", "Search"), ("Esc", "Cancel")]
        } else {
            &[
                ("/", "Search"),
                ("c", "Category"),
                ("a", "Add to cart"),
                ("Enter", "Details"),
                ("r", "Reload"),
            ]
        }
    }

    pub fn render(&mut self, area: Rect, buf: &mut Buffer, catalog: &CatalogStore) {
        let [search_area, filter_area, list_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        (&self.search).render(search_area, buf);

        let category = catalog.selected_category_name().unwrap_or("All");
        Paragraph::new(Line::from(vec![
            Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
            Span::styled(category, Style::default().fg(Color::Yellow)),
        ]))
        .render(filter_area, buf);

        let products = catalog.filtered();
        let title = if self.loading {
            " Products (loading...) ".to_string()
        } else {
            format!(" Products ({}) ", products.len())
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        if products.is_empty() && !self.loading {
            Paragraph::new("No products found")
                .style(Style::default().fg(Color::DarkGray))
                .block(block)
                .render(list_area, buf);
            return;
        }

        let items: Vec<ListItem> = products.iter().map(|p| product_row(p)).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        StatefulWidget::render(list, list_area, buf, &mut self.list);
    }
}

fn product_row(product: &Product) -> ListItem<'_> {
    let mut spans = vec![
        Span::raw(product.name.as_str()),
        Span::raw("  "),
        Span::styled(format_money(product.price), Style::default().fg(Color::Green)),
    ];
    if !product.category_name().is_empty() {
        spans.push(Span::styled(
            format!("  [{}]", product.category_name()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if product.is_prescription_required {
        spans.push(Span::styled("  Rx", Style::default().fg(Color::Magenta)));
    }
    if !product.is_available {
        spans.push(Span::styled(
            "  out of stock",
            Style::default().fg(Color::Red),
        ));
    }
    ListItem::new(Line::from(spans))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProductId;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn catalog() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.replace_products(vec![
            serde_json::from_value(serde_json::json!({
                "id": 1, "name": "Vitamin C", "price": "15000.00"
            }))
            .unwrap(),
            serde_json::from_value(serde_json::json!({
                "id": 2, "name": "Insulin", "price": "90000.00", "is_available": false
            }))
            .unwrap(),
        ]);
        store
    }

    #[test]
    fn test_add_selected_product() {
        let store = catalog();
        let mut screen = CatalogScreen::new(&store);
        screen.products_loaded(&store);

        let intent = screen.handle_key(key(KeyCode::Char('a')), &store);
        assert!(matches!(
            intent,
            Intent::AddToCart {
                product: ProductId(1),
                quantity: 1
            }
        ));
    }

    #[test]
    fn test_unavailable_product_is_refused() {
        let store = catalog();
        let mut screen = CatalogScreen::new(&store);
        screen.products_loaded(&store);
        screen.handle_key(key(KeyCode::Down), &store);

        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('a')), &store),
            Intent::Warn(_)
        ));
    }

    #[test]
    fn test_search_mode_captures_digits() {
        let store = catalog();
        let mut screen = CatalogScreen::new(&store);
        screen.handle_key(key(KeyCode::Char('/')), &store);
        assert!(screen.is_searching());

        screen.handle_key(key(KeyCode::Char('5')), &store);
        screen.handle_key(key(KeyCode::Char('0')), &store);
        let Intent::Search(text) = screen.handle_key(key(KeyCode::Enter), &store) else {
            panic!("expected search intent");
        };
        assert_eq!(text, "50");
        assert!(!screen.is_searching());
    }

    #[test]
    fn test_enter_opens_detail() {
        let store = catalog();
        let mut screen = CatalogScreen::new(&store);
        screen.products_loaded(&store);
        assert!(matches!(
            screen.handle_key(key(KeyCode::Enter), &store),
            Intent::Navigate(Route::ProductDetail(ProductId(1)))
        ));
    }

    #[test]
    fn test_navigation_digits_fall_through() {
        let store = catalog();
        let mut screen = CatalogScreen::new(&store);
        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('2')), &store),
            Intent::Unhandled
        ));
    }
}
