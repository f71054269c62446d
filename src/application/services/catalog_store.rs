//! Catalog mirror with category and search filtering.

use crate::domain::entities::{Category, CategoryId, Product, ProductQuery};

#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    products: Vec<Product>,
    categories: Vec<Category>,
    selected_category: Option<CategoryId>,
    search: String,
}

impl CatalogStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn replace_categories(&mut self, categories: Vec<Category>) {
        if let Some(selected) = self.selected_category
            && !categories.iter().any(|c| c.id == selected)
        {
            self.selected_category = None;
        }
        self.categories = categories;
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    #[must_use]
    pub const fn selected_category(&self) -> Option<CategoryId> {
        self.selected_category
    }

    #[must_use]
    pub fn selected_category_name(&self) -> Option<&str> {
        let selected = self.selected_category?;
        self.categories
            .iter()
            .find(|c| c.id == selected)
            .map(|c| c.name.as_str())
    }

    pub fn select_category(&mut self, category: Option<CategoryId>) {
        self.selected_category = category;
    }

    /// Advances through "all" followed by each category, wrapping around.
    pub fn cycle_category(&mut self) {
        let position = self
            .selected_category
            .and_then(|id| self.categories.iter().position(|c| c.id == id));

        self.selected_category = match position {
            None => self.categories.first().map(|c| c.id),
            Some(i) => self.categories.get(i + 1).map(|c| c.id),
        };
    }

    /// Query forwarded to the backend list endpoint.
    #[must_use]
    pub fn query(&self) -> ProductQuery {
        ProductQuery {
            search: Some(self.search.clone()).filter(|s| !s.trim().is_empty()),
            category: self.selected_category,
        }
    }

    /// Products whose name contains the search text and whose category matches.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Product> {
        let needle = self.search.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .filter(|p| {
                self.selected_category
                    .is_none_or(|selected| p.category_id() == Some(selected))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ProductId;
    use rust_decimal::Decimal;

    fn category(id: u64, name: &str) -> Category {
        Category {
            id: CategoryId(id),
            name: name.to_string(),
            slug: name.to_lowercase(),
        }
    }

    fn product(id: u64, name: &str, category_id: u64) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "price": "1000.00",
            "category": {"id": category_id, "name": format!("Cat {category_id}")}
        }))
        .unwrap()
    }

    fn store() -> CatalogStore {
        let mut store = CatalogStore::new();
        store.replace_categories(vec![category(1, "Vitamins"), category(2, "Analgesics")]);
        store.replace_products(vec![
            product(1, "Vitamin C", 1),
            product(2, "Paracetamol", 2),
            product(3, "Vitamin D3", 1),
        ]);
        store
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut store = store();
        store.set_search("VITAMIN");
        let names: Vec<_> = store.filtered().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Vitamin C", "Vitamin D3"]);
    }

    #[test]
    fn test_category_and_search_combine() {
        let mut store = store();
        store.select_category(Some(CategoryId(2)));
        assert_eq!(store.filtered().len(), 1);

        store.set_search("vitamin");
        assert!(store.filtered().is_empty());
    }

    #[test]
    fn test_cycle_category_wraps_to_all() {
        let mut store = store();
        store.cycle_category();
        assert_eq!(store.selected_category_name(), Some("Vitamins"));
        store.cycle_category();
        assert_eq!(store.selected_category(), Some(CategoryId(2)));
        store.cycle_category();
        assert_eq!(store.selected_category(), None);
    }

    #[test]
    fn test_query_omits_blank_search() {
        let mut store = store();
        store.set_search("  ");
        assert_eq!(store.query(), ProductQuery::default());
        assert_eq!(store.products()[0].price, Decimal::from(1000));
        assert_eq!(store.products()[0].id, ProductId(1));
    }
}
