//! Last fetched cart snapshot.

use rust_decimal::Decimal;

use crate::domain::entities::{Cart, CartItem, CartItemId};

/// Read-only mirror of the server cart, replaced wholesale on every fetch.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    cart: Cart,
    loaded: bool,
}

impl CartStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, cart: Cart) {
        self.cart = cart;
        self.loaded = true;
    }

    /// Forgets the snapshot, e.g. after checkout or logout.
    pub fn clear(&mut self) {
        self.cart = Cart::default();
        self.loaded = false;
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.cart.items
    }

    #[must_use]
    pub fn item(&self, id: CartItemId) -> Option<&CartItem> {
        self.cart.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.cart.total()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Quantity to request when stepping a line by `delta`.
    ///
    /// `None` when the line is unknown or the result would drop below one.
    #[must_use]
    pub fn stepped_quantity(&self, id: CartItemId, delta: i64) -> Option<u32> {
        let current = i64::from(self.item(id)?.quantity);
        let next = current + delta;
        (next >= 1).then(|| u32::try_from(next).ok()).flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{CartProduct, ProductId};

    fn cart(quantities: &[(u64, i64, u32)]) -> Cart {
        Cart::new(
            quantities
                .iter()
                .map(|&(id, price, quantity)| CartItem {
                    id: CartItemId(id),
                    product: CartProduct {
                        id: ProductId(id + 100),
                        name: format!("Item {id}"),
                        price: Decimal::from(price),
                    },
                    quantity,
                })
                .collect(),
        )
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut store = CartStore::new();
        store.replace(cart(&[(1, 1000, 2), (2, 2000, 3)]));
        assert_eq!(store.total(), Decimal::from(8000));
        assert_eq!(store.item_count(), 5);

        store.replace(cart(&[(3, 500, 1)]));
        assert!(store.item(CartItemId(1)).is_none());
        assert_eq!(store.total(), Decimal::from(500));
    }

    #[test]
    fn test_stepped_quantity_never_below_one() {
        let mut store = CartStore::new();
        store.replace(cart(&[(1, 1000, 1), (2, 1000, 4)]));

        assert_eq!(store.stepped_quantity(CartItemId(1), -1), None);
        assert_eq!(store.stepped_quantity(CartItemId(1), 1), Some(2));
        assert_eq!(store.stepped_quantity(CartItemId(2), -1), Some(3));
        assert_eq!(store.stepped_quantity(CartItemId(9), 1), None);
    }

    #[test]
    fn test_clear() {
        let mut store = CartStore::new();
        store.replace(cart(&[(1, 1000, 1)]));
        store.clear();
        assert!(store.is_empty());
        assert!(!store.is_loaded());
    }
}
