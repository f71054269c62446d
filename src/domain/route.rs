//! Navigable screens.

use crate::domain::entities::{OrderId, ProductId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Home,
    ProductDetail(ProductId),
    Cart,
    Checkout,
    Orders,
    OrderDetail(OrderId),
    Payments,
    Profile,
    Prescriptions,
    Dashboard,
}

impl Route {
    /// Whether the screen may only be shown to an authenticated session.
    #[must_use]
    pub const fn requires_auth(self) -> bool {
        !matches!(
            self,
            Self::Login | Self::Register | Self::Home | Self::ProductDetail(_) | Self::Cart
        )
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
            Self::Home => "Products",
            Self::ProductDetail(_) => "Product",
            Self::Cart => "Cart",
            Self::Checkout => "Checkout",
            Self::Orders => "Orders",
            Self::OrderDetail(_) => "Order",
            Self::Payments => "Payments",
            Self::Profile => "Profile",
            Self::Prescriptions => "Prescriptions",
            Self::Dashboard => "Dashboard",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProductDetail(id) => write!(f, "Product #{id}"),
            Self::OrderDetail(id) => write!(f, "Order #{id}"),
            other => f.write_str(other.title()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Route::Login, false)]
    #[test_case(Route::Register, false)]
    #[test_case(Route::Home, false)]
    #[test_case(Route::ProductDetail(ProductId(1)), false)]
    #[test_case(Route::Cart, false)]
    #[test_case(Route::Checkout, true)]
    #[test_case(Route::Orders, true)]
    #[test_case(Route::OrderDetail(OrderId(1)), true)]
    #[test_case(Route::Payments, true)]
    #[test_case(Route::Profile, true)]
    #[test_case(Route::Prescriptions, true)]
    #[test_case(Route::Dashboard, true)]
    fn test_requires_auth(route: Route, expected: bool) {
        assert_eq!(route.requires_auth(), expected);
    }
}
