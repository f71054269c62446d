//! Domain entity definitions.

mod cart;
mod dashboard;
mod order;
mod payment;
mod phone;
mod prescription;
mod product;
mod registration;
mod session;
mod token;
mod user;

pub use cart::{Cart, CartItem, CartItemId, CartProduct};
pub use dashboard::{Dashboard, humanize};
pub use order::{Order, OrderAction, OrderId, OrderItem, OrderStatus};
pub use payment::{Payment, PaymentProvider, PaymentStatus};
pub use phone::PhoneNumber;
pub use prescription::{
    Prescription, PrescriptionId, PrescriptionImage, PrescriptionItem, PrescriptionStatus,
};
pub use product::{ActiveSubstance, Category, CategoryId, Product, ProductId, ProductQuery};
pub use registration::RegistrationDraft;
pub use session::{AuthGrant, Session, SessionEvent, StoredSession};
pub use token::{AuthToken, TokenPair};
pub use user::{Role, User, UserId};

/// Maximum number of images attached to one prescription upload.
pub const MAX_PRESCRIPTION_IMAGES: usize = 5;
