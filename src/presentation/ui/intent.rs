//! Messages between screens, the orchestrator and spawned requests.

use crate::application::dto::{LoginForm, ProfileForm, RegistrationForm};
use crate::domain::Route;
use crate::domain::entities::{
    Cart, CartItemId, Category, Dashboard, Order, OrderId, Payment, PaymentProvider, Prescription,
    PrescriptionId, Product, ProductId, RegistrationDraft, User,
};
use crate::domain::errors::ApiError;
use crate::domain::ports::PrescriptionUpload;

/// What a screen asks the orchestrator to do after a key press.
#[derive(Debug)]
pub enum Intent {
    /// The screen consumed the key.
    None,
    /// The screen does not use the key; global bindings apply.
    Unhandled,
    Navigate(Route),
    /// Refused locally, shown as a warning toast.
    Warn(String),
    Refresh,
    Login(LoginForm),
    Register(RegistrationForm),
    VerifyOtp {
        draft: RegistrationDraft,
        code: Option<String>,
    },
    ResendOtp(RegistrationDraft),
    Search(String),
    CycleCategory,
    AddToCart {
        product: ProductId,
        quantity: u32,
    },
    SetCartQuantity {
        item: CartItemId,
        quantity: u32,
    },
    RemoveCartItem(CartItemId),
    Checkout(String),
    CancelOrder(OrderId),
    Pay {
        order: OrderId,
        provider: PaymentProvider,
    },
    UploadPrescription(PrescriptionUpload),
    ShowPayment(String),
    ShowPrescription(PrescriptionId),
    SaveProfile(ProfileForm),
}

/// Completed work reported back to the event loop.
#[derive(Debug)]
pub enum AppAction {
    LoggedIn(Result<User, ApiError>),
    Registered(Result<RegistrationDraft, ApiError>),
    CodeResent(Result<(), ApiError>),
    Verified(Result<User, ApiError>),
    OtpTick(u32),
    CategoriesLoaded(Result<Vec<Category>, ApiError>),
    ProductsLoaded(Result<Vec<Product>, ApiError>),
    ProductLoaded(Result<Product, ApiError>),
    AlternativesLoaded {
        product: ProductId,
        result: Result<Vec<Product>, ApiError>,
    },
    CartLoaded(Result<Cart, ApiError>),
    CartChanged {
        result: Result<Cart, ApiError>,
        success: Option<&'static str>,
        failure: &'static str,
    },
    OrdersLoaded(Result<Vec<Order>, ApiError>),
    OrderLoaded(Result<Order, ApiError>),
    CheckedOut(Result<Order, ApiError>),
    OrderCancelled(Result<Order, ApiError>),
    PaymentCreated(Result<Payment, ApiError>),
    PaymentsLoaded(Result<Vec<Payment>, ApiError>),
    PaymentLoaded(Result<Payment, ApiError>),
    PrescriptionUploaded(Result<Prescription, ApiError>),
    PrescriptionsLoaded(Result<Vec<Prescription>, ApiError>),
    PrescriptionLoaded(Result<Prescription, ApiError>),
    DashboardLoaded(Result<Dashboard, ApiError>),
    ProfileLoaded(Result<User, ApiError>),
    ProfileSaved(Result<User, ApiError>),
    /// Delayed navigation after a success toast, dropped if the user moved on.
    Redirect { from: Route, to: Route },
}
