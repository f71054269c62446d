//! Main application orchestrator.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info, warn};

use super::cart_screen::CartScreen;
use super::catalog_screen::CatalogScreen;
use super::checkout_screen::CheckoutScreen;
use super::dashboard_screen::DashboardScreen;
use super::intent::{AppAction, Intent};
use super::login_screen::LoginScreen;
use super::notification_popup::NotificationPopup;
use super::order_detail_screen::OrderDetailScreen;
use super::orders_screen::OrdersScreen;
use super::payments_screen::PaymentsScreen;
use super::prescriptions_screen::PrescriptionsScreen;
use super::product_screen::ProductScreen;
use super::profile_screen::ProfileScreen;
use super::register_screen::RegisterScreen;
use crate::application::dto::CheckoutForm;
use crate::application::services::{
    CartStore, CatalogStore, NotificationManager, SessionContext, guard,
};
use crate::application::use_cases::{
    LoginUseCase, RegisterUseCase, UpdateProfileUseCase, VerifyOtpUseCase,
};
use crate::domain::Route;
use crate::domain::entities::{Cart, OrderStatus, SessionEvent};
use crate::domain::errors::ApiError;
use crate::domain::ports::{AuthPort, StorefrontPort};
use crate::presentation::events::{GlobalKey, global_key, is_quit_event};
use crate::presentation::widgets::{KeyHints, StatusBar};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_HISTORY: usize = 32;

/// Timings taken from the configuration file.
#[derive(Debug, Clone, Copy)]
pub struct AppSettings {
    pub notification_duration: Duration,
    pub redirect_delay: Duration,
    pub resend_cooldown: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            notification_duration: Duration::from_secs(5),
            redirect_delay: Duration::from_secs(2),
            resend_cooldown: 60,
        }
    }
}

enum Screen {
    Login(LoginScreen),
    Register(Box<RegisterScreen>),
    Catalog(CatalogScreen),
    Product(ProductScreen),
    Cart(CartScreen),
    Checkout(CheckoutScreen),
    Orders(OrdersScreen),
    OrderDetail(OrderDetailScreen),
    Payments(PaymentsScreen),
    Profile(ProfileScreen),
    Prescriptions(PrescriptionsScreen),
    Dashboard(DashboardScreen),
}

impl Screen {
    /// Screens whose keys go to text fields, so global shortcuts are off.
    const fn is_form(&self) -> bool {
        matches!(
            self,
            Self::Login(_) | Self::Register(_) | Self::Checkout(_) | Self::Profile(_)
        )
    }
}

pub struct App {
    running: bool,
    route: Route,
    history: Vec<Route>,
    screen: Screen,
    session: SessionContext,
    auth: Arc<dyn AuthPort>,
    storefront: Arc<dyn StorefrontPort>,
    login: LoginUseCase,
    register: RegisterUseCase,
    verify: VerifyOtpUseCase,
    update_profile: UpdateProfileUseCase,
    cart: CartStore,
    catalog: CatalogStore,
    notifications: NotificationManager,
    settings: AppSettings,
    action_tx: mpsc::UnboundedSender<AppAction>,
    action_rx: mpsc::UnboundedReceiver<AppAction>,
    session_events: mpsc::UnboundedReceiver<SessionEvent>,
}

impl App {
    #[must_use]
    pub fn new(
        auth: Arc<dyn AuthPort>,
        storefront: Arc<dyn StorefrontPort>,
        session: SessionContext,
        session_events: mpsc::UnboundedReceiver<SessionEvent>,
        settings: AppSettings,
    ) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let catalog = CatalogStore::new();

        Self {
            running: true,
            route: Route::Home,
            history: Vec::new(),
            screen: Screen::Catalog(CatalogScreen::new(&catalog)),
            login: LoginUseCase::new(Arc::clone(&auth), session.clone()),
            register: RegisterUseCase::new(Arc::clone(&auth)),
            verify: VerifyOtpUseCase::new(Arc::clone(&auth), session.clone()),
            update_profile: UpdateProfileUseCase::new(Arc::clone(&auth), session.clone()),
            session,
            auth,
            storefront,
            cart: CartStore::new(),
            catalog,
            notifications: NotificationManager::new(settings.notification_duration),
            settings,
            action_tx,
            action_rx,
            session_events,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be drawn.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        if let Some(user) = self.session.user() {
            info!(user_id = %user.id(), "Starting with restored session");
            self.load_cart();
        }
        self.enter(Route::Home);

        let mut terminal_events = EventStream::new();
        let mut ticker = interval(TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(event) = self.session_events.recv() => {
                    self.handle_session_event(event);
                }

                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }

                Some(Ok(event)) = terminal_events.next() => {
                    self.handle_terminal_event(event).await;
                }

                _ = ticker.tick() => {
                    self.notifications.tick();
                }
            }
            terminal.draw(|frame| self.render(frame))?;
        }

        info!("Application exiting normally");
        Ok(())
    }

    async fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key).await;
        }
    }

    fn spawn<T, F, W>(&self, future: F, wrap: W)
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
        W: FnOnce(T) -> AppAction + Send + 'static,
    {
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            if tx.send(wrap(future.await)).is_err() {
                debug!("Action receiver closed");
            }
        });
    }

    fn schedule_redirect(&self, to: Route) {
        let from = self.route;
        let delay = self.settings.redirect_delay;
        self.spawn(tokio::time::sleep(delay), move |()| AppAction::Redirect {
            from,
            to,
        });
    }

    fn navigate(&mut self, route: Route) {
        if route != self.route {
            if self.history.len() >= MAX_HISTORY {
                self.history.remove(0);
            }
            self.history.push(self.route);
        }
        self.enter(route);
    }

    fn back(&mut self) {
        let previous = self.history.pop().unwrap_or(Route::Home);
        self.enter(previous);
    }

    /// Shows `requested`, or the login screen when it needs a session.
    fn enter(&mut self, requested: Route) {
        let route = guard(requested, self.session.is_authenticated());
        if route != requested {
            self.notifications.warn(
                "Sign in required",
                format!("Sign in to open {}", requested.title()),
            );
        }

        debug!(route = %route, "Entering screen");
        self.route = route;
        self.screen = self.build_screen(route);
        self.load(route);
    }

    fn build_screen(&self, route: Route) -> Screen {
        match route {
            Route::Login => Screen::Login(LoginScreen::new()),
            Route::Register => Screen::Register(Box::new(RegisterScreen::new(
                self.settings.resend_cooldown,
                self.action_tx.clone(),
            ))),
            Route::Home => Screen::Catalog(CatalogScreen::new(&self.catalog)),
            Route::ProductDetail(id) => Screen::Product(ProductScreen::new(id)),
            Route::Cart => Screen::Cart(CartScreen::new()),
            Route::Checkout => Screen::Checkout(CheckoutScreen::new(self.session.user().as_ref())),
            Route::Orders => Screen::Orders(OrdersScreen::new()),
            Route::OrderDetail(id) => Screen::OrderDetail(OrderDetailScreen::new(id)),
            Route::Payments => Screen::Payments(PaymentsScreen::new()),
            Route::Profile => Screen::Profile(ProfileScreen::new(self.session.user().as_ref())),
            Route::Prescriptions => Screen::Prescriptions(PrescriptionsScreen::new()),
            Route::Dashboard => Screen::Dashboard(DashboardScreen::new(self.session.role())),
        }
    }

    /// Fetches what the screen for `route` shows.
    fn load(&mut self, route: Route) {
        let storefront = Arc::clone(&self.storefront);
        match route {
            Route::Login | Route::Register => {}
            Route::Home => {
                if self.catalog.categories().is_empty() {
                    self.spawn(
                        async move { storefront.list_categories().await },
                        AppAction::CategoriesLoaded,
                    );
                }
                self.fetch_products();
            }
            Route::ProductDetail(id) => {
                let alternatives = Arc::clone(&storefront);
                self.spawn(
                    async move { storefront.get_product(id).await },
                    AppAction::ProductLoaded,
                );
                self.spawn(
                    async move { alternatives.list_alternatives(id).await },
                    move |result| AppAction::AlternativesLoaded {
                        product: id,
                        result,
                    },
                );
            }
            Route::Cart => self.load_cart(),
            Route::Checkout => {
                if !self.cart.is_loaded() {
                    self.load_cart();
                }
            }
            Route::Orders => self.spawn(
                async move { storefront.list_orders().await },
                AppAction::OrdersLoaded,
            ),
            Route::OrderDetail(id) => self.spawn(
                async move { storefront.get_order(id).await },
                AppAction::OrderLoaded,
            ),
            Route::Payments => self.spawn(
                async move { storefront.list_payments().await },
                AppAction::PaymentsLoaded,
            ),
            Route::Prescriptions => self.spawn(
                async move { storefront.list_prescriptions().await },
                AppAction::PrescriptionsLoaded,
            ),
            Route::Profile => {
                let auth = Arc::clone(&self.auth);
                self.spawn(
                    async move { auth.fetch_profile().await },
                    AppAction::ProfileLoaded,
                );
            }
            Route::Dashboard => {
                let role = self.session.role();
                self.spawn(
                    async move { storefront.dashboard(role).await },
                    AppAction::DashboardLoaded,
                );
            }
        }
    }

    fn fetch_products(&self) {
        let storefront = Arc::clone(&self.storefront);
        let query = self.catalog.query();
        self.spawn(
            async move { storefront.list_products(&query).await },
            AppAction::ProductsLoaded,
        );
    }

    /// Anonymous visitors have no server cart; they see an empty one.
    fn load_cart(&mut self) {
        if !self.session.is_authenticated() {
            self.cart.replace(Cart::default());
            return;
        }
        let storefront = Arc::clone(&self.storefront);
        self.spawn(
            async move { storefront.get_cart().await },
            AppAction::CartLoaded,
        );
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if is_quit_event(&key) {
            self.running = false;
            return;
        }

        let intent = match &mut self.screen {
            Screen::Login(screen) => screen.handle_key(key),
            Screen::Register(screen) => screen.handle_key(key),
            Screen::Catalog(screen) => screen.handle_key(key, &self.catalog),
            Screen::Product(screen) => screen.handle_key(key),
            Screen::Cart(screen) => screen.handle_key(key, &self.cart),
            Screen::Checkout(screen) => screen.handle_key(key, &self.cart),
            Screen::Orders(screen) => screen.handle_key(key),
            Screen::OrderDetail(screen) => screen.handle_key(key),
            Screen::Payments(screen) => screen.handle_key(key),
            Screen::Profile(screen) => screen.handle_key(key),
            Screen::Prescriptions(screen) => screen.handle_key(key),
            Screen::Dashboard(screen) => screen.handle_key(key),
        };
        self.dispatch(intent, key).await;
    }

    #[allow(clippy::too_many_lines)]
    async fn dispatch(&mut self, intent: Intent, key: KeyEvent) {
        match intent {
            Intent::None => {}
            Intent::Unhandled => match global_key(&key) {
                Some(GlobalKey::Back) => self.back(),
                Some(GlobalKey::Navigate(route)) if !self.screen.is_form() => self.navigate(route),
                Some(GlobalKey::ToggleSession) if !self.screen.is_form() => {
                    self.toggle_session().await;
                }
                _ => {}
            },
            Intent::Navigate(route) => self.navigate(route),
            Intent::Warn(message) => self.notifications.warn("Not available", message),
            Intent::Refresh => self.load(self.route),
            Intent::Login(form) => {
                let login = self.login.clone();
                self.spawn(
                    async move { login.execute(&form).await },
                    AppAction::LoggedIn,
                );
            }
            Intent::Register(form) => {
                let register = self.register.clone();
                self.spawn(
                    async move { register.execute(&form).await },
                    AppAction::Registered,
                );
            }
            Intent::ResendOtp(draft) => {
                let register = self.register.clone();
                self.spawn(
                    async move { register.resend(&draft).await },
                    AppAction::CodeResent,
                );
            }
            Intent::VerifyOtp { draft, code } => {
                let verify = self.verify.clone();
                self.spawn(
                    async move { verify.execute(&draft, code).await },
                    AppAction::Verified,
                );
            }
            Intent::Search(text) => {
                self.catalog.set_search(text);
                self.fetch_products();
            }
            Intent::CycleCategory => {
                self.catalog.cycle_category();
                if let Screen::Catalog(screen) = &mut self.screen {
                    screen.set_loading(true);
                }
                self.fetch_products();
            }
            Intent::AddToCart { product, quantity } => {
                if !self.session.is_authenticated() {
                    self.notifications
                        .warn("Sign in required", "Sign in to add items to your cart");
                    self.navigate(Route::Login);
                    return;
                }
                let storefront = Arc::clone(&self.storefront);
                self.spawn(
                    async move { storefront.add_to_cart(product, quantity).await },
                    |result| AppAction::CartChanged {
                        result,
                        success: Some("Added to cart"),
                        failure: "Could not add the product to the cart",
                    },
                );
            }
            Intent::SetCartQuantity { item, quantity } => {
                let storefront = Arc::clone(&self.storefront);
                self.spawn(
                    async move { storefront.update_cart_item(item, quantity).await },
                    |result| AppAction::CartChanged {
                        result,
                        success: None,
                        failure: "Could not update the quantity",
                    },
                );
            }
            Intent::RemoveCartItem(item) => {
                let storefront = Arc::clone(&self.storefront);
                self.spawn(
                    async move { storefront.remove_cart_item(item).await },
                    |result| AppAction::CartChanged {
                        result,
                        success: Some("Item removed from the cart"),
                        failure: "Could not remove the item",
                    },
                );
            }
            Intent::Checkout(delivery_address) => {
                match (CheckoutForm { delivery_address }).validate() {
                    Ok(address) => {
                        let storefront = Arc::clone(&self.storefront);
                        self.spawn(
                            async move { storefront.checkout(&address).await },
                            AppAction::CheckedOut,
                        );
                    }
                    Err(errors) => {
                        if let Screen::Checkout(screen) = &mut self.screen {
                            screen.set_validation_errors(&errors);
                        }
                    }
                }
            }
            Intent::CancelOrder(id) => {
                let storefront = Arc::clone(&self.storefront);
                self.spawn(
                    async move { storefront.cancel_order(id).await },
                    AppAction::OrderCancelled,
                );
            }
            Intent::Pay { order, provider } => {
                let storefront = Arc::clone(&self.storefront);
                self.spawn(
                    async move { storefront.create_payment(order, provider).await },
                    AppAction::PaymentCreated,
                );
            }
            Intent::UploadPrescription(upload) => {
                let storefront = Arc::clone(&self.storefront);
                self.spawn(
                    async move { storefront.upload_prescription(&upload).await },
                    AppAction::PrescriptionUploaded,
                );
            }
            Intent::ShowPayment(payment_id) => {
                let storefront = Arc::clone(&self.storefront);
                self.spawn(
                    async move { storefront.get_payment(&payment_id).await },
                    AppAction::PaymentLoaded,
                );
            }
            Intent::ShowPrescription(id) => {
                let storefront = Arc::clone(&self.storefront);
                self.spawn(
                    async move { storefront.get_prescription(id).await },
                    AppAction::PrescriptionLoaded,
                );
            }
            Intent::SaveProfile(form) => {
                let update_profile = self.update_profile.clone();
                self.spawn(
                    async move { update_profile.execute(&form).await },
                    AppAction::ProfileSaved,
                );
            }
        }
    }

    async fn toggle_session(&mut self) {
        if !self.session.is_authenticated() {
            self.navigate(Route::Login);
            return;
        }
        self.session.destroy().await;
        self.cart.clear();
        self.notifications.info("Signed out", "You have been signed out");
        self.history.clear();
        self.enter(Route::Home);
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Expired => {
                if !self.session.is_authenticated() {
                    debug!("Ignoring 401 without an active session");
                    return;
                }
                warn!(route = %self.route, "Session expired, returning to login");
                self.session.invalidate();
                self.cart.clear();
                self.notifications
                    .error("Session expired", "Please sign in again");
                self.history.clear();
                self.enter(Route::Login);
            }
        }
    }

    /// Error toast for a failed request; expiry has its own handler.
    fn report(&mut self, error: &ApiError, fallback: &str) {
        if error.is_unauthorized() {
            return;
        }
        warn!(error = %error, "{fallback}");
        self.notifications.error("Error", error.user_message(fallback));
    }

    #[allow(clippy::too_many_lines)]
    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::LoggedIn(result) => {
                let Screen::Login(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(user) => {
                        self.notifications
                            .success("Signed in", format!("Welcome, {}", user.display_name()));
                        self.load_cart();
                        self.history.clear();
                        self.enter(Route::Home);
                    }
                    Err(ApiError::Validation(errors)) => screen.set_validation_errors(&errors),
                    Err(e) => {
                        let message = e.login_message();
                        screen.set_error(message.clone());
                        self.notifications.error("Sign in failed", message);
                    }
                }
            }
            AppAction::Registered(result) => {
                let Screen::Register(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(draft) => {
                        let phone = draft.phone.to_string();
                        screen.registered(draft);
                        self.notifications
                            .success("Code sent", format!("We sent a code to {phone}"));
                    }
                    Err(ApiError::Validation(errors)) => screen.set_validation_errors(&errors),
                    Err(e) => {
                        let message = e.registration_message();
                        screen.set_error(message.clone());
                        self.notifications.error("Registration failed", message);
                    }
                }
            }
            AppAction::CodeResent(result) => {
                let Screen::Register(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(()) => {
                        screen.resent();
                        self.notifications.info("Code sent", "A new code is on its way");
                    }
                    Err(e) => {
                        let message = e.registration_message();
                        screen.resend_failed(message.clone());
                        self.notifications.error("Resend failed", message);
                    }
                }
            }
            AppAction::Verified(result) => {
                let Screen::Register(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(user) => {
                        screen.verified();
                        self.notifications.success(
                            "Registration complete",
                            format!("Welcome, {}", user.display_name()),
                        );
                        self.load_cart();
                        self.schedule_redirect(Route::Home);
                    }
                    Err(ApiError::Validation(errors)) => {
                        screen.set_validation_errors(&errors);
                        self.notifications
                            .error("Verification failed", errors.to_string());
                    }
                    Err(e) => {
                        let message = e.verification_message();
                        screen.set_error(message.clone());
                        self.notifications.error("Verification failed", message);
                    }
                }
            }
            AppAction::OtpTick(remaining) => {
                if let Screen::Register(screen) = &mut self.screen {
                    screen.tick();
                } else {
                    debug!(remaining, "Dropping countdown tick for a closed screen");
                }
            }
            AppAction::CategoriesLoaded(result) => match result {
                Ok(categories) => self.catalog.replace_categories(categories),
                Err(e) => self.report(&e, "Could not load categories"),
            },
            AppAction::ProductsLoaded(result) => match result {
                Ok(products) => {
                    self.catalog.replace_products(products);
                    if let Screen::Catalog(screen) = &mut self.screen {
                        screen.products_loaded(&self.catalog);
                    }
                }
                Err(e) => {
                    if let Screen::Catalog(screen) = &mut self.screen {
                        screen.set_loading(false);
                    }
                    self.report(&e, "Could not load products");
                }
            },
            AppAction::ProductLoaded(result) => match result {
                Ok(product) => {
                    if let Screen::Product(screen) = &mut self.screen
                        && screen.id() == product.id
                    {
                        screen.set_product(product);
                    }
                }
                Err(e) => self.report(&e, "Could not load the product"),
            },
            AppAction::AlternativesLoaded { product, result } => match result {
                Ok(alternatives) => {
                    if let Screen::Product(screen) = &mut self.screen
                        && screen.id() == product
                    {
                        screen.set_alternatives(alternatives);
                    }
                }
                Err(e) => warn!(error = %e, product = %product, "Failed to load alternatives"),
            },
            AppAction::CartLoaded(result) => match result {
                Ok(cart) => {
                    self.cart.replace(cart);
                    if let Screen::Cart(screen) = &mut self.screen {
                        screen.cart_changed(&self.cart);
                    }
                }
                Err(e) => self.report(&e, "Could not load the cart"),
            },
            AppAction::CartChanged {
                result,
                success,
                failure,
            } => {
                if let Screen::Product(screen) = &mut self.screen {
                    screen.added(result.is_ok());
                }
                match result {
                    Ok(cart) => {
                        self.cart.replace(cart);
                        if let Screen::Cart(screen) = &mut self.screen {
                            screen.cart_changed(&self.cart);
                        }
                        if let Some(message) = success {
                            self.notifications.success("Cart", message);
                        }
                    }
                    Err(e) => self.report(&e, failure),
                }
            }
            AppAction::OrdersLoaded(result) => match result {
                Ok(orders) => {
                    if let Screen::Orders(screen) = &mut self.screen {
                        screen.set_orders(orders);
                    }
                }
                Err(e) => {
                    if let Screen::Orders(screen) = &mut self.screen {
                        screen.failed();
                    }
                    self.report(&e, "Could not load orders");
                }
            },
            AppAction::OrderLoaded(result) => match result {
                Ok(order) => {
                    if let Screen::OrderDetail(screen) = &mut self.screen
                        && screen.id() == order.id
                    {
                        screen.set_order(order);
                    }
                }
                Err(e) => self.report(&e, "Could not load the order"),
            },
            AppAction::CheckedOut(result) => match result {
                Ok(order) => {
                    info!(order_id = %order.id, status = ?order.status, "Order placed");
                    self.cart.clear();
                    self.notifications
                        .success("Order placed", format!("Order #{} was created", order.id));
                    let next = if order.status == OrderStatus::AwaitingPayment {
                        Route::OrderDetail(order.id)
                    } else {
                        Route::Orders
                    };
                    self.schedule_redirect(next);
                }
                Err(e) => {
                    if let Screen::Checkout(screen) = &mut self.screen {
                        screen.failed();
                    }
                    self.report(&e, "Could not place the order");
                }
            },
            AppAction::OrderCancelled(result) => {
                let success = result.is_ok();
                match result {
                    Ok(order) => self
                        .notifications
                        .success("Order cancelled", format!("Order #{} was cancelled", order.id)),
                    Err(e) => self.report(&e, "Could not cancel the order"),
                }
                self.order_mutation_finished(success);
            }
            AppAction::PaymentCreated(result) => {
                let success = result.is_ok();
                match result {
                    Ok(payment) => self.notifications.info(
                        "Payment created",
                        format!(
                            "{} payment for order #{} is {}",
                            payment.provider.label(),
                            payment.order_id,
                            payment.status.label().to_lowercase()
                        ),
                    ),
                    Err(e) => self.report(&e, "Could not create the payment"),
                }
                self.order_mutation_finished(success);
            }
            AppAction::PaymentsLoaded(result) => match result {
                Ok(payments) => {
                    if let Screen::Payments(screen) = &mut self.screen {
                        screen.set_payments(payments);
                    }
                }
                Err(e) => {
                    if let Screen::Payments(screen) = &mut self.screen {
                        screen.failed();
                    }
                    self.report(&e, "Could not load payments");
                }
            },
            AppAction::PaymentLoaded(result) => match result {
                Ok(payment) => {
                    if let Screen::Payments(screen) = &mut self.screen {
                        screen.set_detail(payment);
                    }
                }
                Err(e) => self.report(&e, "Could not load the payment"),
            },
            AppAction::PrescriptionUploaded(result) => {
                let success = result.is_ok();
                match result {
                    Ok(prescription) => self.notifications.success(
                        "Prescription uploaded",
                        format!(
                            "Prescription #{} is {}",
                            prescription.id.0,
                            prescription.status.label().to_lowercase()
                        ),
                    ),
                    Err(e) => self.report(&e, "Could not upload the prescription"),
                }
                if let Screen::Prescriptions(screen) = &mut self.screen {
                    screen.upload_finished(success);
                    if success {
                        self.load(Route::Prescriptions);
                    }
                } else {
                    self.order_mutation_finished(success);
                }
            }
            AppAction::PrescriptionsLoaded(result) => match result {
                Ok(prescriptions) => {
                    if let Screen::Prescriptions(screen) = &mut self.screen {
                        screen.set_prescriptions(prescriptions);
                    }
                }
                Err(e) => {
                    if let Screen::Prescriptions(screen) = &mut self.screen {
                        screen.failed();
                    }
                    self.report(&e, "Could not load prescriptions");
                }
            },
            AppAction::PrescriptionLoaded(result) => match result {
                Ok(prescription) => {
                    if let Screen::Prescriptions(screen) = &mut self.screen {
                        screen.set_detail(prescription);
                    }
                }
                Err(e) => self.report(&e, "Could not load the prescription"),
            },
            AppAction::DashboardLoaded(result) => match result {
                Ok(dashboard) => {
                    if let Screen::Dashboard(screen) = &mut self.screen {
                        screen.set_dashboard(dashboard);
                    }
                }
                Err(e) => {
                    if let Screen::Dashboard(screen) = &mut self.screen {
                        screen.failed();
                    }
                    self.report(&e, "Could not load the dashboard");
                }
            },
            AppAction::ProfileLoaded(result) => match result {
                Ok(user) => {
                    if let Screen::Profile(screen) = &mut self.screen {
                        screen.load(&user);
                    }
                }
                Err(e) => self.report(&e, "Could not load the profile"),
            },
            AppAction::ProfileSaved(result) => {
                let Screen::Profile(screen) = &mut self.screen else {
                    return;
                };
                match result {
                    Ok(user) => {
                        screen.saved(&user);
                        self.notifications.success("Profile", "Profile saved");
                    }
                    Err(ApiError::Validation(errors)) => screen.set_validation_errors(&errors),
                    Err(e) => {
                        screen.failed();
                        self.report(&e, "Could not save the profile");
                    }
                }
            }
            AppAction::Redirect { from, to } => {
                if self.route == from {
                    self.navigate(to);
                } else {
                    debug!(from = %from, to = %to, "Skipping redirect, screen changed");
                }
            }
        }
    }

    /// Re-fetches the open order after any mutation on it.
    fn order_mutation_finished(&mut self, success: bool) {
        if let Screen::OrderDetail(screen) = &mut self.screen {
            screen.action_finished(success);
            let route = Route::OrderDetail(screen.id());
            self.load(route);
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let account = match self.session.user() {
            Some(user) => format!(
                "{} | Cart: {} ",
                user.display_name(),
                self.cart.item_count()
            ),
            None => "Guest ".to_string(),
        };
        frame.render_widget(
            &StatusBar::new()
                .left(" Dorixona")
                .center(self.route.to_string())
                .right(account),
            header,
        );

        let mut hints: Vec<(&str, &str)> = match &mut self.screen {
            Screen::Login(screen) => {
                frame.render_widget(&*screen, body);
                LoginScreen::hints().to_vec()
            }
            Screen::Register(screen) => {
                frame.render_widget(&**screen, body);
                screen.hints().to_vec()
            }
            Screen::Catalog(screen) => {
                screen.render(body, frame.buffer_mut(), &self.catalog);
                screen.hints().to_vec()
            }
            Screen::Product(screen) => {
                frame.render_widget(&mut *screen, body);
                ProductScreen::hints().to_vec()
            }
            Screen::Cart(screen) => {
                screen.render(body, frame.buffer_mut(), &self.cart);
                CartScreen::hints().to_vec()
            }
            Screen::Checkout(screen) => {
                screen.render(body, frame.buffer_mut(), &self.cart);
                CheckoutScreen::hints().to_vec()
            }
            Screen::Orders(screen) => {
                frame.render_widget(&mut *screen, body);
                OrdersScreen::hints().to_vec()
            }
            Screen::OrderDetail(screen) => {
                frame.render_widget(&*screen, body);
                screen.hints()
            }
            Screen::Payments(screen) => {
                frame.render_widget(&mut *screen, body);
                PaymentsScreen::hints().to_vec()
            }
            Screen::Profile(screen) => {
                frame.render_widget(&*screen, body);
                ProfileScreen::hints().to_vec()
            }
            Screen::Prescriptions(screen) => {
                frame.render_widget(&mut *screen, body);
                screen.hints().to_vec()
            }
            Screen::Dashboard(screen) => {
                frame.render_widget(&*screen, body);
                DashboardScreen::hints().to_vec()
            }
        };

        if !self.screen.is_form() {
            hints.push(("1-7", "Screens"));
            hints.push((
                "l",
                if self.session.is_authenticated() {
                    "Sign out"
                } else {
                    "Sign in"
                },
            ));
        }
        hints.push(("Ctrl+C", "Quit"));
        frame.render_widget(KeyHints::new(&hints), footer);

        if let Some(notification) = self.notifications.current_notification() {
            frame.render_widget(NotificationPopup::new(notification), frame.area());
        }
    }
}
