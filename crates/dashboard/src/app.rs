//! Application wiring: one set of services and shared state per process.

use std::sync::Arc;
use std::time::Duration;

use smp_client::resource::{ClientService, OrderService, ProductService, UserService};
use smp_client::{
    ApiClient, ApiError, AuthService, ClientConfig, CookieJar, DeviceService, FlashStore,
    LogService, Navigator, SessionManager,
};
use smp_core::{Client, Order, Product};
use smp_notify::{FlashMessage, NotificationChannel, Notifier};

use crate::error_screen::ErrorScreen;
use crate::forms::{ClientForm, FormController, FormLoad, OrderForm, ProductForm, UserForm};
use crate::routes::{RouteDecision, gate};
use crate::screens;
use crate::search::{ExternalOrderSync, SearchSelect};

/// Wait before a freshly mounted page drains the flash cookie.
pub const FLASH_DRAIN_DELAY: Duration = Duration::from_millis(150);

/// Shared application state handed to every screen.
#[derive(Clone)]
pub struct Dashboard {
    pub config: ClientConfig,
    pub notifications: NotificationChannel,
    pub navigator: Arc<dyn Navigator>,
    pub session: SessionManager,
    pub api: Arc<ApiClient>,
    pub auth: AuthService,
    pub orders: OrderService,
    pub products: ProductService,
    pub clients: ClientService,
    pub users: UserService,
    pub devices: DeviceService,
    pub logs: LogService,
}

impl Dashboard {
    pub fn new(config: ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self, ApiError> {
        Self::with_jar(config, navigator, CookieJar::new())
    }

    /// Wire everything over an existing cookie jar (e.g. one restored from disk).
    pub fn with_jar(
        config: ClientConfig,
        navigator: Arc<dyn Navigator>,
        jar: CookieJar,
    ) -> Result<Self, ApiError> {
        let notifications = NotificationChannel::new(config.toast_duration);
        let notifier: Arc<dyn Notifier> = Arc::new(notifications.clone());
        let session = SessionManager::new(jar.clone());
        let api = Arc::new(ApiClient::new(
            &config,
            session.clone(),
            FlashStore::new(jar),
            notifier,
            navigator.clone(),
        )?);

        tracing::info!(api_url = %config.api_url, "dashboard wired");

        Ok(Self {
            auth: AuthService::new(api.clone()),
            orders: OrderService::new(api.clone()),
            products: ProductService::new(api.clone()),
            clients: ClientService::new(api.clone()),
            users: UserService::new(api.clone()),
            devices: DeviceService::new(api.clone()),
            logs: LogService::new(api.clone()),
            config,
            notifications,
            navigator,
            session,
            api,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn gate(&self, path: &str) -> RouteDecision {
        gate(&self.config.paths, path, self.is_authenticated())
    }

    /// Enter `path`: apply route gating, then drain any flash staged by the
    /// previous page into the notification channel.
    pub async fn mount(&self, path: &str) -> (RouteDecision, Option<FlashMessage>) {
        let decision = self.gate(path);
        match decision.target(&self.config.paths) {
            Some(target) => {
                tracing::info!(from = path, to = target, "route redirected");
                self.navigator.navigate(target);
            }
            None if self.navigator.current_path() != path => self.navigator.navigate(path),
            None => {}
        }
        let flash = self
            .api
            .flash()
            .drain_after(FLASH_DRAIN_DELAY, &self.notifications)
            .await;
        (decision, flash)
    }

    pub fn error_screen(&self, location: &str) -> (ErrorScreen, String) {
        let screen = ErrorScreen::from_location(location);
        let link = screen.contact_support_link(&self.config.support_email);
        (screen, link)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Screens
    // ─────────────────────────────────────────────────────────────────────

    pub fn orders_list(&self) -> screens::OrdersList {
        screens::orders(self.orders.clone(), self.config.page_size)
    }

    pub fn products_list(&self) -> screens::ProductsList {
        screens::products(self.products.clone(), self.config.page_size)
    }

    pub fn clients_list(&self) -> screens::ClientsList {
        screens::clients(self.clients.clone(), self.config.page_size)
    }

    pub fn users_list(&self) -> screens::UsersList {
        screens::users(self.users.clone(), self.config.page_size)
    }

    pub fn devices_list(&self) -> screens::DevicesList {
        screens::devices(self.devices.clone(), self.config.page_size)
    }

    pub fn logs_list(&self) -> screens::LogsList {
        screens::logs(self.logs.clone(), self.config.page_size)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Search widgets
    // ─────────────────────────────────────────────────────────────────────

    /// Order lookup with the "sync from ERP" fallback.
    pub fn order_search(&self) -> SearchSelect<Order> {
        SearchSelect::<Order>::new(Arc::new(self.orders.clone()), self.config.search_debounce)
            .with_fallback(Arc::new(ExternalOrderSync::new(self.orders.clone())))
            .with_notifier(self.api.notifier().clone())
    }

    pub fn client_search(&self) -> SearchSelect<Client> {
        SearchSelect::<Client>::new(Arc::new(self.clients.clone()), self.config.search_debounce)
    }

    pub fn product_search(&self) -> SearchSelect<Product> {
        SearchSelect::<Product>::new(Arc::new(self.products.clone()), self.config.search_debounce)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Forms
    // ─────────────────────────────────────────────────────────────────────

    pub fn new_order(&self) -> FormController<OrderForm> {
        FormController::create(self.orders.clone())
    }

    pub async fn edit_order(&self, raw_id: &str) -> FormLoad<OrderForm> {
        FormController::open_edit(self.orders.clone(), raw_id).await
    }

    pub fn new_product(&self) -> FormController<ProductForm> {
        FormController::create(self.products.clone())
    }

    pub async fn edit_product(&self, raw_id: &str) -> FormLoad<ProductForm> {
        FormController::open_edit(self.products.clone(), raw_id).await
    }

    pub fn new_client(&self) -> FormController<ClientForm> {
        FormController::create(self.clients.clone())
    }

    pub async fn edit_client(&self, raw_id: &str) -> FormLoad<ClientForm> {
        FormController::open_edit(self.clients.clone(), raw_id).await
    }

    pub fn new_user(&self) -> FormController<UserForm> {
        FormController::create(self.users.clone())
    }

    pub async fn edit_user(&self, raw_id: &str) -> FormLoad<UserForm> {
        FormController::open_edit(self.users.clone(), raw_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smp_client::MemoryNavigator;
    use smp_core::Severity;

    fn dashboard(nav: &Arc<MemoryNavigator>) -> Dashboard {
        Dashboard::new(ClientConfig::new("http://127.0.0.1:9/api"), nav.clone()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn anonymous_mount_redirects_to_login() {
        let nav = Arc::new(MemoryNavigator::new("/"));
        let app = dashboard(&nav);
        let (decision, _) = app.mount("/orders").await;
        assert_eq!(decision, RouteDecision::RedirectToLogin);
        assert_eq!(nav.current_location(), "/login");
    }

    #[tokio::test(start_paused = true)]
    async fn mount_drains_staged_flash_once() {
        let nav = Arc::new(MemoryNavigator::new("/login"));
        let app = dashboard(&nav);
        app.session.set_token("t");
        app.api
            .flash()
            .stage(&FlashMessage::new("Welcome back", Severity::Success));

        let (decision, flash) = app.mount("/dashboard").await;
        assert_eq!(decision, RouteDecision::Allow);
        assert_eq!(flash.map(|f| f.message).as_deref(), Some("Welcome back"));
        assert_eq!(
            app.notifications.current().map(|t| t.message).as_deref(),
            Some("Welcome back")
        );

        let (_, again) = app.mount("/orders").await;
        assert!(again.is_none());
        assert_eq!(nav.current_location(), "/orders");
    }

    #[tokio::test]
    async fn invalid_form_is_toasted_and_kept() {
        let nav = Arc::new(MemoryNavigator::new("/clients/new"));
        let app = dashboard(&nav);
        let mut form = app.new_client();
        form.form.name = "   ".into();

        let err = form.submit().await.unwrap_err();
        assert!(matches!(err, ApiError::Local(_)));
        assert_eq!(form.form.name, "   ");
        assert_eq!(nav.current_location(), "/clients/new");
        let toast = app.notifications.current().unwrap();
        assert_eq!(toast.severity, Severity::Warning);
        assert_eq!(toast.message, "Name is required");
    }

    #[tokio::test]
    async fn malformed_route_id_yields_not_found() {
        let nav = Arc::new(MemoryNavigator::new("/orders/abc/edit"));
        let app = dashboard(&nav);
        assert!(matches!(app.edit_order("abc").await, FormLoad::NotFound));
        assert_eq!(nav.history().len(), 1);
    }

    #[test]
    fn error_screen_uses_configured_support_address() {
        let nav = Arc::new(MemoryNavigator::new("/error"));
        let app = dashboard(&nav);
        let (screen, link) = app.error_screen("/error?code=503");
        assert_eq!(screen.params.code, "503");
        assert!(link.starts_with("mailto:support@smp.local?"));
    }
}
