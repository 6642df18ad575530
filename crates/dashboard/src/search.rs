//! Debounced remote search with an optional fallback action.
//!
//! Per widget: `Idle -> Typing -> (quiet period) -> Searching -> Results | Empty`.
//! Every keystroke supersedes both the running quiet period and any search
//! still in flight; a superseded response is dropped on arrival.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use smp_client::{ApiError, Resource, ResourceService};
use smp_core::{Client, Device, Order, OrderCode, Product, Severity, User};
use smp_notify::Notifier;

use crate::debounce::KeyedDebouncer;
use crate::sequence::Sequence;

/// Something a search widget can list and select.
pub trait SearchItem: Clone + Send + Sync + 'static {
    /// Visible text once selected.
    fn label(&self) -> String;
}

impl SearchItem for Order {
    fn label(&self) -> String {
        self.code.to_string()
    }
}

impl SearchItem for Product {
    fn label(&self) -> String {
        Product::label(self)
    }
}

impl SearchItem for Client {
    fn label(&self) -> String {
        self.name.clone()
    }
}

impl SearchItem for User {
    fn label(&self) -> String {
        format!("{} ({})", self.full_name(), self.username)
    }
}

impl SearchItem for Device {
    fn label(&self) -> String {
        self.mac_address.clone()
    }
}

/// The remote lookup behind a widget.
#[async_trait]
pub trait SearchSource<T>: Send + Sync {
    async fn search(&self, text: &str) -> Result<Vec<T>, ApiError>;
}

#[async_trait]
impl<R> SearchSource<R> for ResourceService<R>
where
    R: Resource + SearchItem,
{
    async fn search(&self, text: &str) -> Result<Vec<R>, ApiError> {
        ResourceService::search(self, text).await
    }
}

/// Secondary call offered when a search comes back empty.
#[async_trait]
pub trait FallbackAction: Send + Sync {
    /// Button text, e.g. "Sync from ERP".
    fn label(&self) -> String;

    async fn run(&self, text: &str) -> Result<(), ApiError>;
}

/// Imports the typed order code from the external ERP.
#[derive(Clone)]
pub struct ExternalOrderSync {
    orders: ResourceService<Order>,
}

impl ExternalOrderSync {
    pub fn new(orders: ResourceService<Order>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl FallbackAction for ExternalOrderSync {
    fn label(&self) -> String {
        "Sync from ERP".to_string()
    }

    async fn run(&self, text: &str) -> Result<(), ApiError> {
        let code = OrderCode::normalize(text)?;
        self.orders.sync_external(&code).await.map(|_| ())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Typing,
    Searching,
    Results,
    Empty,
}

/// Read-only view of a widget for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSnapshot<T> {
    pub phase: SearchPhase,
    pub text: String,
    pub results: Vec<T>,
    pub selected: Option<T>,
    pub open: bool,
    /// Present while the widget is `Empty` and a fallback is configured.
    pub fallback_label: Option<String>,
}

#[derive(Debug)]
struct SearchState<T> {
    phase: SearchPhase,
    text: String,
    results: Vec<T>,
    selected: Option<T>,
    open: bool,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            phase: SearchPhase::Idle,
            text: String::new(),
            results: Vec::new(),
            selected: None,
            open: false,
        }
    }
}

type SelectCallback<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Generic async select widget.
pub struct SearchSelect<T: SearchItem> {
    state: Mutex<SearchState<T>>,
    source: Arc<dyn SearchSource<T>>,
    fallback: Option<Arc<dyn FallbackAction>>,
    on_select: Option<SelectCallback<T>>,
    notifier: Option<Arc<dyn Notifier>>,
    /// Keyed on the input text; the applied key is the last externally
    /// supplied (or searched) value.
    debouncer: KeyedDebouncer<String>,
    seq: Sequence,
}

impl<T: SearchItem> SearchSelect<T> {
    pub fn new(source: Arc<dyn SearchSource<T>>, debounce: Duration) -> Self {
        Self {
            state: Mutex::new(SearchState::default()),
            source,
            fallback: None,
            on_select: None,
            notifier: None,
            debouncer: KeyedDebouncer::new(debounce),
            seq: Sequence::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackAction>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Toast target for failures the gateway did not already surface.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Parent hook; receives the full selected object.
    pub fn on_select(mut self, f: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_select = Some(Arc::new(f));
        self
    }

    fn lock(&self) -> MutexGuard<'_, SearchState<T>> {
        self.state.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn snapshot(&self) -> SearchSnapshot<T> {
        let st = self.lock();
        let fallback_label = match (&self.fallback, st.phase) {
            (Some(f), SearchPhase::Empty) => Some(f.label()),
            _ => None,
        };
        SearchSnapshot {
            phase: st.phase,
            text: st.text.clone(),
            results: st.results.clone(),
            selected: st.selected.clone(),
            open: st.open,
            fallback_label,
        }
    }

    /// Programmatic pre-fill (e.g. an edit form seeding its current value).
    /// Never triggers a search.
    pub fn prefill(&self, item: Option<&T>) {
        self.seq.invalidate();
        let label = item.map(SearchItem::label).unwrap_or_default();
        self.debouncer.mark_applied(label.clone());
        let mut st = self.lock();
        st.text = label;
        st.selected = item.cloned();
        st.phase = SearchPhase::Idle;
        st.open = false;
    }

    /// Keystroke handler. Resolves once this input either searched or was
    /// superseded.
    pub async fn input(&self, text: &str) {
        {
            let mut st = self.lock();
            self.seq.invalidate();
            st.text = text.to_string();
            st.phase = SearchPhase::Typing;
        }

        let Some(text) = self.debouncer.settle(text.to_string()).await else {
            // Superseded, or unchanged from the applied value.
            let mut st = self.lock();
            if st.phase == SearchPhase::Typing && self.debouncer.applied().as_ref() == Some(&st.text) {
                st.phase = SearchPhase::Idle;
                st.open = false;
            }
            return;
        };

        if text.trim().is_empty() {
            let mut st = self.lock();
            st.phase = SearchPhase::Idle;
            st.results.clear();
            st.open = false;
            return;
        }

        self.run_search(&text).await;
    }

    /// Search `text` now and apply the response if it is still current.
    /// Returns whether the response was applied.
    async fn run_search(&self, text: &str) -> bool {
        let ticket = self.seq.next();
        self.lock().phase = SearchPhase::Searching;

        let outcome = self.source.search(text).await;

        if !self.seq.is_current(ticket) {
            tracing::warn!(query = text, "discarding stale search response");
            return false;
        }

        let mut st = self.lock();
        match outcome {
            Ok(items) => {
                st.phase = if items.is_empty() {
                    SearchPhase::Empty
                } else {
                    SearchPhase::Results
                };
                st.results = items;
                st.open = true;
            }
            Err(e) => {
                tracing::debug!(error = %e, "search failed");
                st.phase = SearchPhase::Idle;
                st.open = false;
            }
        }
        true
    }

    /// Pick `item`: close, fix the label, notify the parent.
    pub fn select(&self, item: T) {
        self.seq.invalidate();
        let label = item.label();
        self.debouncer.mark_applied(label.clone());
        {
            let mut st = self.lock();
            st.text = label;
            st.selected = Some(item.clone());
            st.phase = SearchPhase::Idle;
            st.open = false;
        }
        if let Some(cb) = &self.on_select {
            cb(&item);
        }
    }

    /// Close the dropdown; the selection is untouched.
    pub fn click_outside(&self) {
        let mut st = self.lock();
        st.open = false;
        if matches!(st.phase, SearchPhase::Results | SearchPhase::Empty) {
            st.phase = SearchPhase::Idle;
        }
    }

    /// Run the fallback for the current text, search again, and auto-select
    /// the first hit. `None` (dropdown closed) when nothing turned up.
    pub async fn run_fallback(&self) -> Option<T> {
        let fallback = self.fallback.clone()?;
        let text = {
            let st = self.lock();
            if st.phase != SearchPhase::Empty {
                return None;
            }
            st.text.clone()
        };

        tracing::info!(query = %text, action = %fallback.label(), "running search fallback");
        if let Err(e) = fallback.run(&text).await {
            tracing::debug!(error = %e, "fallback failed");
            if let Some(notifier) = self.notifier.as_ref().filter(|_| !e.is_handled()) {
                notifier.notify(&e.user_message(), Severity::Warning);
            }
            self.close();
            return None;
        }

        if !self.run_search(&text).await {
            return None;
        }

        let hit = self.lock().results.first().cloned();
        match hit {
            Some(item) => {
                self.select(item.clone());
                Some(item)
            }
            None => {
                self.close();
                None
            }
        }
    }

    fn close(&self) {
        let mut st = self.lock();
        st.open = false;
        st.phase = SearchPhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smp_core::{ClientId, OrderId, OrderStatus};
    use smp_notify::NotificationChannel;
    use tokio::time::Instant;

    fn order(id: i64, code: &str) -> Order {
        Order {
            id: OrderId::new(id),
            code: OrderCode::normalize(code).unwrap(),
            client_id: None,
            client_name: None,
            product_id: None,
            product_code: None,
            product_description: None,
            total_quantity: 10,
            produced_quantity: 0,
            delivery_date: None,
            status: OrderStatus::Released,
        }
    }

    /// In-memory order store that records each query with its time.
    #[derive(Default)]
    struct FakeOrders {
        local: Mutex<Vec<Order>>,
        external: Mutex<Vec<Order>>,
        calls: Mutex<Vec<(String, Instant)>>,
        delays: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl SearchSource<Order> for FakeOrders {
        async fn search(&self, text: &str) -> Result<Vec<Order>, ApiError> {
            self.calls
                .lock()
                .unwrap()
                .push((text.to_string(), Instant::now()));
            let delay = {
                let mut d = self.delays.lock().unwrap();
                if d.is_empty() { None } else { Some(d.remove(0)) }
            };
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            let needle = text.trim().to_uppercase();
            Ok(self
                .local
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.code.as_str().contains(&needle))
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl FallbackAction for FakeOrders {
        fn label(&self) -> String {
            "Sync".to_string()
        }

        async fn run(&self, text: &str) -> Result<(), ApiError> {
            let code = OrderCode::normalize(text)?;
            let found: Vec<Order> = self
                .external
                .lock()
                .unwrap()
                .iter()
                .filter(|o| o.code == code)
                .cloned()
                .collect();
            self.local.lock().unwrap().extend(found);
            Ok(())
        }
    }

    fn widget(store: &Arc<FakeOrders>) -> Arc<SearchSelect<Order>> {
        Arc::new(
            SearchSelect::<Order>::new(store.clone(), Duration::from_millis(500))
                .with_fallback(store.clone()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn typing_within_quiet_period_searches_once() {
        let store = Arc::new(FakeOrders::default());
        let w = widget(&store);
        let t0 = Instant::now();

        let first = {
            let w = w.clone();
            tokio::spawn(async move { w.input("AB").await })
        };
        tokio::time::sleep(Duration::from_millis(300)).await;
        let second = {
            let w = w.clone();
            tokio::spawn(async move { w.input("ABC").await })
        };
        first.await.unwrap();
        second.await.unwrap();

        let calls = store.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "ABC");
        assert!(calls[0].1 - t0 >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn prefilled_value_is_not_searched() {
        let store = Arc::new(FakeOrders::default());
        let w = widget(&store);
        let o = order(1, "42");
        w.prefill(Some(&o));

        w.input("OP-0000042").await;
        assert!(store.calls.lock().unwrap().is_empty());
        assert_eq!(w.snapshot().phase, SearchPhase::Idle);
        assert_eq!(w.snapshot().selected, Some(o));
    }

    #[tokio::test(start_paused = true)]
    async fn results_and_selection() {
        let store = Arc::new(FakeOrders::default());
        store.local.lock().unwrap().push(order(7, "7"));
        let picked = Arc::new(Mutex::new(None));
        let w = {
            let picked = picked.clone();
            SearchSelect::<Order>::new(store.clone(), Duration::from_millis(500))
                .on_select(move |o: &Order| *picked.lock().unwrap() = Some(o.id))
        };

        w.input("0007").await;
        let snap = w.snapshot();
        assert_eq!(snap.phase, SearchPhase::Results);
        assert!(snap.open);

        w.select(snap.results[0].clone());
        let snap = w.snapshot();
        assert!(!snap.open);
        assert_eq!(snap.text, "OP-0000007");
        assert_eq!(*picked.lock().unwrap(), Some(OrderId::new(7)));
    }

    #[tokio::test(start_paused = true)]
    async fn click_outside_keeps_selection() {
        let store = Arc::new(FakeOrders::default());
        store.local.lock().unwrap().push(order(1, "1"));
        let w = widget(&store);
        let o = order(1, "1");
        w.select(o.clone());

        w.input("000").await;
        assert!(w.snapshot().open);
        w.click_outside();
        let snap = w.snapshot();
        assert!(!snap.open);
        assert_eq!(snap.selected, Some(o));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_is_discarded() {
        let store = Arc::new(FakeOrders::default());
        store.local.lock().unwrap().extend([order(1, "111"), order(2, "222")]);
        // The first search is slow; the second returns immediately.
        store.delays.lock().unwrap().push(Duration::from_secs(2));
        let w = widget(&store);

        let slow = {
            let w = w.clone();
            tokio::spawn(async move { w.input("111").await })
        };
        tokio::time::sleep(Duration::from_millis(600)).await;
        store.delays.lock().unwrap().push(Duration::ZERO);
        w.input("222").await;
        slow.await.unwrap();

        let snap = w.snapshot();
        assert_eq!(snap.results.len(), 1);
        assert_eq!(snap.results[0].id, OrderId::new(2));
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_the_box_drops_the_running_search() {
        let store = Arc::new(FakeOrders::default());
        store.local.lock().unwrap().push(order(1, "111"));
        store.delays.lock().unwrap().push(Duration::from_secs(2));
        let w = widget(&store);

        let slow = {
            let w = w.clone();
            tokio::spawn(async move { w.input("111").await })
        };
        tokio::time::sleep(Duration::from_millis(600)).await;
        w.input("").await;
        slow.await.unwrap();

        let snap = w.snapshot();
        assert_eq!(snap.text, "");
        assert!(!snap.open);
        assert_eq!(snap.phase, SearchPhase::Idle);
        assert!(snap.results.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn response_landing_during_new_typing_is_dropped() {
        let store = Arc::new(FakeOrders::default());
        store.local.lock().unwrap().extend([order(1, "111"), order(2, "222")]);
        store.delays.lock().unwrap().push(Duration::from_millis(300));
        let w = widget(&store);

        let slow = {
            let w = w.clone();
            tokio::spawn(async move { w.input("111").await })
        };
        // The first search is in flight from 500ms to 800ms.
        tokio::time::sleep(Duration::from_millis(600)).await;
        let typing = {
            let w = w.clone();
            tokio::spawn(async move { w.input("222").await })
        };
        tokio::time::sleep(Duration::from_millis(300)).await;
        slow.await.unwrap();

        let snap = w.snapshot();
        assert_eq!(snap.text, "222");
        assert_eq!(snap.phase, SearchPhase::Typing);
        assert!(!snap.open);
        assert!(snap.results.is_empty());

        typing.await.unwrap();
        let snap = w.snapshot();
        assert_eq!(snap.phase, SearchPhase::Results);
        assert_eq!(snap.results.iter().map(|o| o.id).collect::<Vec<_>>(), [OrderId::new(2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn fallback_sync_auto_selects_imported_order() {
        let store = Arc::new(FakeOrders::default());
        store.external.lock().unwrap().push(order(9, "1234567"));
        let w = widget(&store);

        w.input("OP-1234567").await;
        let snap = w.snapshot();
        assert_eq!(snap.phase, SearchPhase::Empty);
        assert_eq!(snap.fallback_label.as_deref(), Some("Sync"));

        let picked = w.run_fallback().await;
        assert_eq!(picked.map(|o| o.id), Some(OrderId::new(9)));
        let snap = w.snapshot();
        assert!(!snap.open);
        assert_eq!(snap.text, "OP-1234567");
    }

    #[tokio::test(start_paused = true)]
    async fn fallback_without_match_closes() {
        let store = Arc::new(FakeOrders::default());
        let w = widget(&store);

        w.input("5").await;
        assert_eq!(w.run_fallback().await, None);
        let snap = w.snapshot();
        assert!(!snap.open);
        assert_eq!(snap.selected, None);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_code_in_fallback_raises_warning() {
        let store = Arc::new(FakeOrders::default());
        let channel = NotificationChannel::new(Duration::from_secs(5));
        let w = SearchSelect::<Order>::new(store.clone(), Duration::from_millis(500))
            .with_fallback(store.clone())
            .with_notifier(Arc::new(channel.clone()));

        w.input("ABC").await;
        assert_eq!(w.snapshot().phase, SearchPhase::Empty);

        assert_eq!(w.run_fallback().await, None);
        let toast = channel.current().expect("warning toast");
        assert_eq!(toast.severity, Severity::Warning);
        assert!(!toast.message.is_empty());
        assert!(!w.snapshot().open);
    }

    #[test]
    fn labels() {
        let c = Client {
            id: ClientId::new(1),
            name: "Acme".into(),
        };
        assert_eq!(SearchItem::label(&c), "Acme");
        assert_eq!(SearchItem::label(&order(3, "3")), "OP-0000003");
    }
}
