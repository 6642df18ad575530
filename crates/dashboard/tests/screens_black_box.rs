use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use serde_json::{Value, json};
use smp_client::{ClientConfig, MemoryNavigator};
use smp_core::{Client, ClientId, OrderId, Product, ProductId, Severity};
use smp_dashboard::{Dashboard, SearchPhase};

/// In-memory order store plus an "external ERP" the sync endpoint imports from.
#[derive(Clone, Default)]
struct Backend {
    orders: Arc<Mutex<Vec<Value>>>,
    external: Arc<Mutex<Vec<Value>>>,
}

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(backend: Backend) -> Self {
        let app = Router::new()
            .route(
                "/api/orders",
                get(list_orders).post(create_order).delete(delete_orders),
            )
            .route("/api/orders/search", get(search_orders))
            .route("/api/orders/sync/:code", post(sync_order))
            .with_state(backend);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            handle,
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn order_json(id: i64) -> Value {
    json!({
        "id": id,
        "code": format!("OP-{:07}", id),
        "totalQuantity": 100,
        "producedQuantity": 0,
        "status": "RELEASED"
    })
}

fn ok(data: Value) -> Json<Value> {
    Json(json!({ "severity": "SUCCESS", "data": data }))
}

async fn list_orders(
    State(b): State<Backend>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    let page: usize = q.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    let size: usize = q.get("size").and_then(|s| s.parse().ok()).unwrap_or(10);
    let all = b.orders.lock().unwrap().clone();
    let content: Vec<Value> = all.iter().skip(page * size).take(size).cloned().collect();
    ok(json!({
        "content": content,
        "page": {
            "size": size,
            "number": page,
            "totalElements": all.len(),
            "totalPages": all.len().div_ceil(size),
        }
    }))
}

async fn create_order(State(b): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    let mut orders = b.orders.lock().unwrap();
    let mut created = order_json(orders.len() as i64 + 100);
    for key in ["code", "clientId", "productId", "totalQuantity", "producedQuantity"] {
        created[key] = body[key].clone();
    }
    orders.push(created.clone());
    Json(json!({ "severity": "SUCCESS", "message": "Order created", "data": created }))
}

async fn delete_orders(State(b): State<Backend>, Json(body): Json<Value>) -> Json<Value> {
    let ids: Vec<i64> = body["ids"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();
    b.orders
        .lock()
        .unwrap()
        .retain(|o| !ids.contains(&o["id"].as_i64().unwrap_or_default()));
    Json(json!({ "severity": "SUCCESS", "message": "Orders deleted" }))
}

async fn search_orders(
    State(b): State<Backend>,
    Query(q): Query<HashMap<String, String>>,
) -> Json<Value> {
    let needle = q.get("query").cloned().unwrap_or_default().to_uppercase();
    let hits: Vec<Value> = b
        .orders
        .lock()
        .unwrap()
        .iter()
        .filter(|o| o["code"].as_str().is_some_and(|c| c.contains(&needle)))
        .cloned()
        .collect();
    ok(json!(hits))
}

async fn sync_order(
    State(b): State<Backend>,
    Path(code): Path<String>,
) -> (StatusCode, Json<Value>) {
    let found = b
        .external
        .lock()
        .unwrap()
        .iter()
        .find(|o| o["code"] == code.as_str())
        .cloned();
    match found {
        Some(order) => {
            b.orders.lock().unwrap().push(order.clone());
            (
                StatusCode::OK,
                Json(json!({ "severity": "SUCCESS", "message": "Order imported", "data": order })),
            )
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "severity": "WARNING", "message": "Unknown order code" })),
        ),
    }
}

struct Harness {
    app: Dashboard,
    nav: Arc<MemoryNavigator>,
    _server: TestServer,
}

async fn harness(backend: Backend, start: &str) -> Harness {
    let server = TestServer::spawn(backend).await;
    let mut config = ClientConfig::new(format!("{}/api", server.base_url));
    config.search_debounce = Duration::from_millis(20);
    config.page_size = 10;
    let nav = Arc::new(MemoryNavigator::new(start));
    let app = Dashboard::new(config, nav.clone()).unwrap();
    app.session.set_token("test-token");
    Harness {
        app,
        nav,
        _server: server,
    }
}

#[tokio::test]
async fn order_form_creates_then_flashes_on_the_list_page() {
    let backend = Backend::default();
    let h = harness(backend.clone(), "/orders/new").await;

    let mut form = h.app.new_order();
    form.form.code = "123".into();
    form.form.blur_code().unwrap();
    assert_eq!(form.form.code, "OP-0000123");
    form.form.client = Some(Client {
        id: ClientId::new(2),
        name: "Acme".into(),
    });
    form.form.product = Some(Product {
        id: ProductId::new(3),
        code: "SKU-3".into(),
        description: "Frame".into(),
    });
    form.form.total_quantity = "40".into();
    form.form.produced_quantity = "10".into();
    assert_eq!(form.form.progress_percent(), 25.0);

    let saved = form.submit().await.unwrap();
    assert_eq!(saved.code.as_str(), "OP-0000123");
    assert_eq!(saved.total_quantity, 40);
    assert_eq!(h.nav.current_location(), "/orders");
    assert!(h.app.notifications.current().is_none());

    let (_, flash) = h.app.mount("/orders").await;
    assert_eq!(flash.map(|f| f.message).as_deref(), Some("Order created"));
    let toast = h.app.notifications.current().unwrap();
    assert_eq!(toast.severity, Severity::Success);

    let stored = backend.orders.lock().unwrap().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0]["clientId"], 2);
}

#[tokio::test]
async fn bulk_delete_removes_selected_rows() {
    let backend = Backend::default();
    *backend.orders.lock().unwrap() = (1..=10).map(order_json).collect();
    let h = harness(backend.clone(), "/orders").await;

    let list = h.app.orders_list();
    list.refresh().await.unwrap();
    assert_eq!(list.snapshot().rows.len(), 10);

    list.toggle_row(OrderId::new(3));
    list.toggle_row(OrderId::new(7));
    assert_eq!(list.delete_selected().await.unwrap(), 2);

    let snap = list.snapshot();
    assert!(snap.selection.is_empty());
    assert_eq!(snap.rows.len(), 8);
    assert!(
        snap.rows
            .iter()
            .all(|o| o.id != OrderId::new(3) && o.id != OrderId::new(7))
    );
    assert_eq!(backend.orders.lock().unwrap().len(), 8);
    assert_eq!(
        h.app.notifications.current().map(|t| t.message).as_deref(),
        Some("Orders deleted")
    );
}

#[tokio::test]
async fn offset_list_pages_through_the_backend() {
    let backend = Backend::default();
    *backend.orders.lock().unwrap() = (1..=23).map(order_json).collect();
    let h = harness(backend, "/orders").await;

    let list = h.app.orders_list();
    list.refresh().await.unwrap();
    let view = list.pagination().view().unwrap();
    assert_eq!(view.total_pages, 3);
    assert!(!view.has_prev);

    list.set_page(2).await.unwrap();
    let snap = list.snapshot();
    assert_eq!(snap.rows.len(), 3);
    assert_eq!(snap.rows[0].id, OrderId::new(21));
    assert!(!list.pagination().view().unwrap().has_next);
}

#[tokio::test]
async fn order_search_falls_back_to_external_sync() {
    let backend = Backend::default();
    backend.external.lock().unwrap().push(order_json(4_242));
    let h = harness(backend.clone(), "/orders/new").await;

    let search = h.app.order_search();
    search.input("4242").await;
    let snap = search.snapshot();
    assert_eq!(snap.phase, SearchPhase::Empty);
    assert_eq!(snap.fallback_label.as_deref(), Some("Sync from ERP"));

    let picked = search.run_fallback().await.unwrap();
    assert_eq!(picked.code.as_str(), "OP-0004242");
    let snap = search.snapshot();
    assert_eq!(snap.selected.map(|o| o.id), Some(OrderId::new(4_242)));
    assert!(!snap.open);
    assert_eq!(backend.orders.lock().unwrap().len(), 1);
}
