use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use tsmpos_core::ProductId;
use tsmpos_products::{FormField, ProductForm};
use tsmpos_sales::{CartLedger, SaleRequest};
use tsmpos_terminal::{
    ApiError, CatalogService, Coordinator, HttpApi, Notice, PosConfig, PosState, SalesService,
};

/// Stub of the backend: products and sales kept as raw JSON, stock decremented on sale.
#[derive(Clone, Default)]
struct StubBackend {
    products: Arc<Mutex<Vec<Value>>>,
    sales: Arc<Mutex<Vec<Value>>>,
    reject_sales: bool,
}

async fn list_products(State(backend): State<StubBackend>) -> Json<Vec<Value>> {
    Json(backend.products.lock().unwrap().clone())
}

async fn create_product(
    State(backend): State<StubBackend>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if body["name"].as_str().unwrap_or_default().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "name required" })));
    }
    let mut products = backend.products.lock().unwrap();
    let created = json!({
        "_id": format!("stub-{}", products.len() + 1),
        "name": body["name"],
        "price": body["price"],
        "stock": body["stock"],
        "__v": 0,
    });
    products.push(created.clone());
    (StatusCode::CREATED, Json(created))
}

async fn record_sale(State(backend): State<StubBackend>, Json(body): Json<Value>) -> StatusCode {
    if backend.reject_sales {
        return StatusCode::INTERNAL_SERVER_ERROR;
    }
    let mut products = backend.products.lock().unwrap();
    for item in body["items"].as_array().cloned().unwrap_or_default() {
        if let Some(p) = products.iter_mut().find(|p| p["_id"] == item["_id"]) {
            let left = p["stock"].as_u64().unwrap() - item["quantity"].as_u64().unwrap();
            p["stock"] = json!(left);
        }
    }
    backend.sales.lock().unwrap().push(body);
    StatusCode::CREATED
}

struct TestServer {
    base_url: String,
    backend: StubBackend,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(backend: StubBackend) -> Self {
        let app = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route("/sales", post(record_sale))
            .with_state(backend.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            backend,
            handle,
        }
    }

    fn api(&self) -> HttpApi {
        HttpApi::new(&PosConfig::new(format!("{}/", self.base_url)))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn seeded_backend() -> StubBackend {
    StubBackend {
        products: Arc::new(Mutex::new(vec![
            json!({ "_id": "a", "name": "Latte", "price": 10, "stock": 2 }),
            json!({ "_id": "b", "name": "Scone", "price": 2.5, "stock": 0 }),
        ])),
        ..StubBackend::default()
    }
}

#[tokio::test]
async fn lists_products_from_backend_json() {
    let srv = TestServer::spawn(seeded_backend()).await;

    let products = srv.api().list_products().await.unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, ProductId::new("a"));
    assert_eq!(products[0].price.to_string(), "10.00");
    assert_eq!(products[1].price.to_string(), "2.50");
    assert_eq!(products[1].stock, 0);
}

#[tokio::test]
async fn creates_product_with_numeric_fields() {
    let srv = TestServer::spawn(StubBackend::default()).await;
    let new_product = ProductForm::default()
        .with_field(FormField::Name, "Bagel")
        .with_field(FormField::Price, "3.75")
        .with_field(FormField::Stock, "6")
        .validate()
        .unwrap();

    let created = srv.api().create_product(&new_product).await.unwrap();

    assert_eq!(created.id, ProductId::new("stub-1"));
    assert_eq!(created.price.to_string(), "3.75");
    let stored = srv.backend.products.lock().unwrap()[0].clone();
    assert_eq!(stored["price"].as_f64(), Some(3.75));
    assert_eq!(stored["stock"].as_u64(), Some(6));
}

#[tokio::test]
async fn rejected_create_surfaces_status() {
    let srv = TestServer::spawn(StubBackend::default()).await;
    let mut new_product = ProductForm::default()
        .with_field(FormField::Name, "x")
        .with_field(FormField::Price, "1")
        .with_field(FormField::Stock, "1")
        .validate()
        .unwrap();
    new_product.name.clear();

    let err = srv.api().create_product(&new_product).await.unwrap_err();

    match err {
        ApiError::Api(status, body) => {
            assert_eq!(status, 400);
            assert!(body.contains("name required"));
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn submits_sale_items_with_quantities() {
    let srv = TestServer::spawn(seeded_backend()).await;
    let api = srv.api();
    let latte = api.list_products().await.unwrap().remove(0);
    let ledger = CartLedger::new()
        .add_to_cart(&latte)
        .unwrap()
        .add_to_cart(&latte)
        .unwrap();

    api.submit_sale(&SaleRequest::from_ledger(&ledger).unwrap())
        .await
        .unwrap();

    let sales = srv.backend.sales.lock().unwrap().clone();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0]["items"][0]["_id"], "a");
    assert_eq!(sales[0]["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = HttpApi::new(&PosConfig::new(format!("http://{}", addr)));
    let err = api.list_products().await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn checkout_over_http_clears_cart_and_shows_new_stock() {
    let srv = TestServer::spawn(seeded_backend()).await;
    let coordinator = Coordinator::new(srv.api(), srv.api());

    let state = coordinator.initial_load(PosState::new()).await;
    let state = state.add_to_cart("1").unwrap().add_to_cart("1").unwrap();
    assert_eq!(state.cart().total().to_string(), "20.00");
    assert!(state.add_to_cart("1").is_err());

    let transition = coordinator.checkout(state).await;

    assert_eq!(transition.notices, vec![Notice::info("Sale recorded!")]);
    assert!(transition.state.cart().is_empty());
    assert_eq!(transition.state.products()[0].stock, 0);
}

#[tokio::test]
async fn rejected_sale_over_http_keeps_cart() {
    let srv = TestServer::spawn(StubBackend {
        reject_sales: true,
        ..seeded_backend()
    })
    .await;
    let coordinator = Coordinator::new(srv.api(), srv.api());

    let state = coordinator
        .initial_load(PosState::new())
        .await
        .add_to_cart("a")
        .unwrap();

    let transition = coordinator.checkout(state).await;

    assert_eq!(transition.notices, vec![Notice::error("Error processing sale")]);
    assert_eq!(transition.state.cart().len(), 1);
    assert!(srv.backend.sales.lock().unwrap().is_empty());
}
