use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tower::ServiceExt;

use bottega::application::catalog::CatalogService;
use bottega::application::health::HealthService;
use bottega::application::orders::OrderService;
use bottega::application::repos::{
    AggregateStats, CatalogRepo, DailyStat, DiagnosticRecord, DiagnosticsRepo, NewOrder,
    OrdersRepo, ProductDraft, ProductPatch, RepoError,
};
use bottega::domain::catalog::ProductRecord;
use bottega::domain::orders::OrderRecord;
use bottega::domain::types::{OrderStatus, Unit};
use bottega::infra::cache::ResponseCache;
use bottega::infra::http::auth::AdminGuard;
use bottega::infra::http::rate_limit::GatewayRateLimiter;
use bottega::infra::http::{GatewayState, build_router};

const ADMIN_USER: &str = "admin";
const ADMIN_PASS: &str = "s3cret";

#[derive(Default)]
struct MemoryStore {
    products: Mutex<Vec<ProductRecord>>,
    orders: Mutex<Vec<OrderRecord>>,
}

impl MemoryStore {
    async fn seed_product(&self, name: &str, price: &str, unit: Unit, active: bool) -> i64 {
        let mut products = self.products.lock().await;
        let id = products.len() as i64 + 1;
        let now = OffsetDateTime::now_utc();
        products.push(ProductRecord {
            id,
            name: name.to_string(),
            price: price.parse().expect("seed price"),
            description: String::new(),
            image: None,
            unit,
            stock_quantity: 10,
            active,
            sort_order: id as i32,
            created_at: now,
            updated_at: now,
        });
        id
    }

    async fn order_count(&self) -> usize {
        self.orders.lock().await.len()
    }
}

#[async_trait]
impl CatalogRepo for MemoryStore {
    async fn list_products(
        &self,
        include_inactive: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductRecord>, RepoError> {
        let products = self.products.lock().await;
        Ok(products
            .iter()
            .filter(|product| include_inactive || product.active)
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn count_products(&self, include_inactive: bool) -> Result<i64, RepoError> {
        let products = self.products.lock().await;
        Ok(products
            .iter()
            .filter(|product| include_inactive || product.active)
            .count() as i64)
    }

    async fn get_product(&self, id: i64) -> Result<Option<ProductRecord>, RepoError> {
        let products = self.products.lock().await;
        Ok(products
            .iter()
            .find(|product| product.id == id && product.active)
            .cloned())
    }

    async fn create_product(&self, draft: ProductDraft) -> Result<ProductRecord, RepoError> {
        let mut products = self.products.lock().await;
        let id = products.len() as i64 + 1;
        let now = OffsetDateTime::now_utc();
        let record = ProductRecord {
            id,
            name: draft.name,
            price: draft.price,
            description: draft.description,
            image: draft.image,
            unit: draft.unit,
            stock_quantity: draft.stock_quantity,
            active: true,
            sort_order: draft.sort_order,
            created_at: now,
            updated_at: now,
        };
        products.push(record.clone());
        Ok(record)
    }

    async fn update_product(&self, id: i64, patch: ProductPatch) -> Result<bool, RepoError> {
        let mut products = self.products.lock().await;
        let Some(product) = products
            .iter_mut()
            .find(|product| product.id == id && product.active)
        else {
            return Ok(false);
        };
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(image) = patch.image {
            product.image = Some(image);
        }
        if let Some(unit) = patch.unit {
            product.unit = unit;
        }
        if let Some(stock_quantity) = patch.stock_quantity {
            product.stock_quantity = stock_quantity;
        }
        if let Some(sort_order) = patch.sort_order {
            product.sort_order = sort_order;
        }
        product.updated_at = OffsetDateTime::now_utc();
        Ok(true)
    }

    async fn soft_delete_product(&self, id: i64) -> Result<bool, RepoError> {
        let mut products = self.products.lock().await;
        let Some(product) = products
            .iter_mut()
            .find(|product| product.id == id && product.active)
        else {
            return Ok(false);
        };
        product.active = false;
        product.updated_at = OffsetDateTime::now_utc();
        Ok(true)
    }
}

#[async_trait]
impl OrdersRepo for MemoryStore {
    async fn create_order(&self, order: NewOrder) -> Result<i64, RepoError> {
        let mut orders = self.orders.lock().await;
        let id = orders.len() as i64 + 1;
        orders.push(OrderRecord {
            id,
            cart: order.cart,
            customer_phone: order.customer_phone,
            total: order.total,
            status: OrderStatus::Pending,
            notes: order.notes,
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(id)
    }

    async fn recent_orders(&self, limit: i64, offset: i64) -> Result<Vec<OrderRecord>, RepoError> {
        let orders = self.orders.lock().await;
        Ok(orders
            .iter()
            .rev()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn analytics(&self, days: u32, detailed: bool) -> Result<AggregateStats, RepoError> {
        let orders = self.orders.lock().await;
        let order_count = orders.len() as i64;
        let revenue: Decimal = orders.iter().map(|order| order.total).sum();
        let average_order = if order_count > 0 {
            (revenue / Decimal::from(order_count)).round_dp(2)
        } else {
            Decimal::ZERO
        };
        let daily = if detailed {
            let mut buckets: BTreeMap<String, (i64, Decimal)> = BTreeMap::new();
            for order in orders.iter() {
                let day = order.created_at.date().to_string();
                let bucket = buckets.entry(day).or_insert((0, Decimal::ZERO));
                bucket.0 += 1;
                bucket.1 += order.total;
            }
            Some(
                buckets
                    .into_iter()
                    .rev()
                    .map(|(day, (order_count, revenue))| DailyStat {
                        day,
                        order_count,
                        revenue,
                    })
                    .collect(),
            )
        } else {
            None
        };
        Ok(AggregateStats {
            window_days: days,
            order_count,
            revenue,
            average_order,
            daily,
        })
    }
}

#[async_trait]
impl DiagnosticsRepo for MemoryStore {
    async fn health_check(&self) -> Result<DiagnosticRecord, RepoError> {
        Ok(DiagnosticRecord {
            products_table: true,
            orders_table: true,
            product_count: Some(self.products.lock().await.len() as i64),
            order_count: Some(self.orders.lock().await.len() as i64),
            writable: true,
            failure: None,
        })
    }
}

fn build_gateway(store: Arc<MemoryStore>, max_requests: u32) -> Router {
    let catalog_repo: Arc<dyn CatalogRepo> = store.clone();
    let orders_repo: Arc<dyn OrdersRepo> = store.clone();
    let diagnostics_repo: Arc<dyn DiagnosticsRepo> = store;

    let cache = ResponseCache::new(Duration::from_secs(300));
    let limiter = Arc::new(GatewayRateLimiter::new(
        Duration::from_secs(3600),
        max_requests,
    ));

    let state = GatewayState {
        catalog: Arc::new(CatalogService::new(catalog_repo, cache)),
        orders: Arc::new(OrderService::new(orders_repo)),
        health: Arc::new(HealthService::new(
            diagnostics_repo,
            limiter.clone(),
            vec!["admin credentials are still the built-in defaults".to_string()],
        )),
        guard: Arc::new(AdminGuard::new(ADMIN_USER, ADMIN_PASS)),
        limiter,
        debug: false,
    };
    build_router(state)
}

fn gateway(max_requests: u32) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (build_gateway(store.clone(), max_requests), store)
}

fn auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn admin_get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, auth_header(ADMIN_USER, ADMIN_PASS))
        .body(Body::empty())
        .expect("request")
}

fn admin_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, auth_header(ADMIN_USER, ADMIN_PASS))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn public_json(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("gateway response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("response body")
        .to_bytes();
    let value = serde_json::from_slice(&bytes).expect("json envelope");
    (status, value)
}

#[tokio::test]
async fn public_listing_paginates_active_products_only() {
    let (router, store) = gateway(1000);
    for i in 0..8 {
        store
            .seed_product(&format!("Product {i}"), "1.00", Unit::Piece, true)
            .await;
    }
    store
        .seed_product("Ghost", "1.00", Unit::Piece, false)
        .await;

    let (status, body) = send(&router, get("/api/products?limit=5&offset=0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["count"], json!(5));
    assert_eq!(body["data"]["total"], json!(8));
    assert_eq!(body["data"]["products"].as_array().expect("array").len(), 5);

    // envelope carries timestamp and elapsed time
    assert!(body["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["elapsed_ms"].as_f64().is_some());

    let names: Vec<&str> = body["data"]["products"]
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|p| p["name"].as_str())
        .collect();
    assert!(!names.contains(&"Ghost"));
}

#[tokio::test]
async fn create_then_fetch_round_trips_name_price_and_unit() {
    let (router, _store) = gateway(1000);

    let (status, body) = send(
        &router,
        admin_json(
            "POST",
            "/api/admin/products",
            &json!({"name": "Basmati Rice", "price": "4.75", "unit": "packet"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["product"]["id"].as_i64().expect("id");

    let (status, body) = send(&router, get(&format!("/api/products/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["product"]["name"], json!("Basmati Rice"));
    assert_eq!(body["data"]["product"]["price"], json!("4.75"));
    assert_eq!(body["data"]["product"]["unit"], json!("packet"));
}

#[tokio::test]
async fn fetching_an_unknown_or_inactive_product_is_not_found() {
    let (router, store) = gateway(1000);
    let id = store
        .seed_product("Retired", "2.00", Unit::Kg, false)
        .await;

    let (status, body) = send(&router, get(&format!("/api/products/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["status"], json!(404));

    let (status, _) = send(&router, get("/api/products/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn wrong_admin_password_is_rejected_without_detail() {
    let (router, _store) = gateway(1000);

    let request = Request::builder()
        .method("GET")
        .uri("/api/admin/products")
        .header(header::AUTHORIZATION, auth_header("admin", "wrongpass"))
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&router, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Authentication required"));
    // no field reveals which half of the credential failed
    let rendered = body.to_string();
    assert!(!rendered.contains("username"));
    assert!(!rendered.contains("password"));
}

#[tokio::test]
async fn missing_credentials_are_rejected_before_any_handler_runs() {
    let (router, _store) = gateway(1000);
    let (status, body) = send(&router, get("/api/admin/health")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn invalid_carts_are_rejected_atomically() {
    let (router, store) = gateway(1000);

    let (status, body) = send(
        &router,
        public_json(
            "POST",
            "/api/orders",
            &json!({"cart": [{"id": 1, "qty": 0, "price": "2.00"}]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("message").contains("cart.qty"));
    assert_eq!(store.order_count().await, 0);

    let (status, _) = send(
        &router,
        public_json(
            "POST",
            "/api/orders",
            &json!({"cart": [
                {"id": 1, "qty": 1, "price": "2.00"},
                {"id": 2, "qty": 1, "price": "-0.50"}
            ]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn a_valid_order_is_persisted_before_the_response_returns() {
    let (router, store) = gateway(1000);

    let (status, body) = send(
        &router,
        public_json(
            "POST",
            "/api/orders",
            &json!({
                "cart": [
                    {"id": 3, "qty": 2, "price": "12.00", "unit": "kg"},
                    {"id": 7, "qty": 1, "price": "4.50", "unit": "packet"}
                ],
                "customer_phone": "+46 70 123 45 67",
                "notes": "ring the bell"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order_id"], json!(1));
    assert_eq!(body["data"]["total"], json!("28.50"));
    assert_eq!(body["data"]["status"], json!("pending"));
    assert!(
        body["data"]["message_preview"]
            .as_str()
            .expect("preview")
            .contains("Total: 28.50")
    );
    assert_eq!(store.order_count().await, 1);
}

#[tokio::test]
async fn empty_or_malformed_bodies_are_client_errors() {
    let (router, store) = gateway(1000);

    let request = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("message").contains("body"));

    let request = Request::builder()
        .method("POST")
        .uri("/api/orders")
        .body(Body::from("{not json"))
        .expect("request");
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(store.order_count().await, 0);
}

#[tokio::test]
async fn requests_beyond_the_threshold_are_denied() {
    let (router, _store) = gateway(3);

    for _ in 0..3 {
        let (status, _) = send(&router, get("/api/products")).await;
        assert_eq!(status, StatusCode::OK);
    }

    let response = router
        .clone()
        .oneshot(get("/api/products"))
        .await
        .expect("gateway response");
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key(header::RETRY_AFTER));
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let body: Value = serde_json::from_slice(&bytes).expect("envelope");
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["status"], json!(429));

    // a different client is unaffected
    let request = Request::builder()
        .method("GET")
        .uri("/api/products")
        .header("x-forwarded-for", "203.0.113.9")
        .body(Body::empty())
        .expect("request");
    let (status, _) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn reads_after_writes_never_serve_the_prewrite_payload() {
    let (router, store) = gateway(1000);
    store.seed_product("First", "1.00", Unit::Piece, true).await;

    let (_, body) = send(&router, get("/api/products")).await;
    assert_eq!(body["data"]["total"], json!(1));

    // the second read is served from cache: a direct store mutation that
    // bypasses the gateway is invisible
    store
        .seed_product("Backdoor", "1.00", Unit::Piece, true)
        .await;
    let (_, body) = send(&router, get("/api/products")).await;
    assert_eq!(body["data"]["total"], json!(1));

    // a gateway write invalidates synchronously; the next read sees
    // everything
    let (status, _) = send(
        &router,
        admin_json(
            "POST",
            "/api/admin/products",
            &json!({"name": "Third", "price": "2.00"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&router, get("/api/products")).await;
    assert_eq!(body["data"]["total"], json!(3));
}

#[tokio::test]
async fn soft_deleting_twice_reports_not_found_the_second_time() {
    let (router, store) = gateway(1000);
    let id = store.seed_product("Doomed", "1.00", Unit::Box, true).await;

    let uri = format!("/api/admin/products/{id}");
    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .header(header::AUTHORIZATION, auth_header(ADMIN_USER, ADMIN_PASS))
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["deleted"], json!(true));

    let request = Request::builder()
        .method("DELETE")
        .uri(&uri)
        .header(header::AUTHORIZATION, auth_header(ADMIN_USER, ADMIN_PASS))
        .body(Body::empty())
        .expect("request");
    let (status, body) = send(&router, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn updates_require_recognized_fields_and_an_existing_product() {
    let (router, store) = gateway(1000);
    let id = store.seed_product("Olive Oil", "9.00", Unit::Liter, true).await;

    let (status, _) = send(
        &router,
        admin_json(
            "PUT",
            &format!("/api/admin/products/{id}"),
            &json!({"price": "10.50"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&router, get(&format!("/api/products/{id}"))).await;
    assert_eq!(body["data"]["product"]["price"], json!("10.50"));

    let (status, _) = send(
        &router,
        admin_json("PUT", &format!("/api/admin/products/{id}"), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &router,
        admin_json(
            "PUT",
            "/api/admin/products/999",
            &json!({"price": "1.00"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_listing_includes_inactive_products() {
    let (router, store) = gateway(1000);
    store.seed_product("Visible", "1.00", Unit::Piece, true).await;
    store.seed_product("Hidden", "1.00", Unit::Piece, false).await;

    let (_, body) = send(&router, get("/api/products")).await;
    assert_eq!(body["data"]["total"], json!(1));

    let (_, body) = send(&router, admin_get("/api/admin/products")).await;
    assert_eq!(body["data"]["total"], json!(2));
}

#[tokio::test]
async fn unmatched_routes_answer_with_the_endpoint_catalog() {
    let (router, _store) = gateway(1000);

    let (status, body) = send(&router, get("/api/carts")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    let endpoints = body["endpoints"].as_array().expect("endpoint catalog");
    assert!(endpoints.iter().any(|entry| {
        entry["method"] == json!("GET") && entry["endpoint"] == json!("products")
    }));
    assert!(endpoints.iter().any(|entry| {
        entry["endpoint"] == json!("admin/products") && entry["admin"] == json!(true)
    }));
}

#[tokio::test]
async fn the_legacy_endpoint_parameter_shape_still_routes() {
    let (router, store) = gateway(1000);
    let id = store.seed_product("Flour", "2.20", Unit::Kg, true).await;

    let (status, body) = send(&router, get("/api?endpoint=products&limit=10")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], json!(1));

    let (status, body) = send(&router, get(&format!("/api?endpoint=products&id={id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["product"]["name"], json!("Flour"));
}

#[tokio::test]
async fn public_health_omits_diagnostic_detail_the_admin_variant_carries() {
    let (router, _store) = gateway(1000);

    let (status, body) = send(&router, get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("ok"));
    assert_eq!(body["data"]["writable"], json!(true));
    assert!(body["data"].get("rate_limiter").is_none());
    assert!(body["data"].get("config_warnings").is_none());

    let (status, body) = send(&router, admin_get("/api/admin/health")).await;
    assert_eq!(status, StatusCode::OK);
    let limiter = &body["data"]["rate_limiter"];
    assert!(limiter["max_requests"].as_u64().is_some());
    assert!(limiter["distinct_clients"].as_u64().is_some());
    assert!(
        body["data"]["config_warnings"]
            .as_array()
            .expect("warnings")
            .iter()
            .any(|warning| {
                warning
                    .as_str()
                    .is_some_and(|w| w.contains("built-in defaults"))
            })
    );
}

#[tokio::test]
async fn analytics_clamp_the_window_and_support_daily_breakdowns() {
    let (router, _store) = gateway(1000);

    for _ in 0..2 {
        let (status, _) = send(
            &router,
            public_json(
                "POST",
                "/api/orders",
                &json!({"cart": [{"id": 1, "qty": 1, "price": "10.00"}]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&router, admin_get("/api/admin/analytics?days=9999")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["window_days"], json!(365));
    assert_eq!(body["data"]["order_count"], json!(2));
    assert_eq!(body["data"]["revenue"], json!("20.00"));
    assert!(body["data"].get("daily").is_none());

    let (status, body) = send(
        &router,
        admin_get("/api/admin/analytics?days=7&detailed=true"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["window_days"], json!(7));
    let daily = body["data"]["daily"].as_array().expect("daily breakdown");
    assert_eq!(daily.len(), 1);
    assert_eq!(daily[0]["order_count"], json!(2));
}

#[tokio::test]
async fn recent_orders_are_listed_newest_first() {
    let (router, _store) = gateway(1000);

    for price in ["1.00", "2.00", "3.00"] {
        let (status, _) = send(
            &router,
            public_json(
                "POST",
                "/api/orders",
                &json!({"cart": [{"id": 1, "qty": 1, "price": price}]}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&router, admin_get("/api/admin/orders?limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["count"], json!(2));
    let orders = body["data"]["orders"].as_array().expect("orders");
    assert_eq!(orders[0]["total"], json!("3.00"));
    assert_eq!(orders[1]["total"], json!("2.00"));
    assert_eq!(orders[0]["status"], json!("pending"));
}
