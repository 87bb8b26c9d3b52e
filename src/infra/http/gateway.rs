//! Single-entry request gateway.
//!
//! Every request walks the same stages: rate check, auth for admin entries,
//! body validation, handler execution, envelope. Any stage short-circuits to
//! exactly one terminal response; nothing executes after a denial.

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::{ConnectInfo, Query, State},
    http::{Request, header},
    response::Response,
    routing::any,
};
use serde_json::{Value, json};
use tracing::warn;

use crate::application::catalog::CatalogService;
use crate::application::health::HealthService;
use crate::application::orders::OrderService;
use crate::application::sanitize::FieldError;

use super::auth::AdminGuard;
use super::envelope;
use super::error::GatewayError;
use super::handlers;
use super::rate_limit::GatewayRateLimiter;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Explicitly constructed service graph handed to the gateway at startup.
/// Fresh instances are injected in tests; nothing here is global.
#[derive(Clone)]
pub struct GatewayState {
    pub catalog: Arc<CatalogService>,
    pub orders: Arc<OrderService>,
    pub health: Arc<HealthService>,
    pub guard: Arc<AdminGuard>,
    pub limiter: Arc<GatewayRateLimiter>,
    pub debug: bool,
}

/// Request pieces a handler consumes after the gateway stages have passed.
pub struct GatewayRequest {
    pub id: Option<i64>,
    pub params: HashMap<String, String>,
    pub body: Option<Value>,
}

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, GatewayError>> + Send + 'a>>;
pub type HandlerFn = for<'a> fn(&'a GatewayState, GatewayRequest) -> HandlerFuture<'a>;

pub struct RouteEntry {
    pub method: &'static str,
    pub endpoint: &'static str,
    pub takes_id: bool,
    pub admin: bool,
    pub needs_body: bool,
    pub handler: HandlerFn,
}

/// Lookup table from (method, endpoint) to handler.
pub const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        method: "GET",
        endpoint: "products",
        takes_id: false,
        admin: false,
        needs_body: false,
        handler: handlers::public::list_products,
    },
    RouteEntry {
        method: "GET",
        endpoint: "products",
        takes_id: true,
        admin: false,
        needs_body: false,
        handler: handlers::public::get_product,
    },
    RouteEntry {
        method: "POST",
        endpoint: "orders",
        takes_id: false,
        admin: false,
        needs_body: true,
        handler: handlers::public::submit_order,
    },
    RouteEntry {
        method: "GET",
        endpoint: "health",
        takes_id: false,
        admin: false,
        needs_body: false,
        handler: handlers::public::health,
    },
    RouteEntry {
        method: "GET",
        endpoint: "admin/products",
        takes_id: false,
        admin: true,
        needs_body: false,
        handler: handlers::admin::list_products,
    },
    RouteEntry {
        method: "POST",
        endpoint: "admin/products",
        takes_id: false,
        admin: true,
        needs_body: true,
        handler: handlers::admin::create_product,
    },
    RouteEntry {
        method: "PUT",
        endpoint: "admin/products",
        takes_id: true,
        admin: true,
        needs_body: true,
        handler: handlers::admin::update_product,
    },
    RouteEntry {
        method: "DELETE",
        endpoint: "admin/products",
        takes_id: true,
        admin: true,
        needs_body: false,
        handler: handlers::admin::delete_product,
    },
    RouteEntry {
        method: "GET",
        endpoint: "admin/orders",
        takes_id: false,
        admin: true,
        needs_body: false,
        handler: handlers::admin::recent_orders,
    },
    RouteEntry {
        method: "GET",
        endpoint: "admin/analytics",
        takes_id: false,
        admin: true,
        needs_body: false,
        handler: handlers::admin::analytics,
    },
    RouteEntry {
        method: "GET",
        endpoint: "admin/health",
        takes_id: false,
        admin: true,
        needs_body: false,
        handler: handlers::admin::diagnostic,
    },
];

pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/api", any(dispatch))
        .route("/api/{*endpoint}", any(dispatch))
        .with_state(state)
}

/// Reduce a raw endpoint string to the routing alphabet and trim slashes.
pub fn normalize_endpoint(raw: &str) -> String {
    let filtered: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '-'))
        .collect();
    filtered.trim_matches('/').to_string()
}

fn resolve(method: &str, endpoint: &str) -> Option<(&'static RouteEntry, Option<i64>)> {
    if let Some(entry) = ROUTES
        .iter()
        .find(|entry| !entry.takes_id && entry.method == method && entry.endpoint == endpoint)
    {
        return Some((entry, None));
    }
    let (head, tail) = endpoint.rsplit_once('/')?;
    let id = tail.parse::<i64>().ok().filter(|id| *id > 0)?;
    let entry = ROUTES
        .iter()
        .find(|entry| entry.takes_id && entry.method == method && entry.endpoint == head)?;
    Some((entry, Some(id)))
}

pub fn endpoint_catalog() -> Value {
    let entries: Vec<Value> = ROUTES
        .iter()
        .map(|entry| {
            let endpoint = if entry.takes_id {
                format!("{}/{{id}}", entry.endpoint)
            } else {
                entry.endpoint.to_string()
            };
            json!({
                "method": entry.method,
                "endpoint": endpoint,
                "admin": entry.admin,
            })
        })
        .collect();
    Value::Array(entries)
}

/// Rate-limit key: first forwarded-for entry when present, else the socket
/// peer address.
fn client_key(request: &Request<Body>) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return forwarded.to_string();
    }
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn dispatch(State(state): State<GatewayState>, request: Request<Body>) -> Response {
    let started = Instant::now();

    // Stage 1: rate check. A denied request does no further work at all.
    let key = client_key(&request);
    if !state.limiter.allow(&key) {
        let err = GatewayError::RateLimited {
            retry_after: state.limiter.retry_after_secs(),
        };
        return envelope::failure(&err, state.debug);
    }

    let method = request.method().as_str().to_string();
    let params: HashMap<String, String> = Query::try_from_uri(request.uri())
        .map(|Query(params)| params)
        .unwrap_or_default();

    let path_endpoint = request
        .uri()
        .path()
        .strip_prefix("/api")
        .unwrap_or("")
        .to_string();
    let mut endpoint = normalize_endpoint(&path_endpoint);
    if endpoint.is_empty() {
        endpoint = params
            .get("endpoint")
            .map(|raw| normalize_endpoint(raw))
            .unwrap_or_default();
    }

    let Some((entry, id)) = resolve(&method, &endpoint) else {
        return envelope::unknown_endpoint(endpoint_catalog());
    };

    // Stage 2: admin entries authenticate before anything else runs.
    if entry.admin && !state.guard.check(request.headers().get(header::AUTHORIZATION)) {
        return envelope::failure(&GatewayError::Auth, state.debug);
    }

    // Stage 3: body validation. An empty or unparseable body is a client
    // error, never an implicit empty object.
    let body = if entry.needs_body {
        match read_json_body(request).await {
            Ok(value) => Some(value),
            Err(err) => return envelope::failure(&err, state.debug),
        }
    } else {
        None
    };

    // Stages 4-5: execute and respond.
    let gateway_request = GatewayRequest { id, params, body };
    match (entry.handler)(&state, gateway_request).await {
        Ok(data) => envelope::success(data, started),
        Err(err) => {
            warn!(
                target = "bottega::gateway",
                method = %method,
                endpoint = %endpoint,
                error = %err,
                status = err.status().as_u16(),
                "request failed"
            );
            envelope::failure(&err, state.debug)
        }
    }
}

async fn read_json_body(request: Request<Body>) -> Result<Value, GatewayError> {
    let bytes = to_bytes(request.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|_| FieldError::new("body", "could not read request body"))?;
    if bytes.is_empty() {
        return Err(FieldError::new("body", "request body is required").into());
    }
    serde_json::from_slice(&bytes)
        .map_err(|_| FieldError::new("body", "must be valid JSON").into())
}
