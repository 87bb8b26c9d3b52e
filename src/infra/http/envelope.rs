//! Uniform JSON envelopes shared by every gateway response.

use std::time::Instant;

use axum::Json;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use super::error::GatewayError;

#[derive(Debug, Serialize)]
pub struct SuccessEnvelope {
    pub success: bool,
    pub timestamp: String,
    pub elapsed_ms: f64,
    pub data: Value,
}

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub error: String,
    pub status: u16,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoints: Option<Value>,
}

pub fn rfc3339_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

pub fn success(data: Value, started: Instant) -> Response {
    let body = SuccessEnvelope {
        success: true,
        timestamp: rfc3339_now(),
        elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
        data,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn failure(err: &GatewayError, debug: bool) -> Response {
    let status = err.status();
    let body = ErrorEnvelope {
        success: false,
        error: err.public_message(),
        status: status.as_u16(),
        timestamp: rfc3339_now(),
        detail: if debug { err.detail() } else { None },
        endpoints: None,
    };
    let mut response = (status, Json(body)).into_response();
    if let Some(retry_after) = err.retry_after() {
        if let Ok(value) = header::HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
    }
    response
}

/// Unmatched routes answer with the catalog of available endpoints rather
/// than a bare 404 body.
pub fn unknown_endpoint(endpoints: Value) -> Response {
    let body = ErrorEnvelope {
        success: false,
        error: "Unknown endpoint".to_string(),
        status: StatusCode::NOT_FOUND.as_u16(),
        timestamp: rfc3339_now(),
        detail: None,
        endpoints: Some(endpoints),
    };
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
