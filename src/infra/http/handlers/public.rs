//! Public storefront operations.

use serde_json::Value;

use crate::application::catalog::CatalogService;
use crate::application::sanitize::{self, FieldError};

use super::super::error::GatewayError;
use super::super::gateway::{GatewayRequest, GatewayState, HandlerFuture};
use super::param_i64;

/// Paginated active-only listing. A caller using the legacy single-entry
/// shape can pass `id` as a query parameter instead of a path segment.
pub fn list_products<'a>(state: &'a GatewayState, req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move {
        if let Some(raw) = req.params.get("id") {
            let id = sanitize::positive_id_str("id", raw)?;
            return Ok(state.catalog.fetch(id).await?);
        }
        let limit = CatalogService::clamp_limit(param_i64(&req.params, "limit")?);
        let offset = CatalogService::clamp_offset(param_i64(&req.params, "offset")?);
        Ok(state.catalog.list(false, limit, offset).await?)
    })
}

pub fn get_product<'a>(state: &'a GatewayState, req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move {
        let id = req
            .id
            .ok_or_else(|| FieldError::new("id", "must be a positive integer"))?;
        Ok(state.catalog.fetch(id).await?)
    })
}

pub fn submit_order<'a>(state: &'a GatewayState, req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move {
        let body = req
            .body
            .ok_or_else(|| FieldError::new("body", "request body is required"))?;
        Ok(state.orders.submit(&body).await?)
    })
}

pub fn health<'a>(state: &'a GatewayState, _req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move { Ok::<Value, GatewayError>(state.health.public_probe().await) })
}
