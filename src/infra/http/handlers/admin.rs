//! Admin operations. The gateway has already passed the auth guard before
//! any of these run.

use serde_json::{Value, json};

use crate::application::catalog::CatalogService;
use crate::application::orders::OrderService;
use crate::application::sanitize::FieldError;

use super::super::error::GatewayError;
use super::super::gateway::{GatewayRequest, GatewayState, HandlerFuture};
use super::{param_bool, param_i64, param_u32};

/// Paginated listing including soft-deleted products.
pub fn list_products<'a>(state: &'a GatewayState, req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move {
        let limit = CatalogService::clamp_limit(param_i64(&req.params, "limit")?);
        let offset = CatalogService::clamp_offset(param_i64(&req.params, "offset")?);
        Ok(state.catalog.list(true, limit, offset).await?)
    })
}

pub fn create_product<'a>(state: &'a GatewayState, req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move {
        let body = req
            .body
            .ok_or_else(|| FieldError::new("body", "request body is required"))?;
        let product = state.catalog.create(&body).await?;
        Ok(json!({ "product": product }))
    })
}

pub fn update_product<'a>(state: &'a GatewayState, req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move {
        let id = req
            .id
            .ok_or_else(|| FieldError::new("id", "must be a positive integer"))?;
        let body = req
            .body
            .ok_or_else(|| FieldError::new("body", "request body is required"))?;
        state.catalog.update(id, &body).await?;
        Ok(json!({ "updated": true, "id": id }))
    })
}

pub fn delete_product<'a>(state: &'a GatewayState, req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move {
        let id = req
            .id
            .ok_or_else(|| FieldError::new("id", "must be a positive integer"))?;
        state.catalog.remove(id).await?;
        Ok(json!({ "deleted": true, "id": id }))
    })
}

pub fn recent_orders<'a>(state: &'a GatewayState, req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move {
        let limit = OrderService::clamp_limit(param_i64(&req.params, "limit")?);
        let offset = OrderService::clamp_offset(param_i64(&req.params, "offset")?);
        Ok(state.orders.recent(limit, offset).await?)
    })
}

pub fn analytics<'a>(state: &'a GatewayState, req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move {
        let days = param_u32(&req.params, "days")?;
        let detailed = param_bool(&req.params, "detailed");
        let stats = state.orders.analytics(days, detailed).await?;
        serde_json::to_value(stats).map_err(|err| GatewayError::System(err.to_string()))
    })
}

pub fn diagnostic<'a>(state: &'a GatewayState, _req: GatewayRequest) -> HandlerFuture<'a> {
    Box::pin(async move { Ok::<Value, GatewayError>(state.health.admin_diagnostic().await) })
}
