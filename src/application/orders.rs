//! Order intake and admin order queries.

use std::fmt::Write as _;
use std::sync::Arc;

use metrics::counter;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::info;

use crate::application::repos::{AggregateStats, NewOrder, OrdersRepo, RepoError};
use crate::application::sanitize::{self, FieldError};
use crate::domain::error::DomainError;
use crate::domain::orders::{CartItem, cart_total};
use crate::domain::types::OrderStatus;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;
const MAX_ANALYTICS_DAYS: u32 = 365;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Validation(#[from] FieldError),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct OrderService {
    repo: Arc<dyn OrdersRepo>,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrdersRepo>) -> Self {
        Self { repo }
    }

    /// Validate and persist a submitted cart. The order row is committed
    /// before this returns, so the caller's messaging handoff can never
    /// observe an unpersisted order.
    pub async fn submit(&self, body: &Value) -> Result<Value, OrderError> {
        let cart = sanitize::cart(body.get("cart"))?;
        let phone = sanitize::phone(
            "customer_phone",
            body.get("customer_phone").and_then(Value::as_str),
        )?;
        let notes = sanitize::optional_text(body.get("notes").and_then(Value::as_str));
        let total = cart_total(&cart)?;

        let message_preview = format_cart_message(&cart, &total.to_string());
        let order_id = self
            .repo
            .create_order(NewOrder {
                cart,
                customer_phone: phone,
                notes,
                total,
            })
            .await?;

        counter!("bottega_orders_accepted_total").increment(1);
        info!(target: "bottega::orders", order_id, "order accepted");

        Ok(json!({
            "order_id": order_id,
            "total": total,
            "status": OrderStatus::Pending,
            "message_preview": message_preview,
        }))
    }

    pub fn clamp_limit(limit: Option<i64>) -> i64 {
        limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn clamp_offset(offset: Option<i64>) -> i64 {
        offset.unwrap_or(0).max(0)
    }

    pub async fn recent(&self, limit: i64, offset: i64) -> Result<Value, OrderError> {
        let orders = self.repo.recent_orders(limit, offset).await?;
        let count = orders.len();
        Ok(json!({
            "orders": orders,
            "count": count,
            "limit": limit,
            "offset": offset,
        }))
    }

    /// Aggregate statistics over a trailing window, clamped to 1..=365 days.
    pub async fn analytics(
        &self,
        days: Option<u32>,
        detailed: bool,
    ) -> Result<AggregateStats, OrderError> {
        let days = days.unwrap_or(30).clamp(1, MAX_ANALYTICS_DAYS);
        Ok(self.repo.analytics(days, detailed).await?)
    }
}

/// Plain-text cart summary handed back to the client for the external
/// messaging link.
fn format_cart_message(cart: &[CartItem], total: &str) -> String {
    let mut message = String::from("New order:\n");
    for item in cart {
        let _ = writeln!(
            message,
            "- {} {} of #{} @ {}",
            item.quantity, item.unit_label, item.product_id, item.unit_price
        );
    }
    let _ = write!(message, "Total: {total}");
    message
}
