//! System health probes.
//!
//! The public probe reports table existence, row counts, and write
//! capability with failure detail stripped; the admin diagnostic adds the
//! raw detail, limiter statistics, and configuration warnings.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::warn;

use crate::application::repos::{DiagnosticRecord, DiagnosticsRepo};
use crate::infra::http::rate_limit::GatewayRateLimiter;

pub struct HealthService {
    diagnostics: Arc<dyn DiagnosticsRepo>,
    limiter: Arc<GatewayRateLimiter>,
    config_warnings: Vec<String>,
}

impl HealthService {
    pub fn new(
        diagnostics: Arc<dyn DiagnosticsRepo>,
        limiter: Arc<GatewayRateLimiter>,
        config_warnings: Vec<String>,
    ) -> Self {
        Self {
            diagnostics,
            limiter,
            config_warnings,
        }
    }

    async fn probe(&self) -> DiagnosticRecord {
        match self.diagnostics.health_check().await {
            Ok(record) => record,
            Err(err) => {
                warn!(target: "bottega::health", error = %err, "health probe failed");
                DiagnosticRecord {
                    products_table: false,
                    orders_table: false,
                    product_count: None,
                    order_count: None,
                    writable: false,
                    failure: Some(err.to_string()),
                }
            }
        }
    }

    /// Public variant: same checks, diagnostic detail omitted.
    pub async fn public_probe(&self) -> Value {
        let record = self.probe().await;
        json!({
            "status": if record.healthy() { "ok" } else { "degraded" },
            "products_table": record.products_table,
            "orders_table": record.orders_table,
            "product_count": record.product_count,
            "order_count": record.order_count,
            "writable": record.writable,
        })
    }

    /// Admin variant: full store record plus limiter statistics and
    /// configuration validation warnings.
    pub async fn admin_diagnostic(&self) -> Value {
        let record = self.probe().await;
        let stats = self.limiter.stats();
        json!({
            "status": if record.healthy() { "ok" } else { "degraded" },
            "store": record,
            "rate_limiter": stats,
            "config_warnings": self.config_warnings,
        })
    }
}
