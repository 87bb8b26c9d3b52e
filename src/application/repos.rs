//! Repository traits describing the persistence collaborator.

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use crate::domain::catalog::ProductRecord;
use crate::domain::orders::{CartItem, OrderRecord};
use crate::domain::types::Unit;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Fields required to create a product. The store assigns id, active flag,
/// and timestamps.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image: Option<String>,
    pub unit: Unit,
    pub stock_quantity: i64,
    pub sort_order: i32,
}

/// Partial update of a product's mutable fields. `active` is deliberately
/// absent: soft delete owns that flag, and a future restore operation needs
/// its own repository method rather than an overloaded update.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub unit: Option<Unit>,
    pub stock_quantity: Option<i64>,
    pub sort_order: Option<i32>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.unit.is_none()
            && self.stock_quantity.is_none()
            && self.sort_order.is_none()
    }
}

/// A validated order ready for insertion.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub cart: Vec<CartItem>,
    pub customer_phone: Option<String>,
    pub notes: Option<String>,
    pub total: Decimal,
}

/// Per-day slice of the analytics window.
#[derive(Debug, Clone, Serialize)]
pub struct DailyStat {
    pub day: String,
    pub order_count: i64,
    pub revenue: Decimal,
}

/// Aggregate order statistics over a trailing day-range window.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateStats {
    pub window_days: u32,
    pub order_count: i64,
    pub revenue: Decimal,
    pub average_order: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<Vec<DailyStat>>,
}

/// Raw store health observations. `failure` carries diagnostic detail that
/// the public probe must not expose.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticRecord {
    pub products_table: bool,
    pub orders_table: bool,
    pub product_count: Option<i64>,
    pub order_count: Option<i64>,
    pub writable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl DiagnosticRecord {
    pub fn healthy(&self) -> bool {
        self.products_table && self.orders_table && self.writable && self.failure.is_none()
    }
}

#[async_trait]
pub trait CatalogRepo: Send + Sync {
    async fn list_products(
        &self,
        include_inactive: bool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductRecord>, RepoError>;

    async fn count_products(&self, include_inactive: bool) -> Result<i64, RepoError>;

    async fn get_product(&self, id: i64) -> Result<Option<ProductRecord>, RepoError>;

    async fn create_product(&self, draft: ProductDraft) -> Result<ProductRecord, RepoError>;

    /// Returns `false` when no active row matched the id.
    async fn update_product(&self, id: i64, patch: ProductPatch) -> Result<bool, RepoError>;

    /// Returns `false` when the product was absent or already inactive.
    async fn soft_delete_product(&self, id: i64) -> Result<bool, RepoError>;
}

#[async_trait]
pub trait OrdersRepo: Send + Sync {
    async fn create_order(&self, order: NewOrder) -> Result<i64, RepoError>;

    async fn recent_orders(&self, limit: i64, offset: i64) -> Result<Vec<OrderRecord>, RepoError>;

    async fn analytics(&self, days: u32, detailed: bool) -> Result<AggregateStats, RepoError>;
}

#[async_trait]
pub trait DiagnosticsRepo: Send + Sync {
    async fn health_check(&self) -> Result<DiagnosticRecord, RepoError>;
}
