//! Catalog entities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::types::Unit;

/// A catalog product as persisted by the store.
///
/// `active = false` marks a soft-deleted product; default reads never return
/// inactive rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub image: Option<String>,
    pub unit: Unit,
    pub stock_quantity: i64,
    pub active: bool,
    pub sort_order: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}
