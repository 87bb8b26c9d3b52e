//! Shared domain enumerations aligned with persisted database enums.

use serde::{Deserialize, Serialize};

/// Unit of sale for a catalog product (mirrors Postgres enum `product_unit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "product_unit", rename_all = "snake_case")]
pub enum Unit {
    Kg,
    Gram,
    Packet,
    Piece,
    Liter,
    Box,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Gram => "gram",
            Unit::Packet => "packet",
            Unit::Piece => "piece",
            Unit::Liter => "liter",
            Unit::Box => "box",
        }
    }
}

impl TryFrom<&str> for Unit {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "kg" => Ok(Unit::Kg),
            "gram" => Ok(Unit::Gram),
            "packet" => Ok(Unit::Packet),
            "piece" => Ok(Unit::Piece),
            "liter" => Ok(Unit::Liter),
            "box" => Ok(Unit::Box),
            _ => Err(()),
        }
    }
}

/// Lifecycle of a customer order (mirrors Postgres enum `order_status`).
///
/// Orders enter as `Pending`; later transitions happen outside the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}
