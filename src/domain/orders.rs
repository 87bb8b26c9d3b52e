//! Order entities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::error::DomainError;
use super::types::OrderStatus;

/// One line of a submitted cart. Transient: persisted only as part of an
/// order's serialized cart, never as its own row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub unit_label: String,
}

impl CartItem {
    /// Line total (unit price × quantity).
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Compute an order total from its cart.
///
/// The cart must already be validated (non-empty, positive quantities,
/// non-negative prices); violations here indicate a bug upstream.
pub fn cart_total(cart: &[CartItem]) -> Result<Decimal, DomainError> {
    if cart.is_empty() {
        return Err(DomainError::validation("cart must not be empty"));
    }
    let total: Decimal = cart.iter().map(CartItem::line_total).sum();
    if total < Decimal::ZERO {
        return Err(DomainError::invariant("order total must not be negative"));
    }
    Ok(total)
}

/// A customer order. Append-only from the gateway's perspective: the gateway
/// creates orders and reads them back, it never updates or deletes one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: i64,
    pub cart: Vec<CartItem>,
    pub customer_phone: Option<String>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn line_total_multiplies_price_by_quantity() {
        let item = CartItem {
            product_id: 1,
            quantity: 3,
            unit_price: Decimal::new(250, 2),
            unit_label: "kg".to_string(),
        };
        assert_eq!(item.line_total(), Decimal::new(750, 2));
    }

    #[test]
    fn cart_total_sums_line_totals() {
        let cart = vec![
            CartItem {
                product_id: 1,
                quantity: 2,
                unit_price: Decimal::new(1200, 2),
                unit_label: "kg".to_string(),
            },
            CartItem {
                product_id: 2,
                quantity: 1,
                unit_price: Decimal::new(50, 2),
                unit_label: "piece".to_string(),
            },
        ];
        assert_eq!(cart_total(&cart).expect("total"), Decimal::new(2450, 2));
    }

    #[test]
    fn cart_total_rejects_empty_carts() {
        assert!(cart_total(&[]).is_err());
    }
}
