//! Input normalization and validation for the gateway boundary.
//!
//! Every inbound parameter passes through here before any service or store
//! call. Failures carry the offending field name and a human-readable
//! message; the gateway surfaces them verbatim as validation errors.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde_json::Value;
use thiserror::Error;

use crate::domain::orders::CartItem;
use crate::domain::types::Unit;

pub const MAX_NAME_LEN: usize = 255;
const MIN_PHONE_DIGITS: usize = 10;

static MARKUP_STRIPPER: LazyLock<ammonia::Builder<'static>> =
    LazyLock::new(ammonia::Builder::empty);

#[derive(Debug, Clone, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Strip markup from a raw string and trim surrounding whitespace.
pub fn clean_text(raw: &str) -> String {
    MARKUP_STRIPPER.clean(raw).to_string().trim().to_string()
}

/// Clean an optional string field; empty-after-cleaning collapses to absent.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    let cleaned = clean_text(value?);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Clean a required string field, rejecting absent/empty and over-long input.
pub fn required_text(
    field: &'static str,
    value: Option<&str>,
    max_len: usize,
) -> Result<String, FieldError> {
    let cleaned = optional_text(value)
        .ok_or_else(|| FieldError::new(field, "is required and must not be empty"))?;
    if cleaned.chars().count() > max_len {
        return Err(FieldError::new(
            field,
            format!("must be at most {max_len} characters"),
        ));
    }
    Ok(cleaned)
}

/// Parse a positive integer identifier from a JSON value (number or numeric
/// string).
pub fn positive_id(field: &'static str, value: Option<&Value>) -> Result<i64, FieldError> {
    let id = match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| FieldError::new(field, "must be a positive integer"))?;
    if id <= 0 {
        return Err(FieldError::new(field, "must be a positive integer"));
    }
    Ok(id)
}

/// Parse a positive integer identifier from a raw string parameter.
pub fn positive_id_str(field: &'static str, value: &str) -> Result<i64, FieldError> {
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(FieldError::new(field, "must be a positive integer")),
    }
}

/// Normalize a phone number: keep digits, `+`, and whitespace, then require
/// at least ten digits. Absent or empty input is accepted as absent.
pub fn phone(field: &'static str, value: Option<&str>) -> Result<Option<String>, FieldError> {
    let raw = match value {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(None),
    };
    let normalized: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+' || c.is_whitespace())
        .collect();
    let digits = normalized.chars().filter(char::is_ascii_digit).count();
    if digits < MIN_PHONE_DIGITS {
        return Err(FieldError::new(
            field,
            format!("must contain at least {MIN_PHONE_DIGITS} digits"),
        ));
    }
    Ok(Some(normalized.trim().to_string()))
}

/// Parse a decimal from a JSON number or string.
pub fn decimal(field: &'static str, value: Option<&Value>) -> Result<Decimal, FieldError> {
    let parsed = match value {
        Some(Value::Number(n)) => n.to_string().parse::<Decimal>().ok(),
        Some(Value::String(s)) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| FieldError::new(field, "must be a decimal number"))
}

/// Parse a decimal that must be non-negative.
pub fn non_negative_decimal(
    field: &'static str,
    value: Option<&Value>,
) -> Result<Decimal, FieldError> {
    let parsed = decimal(field, value)?;
    if parsed < Decimal::ZERO {
        return Err(FieldError::new(field, "must not be negative"));
    }
    Ok(parsed)
}

/// Parse a decimal that must be strictly positive.
pub fn positive_decimal(field: &'static str, value: Option<&Value>) -> Result<Decimal, FieldError> {
    let parsed = decimal(field, value)?;
    if parsed <= Decimal::ZERO {
        return Err(FieldError::new(field, "must be greater than zero"));
    }
    Ok(parsed)
}

/// Parse a product unit label.
pub fn unit(field: &'static str, value: Option<&Value>) -> Result<Option<Unit>, FieldError> {
    let label = match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_ascii_lowercase(),
        Some(Value::String(_)) | Some(Value::Null) | None => return Ok(None),
        _ => return Err(FieldError::new(field, "must be a unit label")),
    };
    Unit::try_from(label.as_str())
        .map(Some)
        .map_err(|()| FieldError::new(field, format!("unknown unit `{label}`")))
}

/// Validate a cart payload: a non-empty ordered sequence where every item
/// carries a positive product id, a quantity greater than zero, and a
/// non-negative unit price. One bad item rejects the whole cart.
pub fn cart(value: Option<&Value>) -> Result<Vec<CartItem>, FieldError> {
    let items = match value {
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(Value::Array(_)) => {
            return Err(FieldError::new("cart", "must contain at least one item"));
        }
        _ => return Err(FieldError::new("cart", "must be an array of items")),
    };

    let mut cart = Vec::with_capacity(items.len());
    for item in items {
        let Value::Object(fields) = item else {
            return Err(FieldError::new("cart", "every item must be an object"));
        };
        let product_id = positive_id("cart.id", fields.get("id"))?;
        let quantity = match fields.get("qty").and_then(Value::as_i64) {
            Some(qty) if qty > 0 => qty,
            _ => return Err(FieldError::new("cart.qty", "must be greater than zero")),
        };
        let unit_price = non_negative_decimal("cart.price", fields.get("price"))?;
        let unit_label = fields
            .get("unit")
            .and_then(Value::as_str)
            .map(clean_text)
            .unwrap_or_default();
        cart.push(CartItem {
            product_id,
            quantity,
            unit_price,
            unit_label,
        });
    }
    Ok(cart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn clean_text_strips_markup_and_trims() {
        assert_eq!(clean_text("  <b>Tomatoes</b>  "), "Tomatoes");
        assert_eq!(clean_text("<script>alert(1)</script>plain"), "plain");
    }

    #[test]
    fn empty_after_cleaning_is_absent() {
        assert_eq!(optional_text(Some("  <i></i> ")), None);
        assert_eq!(optional_text(Some("ok")), Some("ok".to_string()));
    }

    #[test]
    fn required_text_enforces_length() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(required_text("name", Some(&long), MAX_NAME_LEN).is_err());
        assert!(required_text("name", Some(""), MAX_NAME_LEN).is_err());
        assert_eq!(
            required_text("name", Some("Rice"), MAX_NAME_LEN).map_err(|e| e.field),
            Ok("Rice".to_string())
        );
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(positive_id("id", Some(&json!(7))).ok(), Some(7));
        assert_eq!(positive_id("id", Some(&json!("12"))).ok(), Some(12));
        assert!(positive_id("id", Some(&json!(0))).is_err());
        assert!(positive_id("id", Some(&json!(-3))).is_err());
        assert!(positive_id("id", Some(&json!("abc"))).is_err());
        assert!(positive_id("id", None).is_err());
    }

    #[test]
    fn phone_keeps_digits_plus_and_whitespace() {
        let cleaned = phone("phone", Some("+46 (70) 123-45-67")).expect("valid phone");
        assert_eq!(cleaned.as_deref(), Some("+46 70 1234567"));
    }

    #[test]
    fn phone_requires_ten_digits() {
        assert!(phone("phone", Some("12345")).is_err());
        assert_eq!(phone("phone", Some("")).ok(), Some(None));
        assert_eq!(phone("phone", None).ok(), Some(None));
    }

    #[test]
    fn cart_rejects_non_positive_quantities() {
        let payload = json!([{"id": 1, "qty": 0, "price": "2.50"}]);
        let err = cart(Some(&payload)).expect_err("qty 0 must fail");
        assert_eq!(err.field, "cart.qty");
    }

    #[test]
    fn cart_rejects_negative_prices_atomically() {
        let payload = json!([
            {"id": 1, "qty": 2, "price": "2.50"},
            {"id": 2, "qty": 1, "price": "-0.01"}
        ]);
        assert!(cart(Some(&payload)).is_err());
    }

    #[test]
    fn cart_rejects_empty_payloads() {
        assert!(cart(Some(&json!([]))).is_err());
        assert!(cart(None).is_err());
        assert!(cart(Some(&json!({"id": 1}))).is_err());
    }

    #[test]
    fn cart_accepts_a_well_formed_payload() {
        let payload = json!([
            {"id": 3, "qty": 2, "price": "12.00", "unit": "kg"},
            {"id": 9, "qty": 1, "price": 0, "unit": "piece"}
        ]);
        let cart = cart(Some(&payload)).expect("valid cart");
        assert_eq!(cart.len(), 2);
        assert_eq!(cart[0].product_id, 3);
        assert_eq!(cart[0].quantity, 2);
        assert_eq!(cart[1].unit_price, Decimal::ZERO);
    }

    #[test]
    fn unit_parses_known_labels() {
        assert_eq!(unit("unit", Some(&json!("kg"))).ok(), Some(Some(Unit::Kg)));
        assert_eq!(unit("unit", None).ok(), Some(None));
        assert!(unit("unit", Some(&json!("dozen"))).is_err());
    }
}
