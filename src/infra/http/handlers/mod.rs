//! Gateway operation handlers.

pub mod admin;
pub mod public;

use std::collections::HashMap;

use crate::application::sanitize::FieldError;

fn param_i64(
    params: &HashMap<String, String>,
    field: &'static str,
) -> Result<Option<i64>, FieldError> {
    match params.get(field) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| FieldError::new(field, "must be an integer")),
    }
}

fn param_u32(
    params: &HashMap<String, String>,
    field: &'static str,
) -> Result<Option<u32>, FieldError> {
    match params.get(field) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map(Some)
            .map_err(|_| FieldError::new(field, "must be a non-negative integer")),
    }
}

fn param_bool(params: &HashMap<String, String>, field: &str) -> bool {
    params
        .get(field)
        .is_some_and(|raw| matches!(raw.trim(), "1" | "true" | "yes"))
}
