use axum::http::StatusCode;
use thiserror::Error;

use crate::application::catalog::CatalogError;
use crate::application::orders::OrderError;
use crate::application::repos::RepoError;
use crate::application::sanitize::FieldError;
use crate::domain::error::DomainError;

/// Request-path failure taxonomy. Validation and auth are decided at the
/// gateway before any store call; store failures are mapped to a generic
/// message with detail suppressed outside debug mode.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Validation(#[from] FieldError),
    #[error("authentication required")]
    Auth,
    #[error("rate limit exceeded")]
    RateLimited { retry_after: u64 },
    #[error("{what} not found")]
    NotFound { what: &'static str },
    #[error(transparent)]
    Store(#[from] RepoError),
    #[error("internal error: {0}")]
    System(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Auth => StatusCode::UNAUTHORIZED,
            GatewayError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::Store(RepoError::NotFound) => StatusCode::NOT_FOUND,
            GatewayError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::System(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Validation failures carry field-level detail;
    /// everything server-side stays generic.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Validation(field) => field.to_string(),
            GatewayError::Auth => "Authentication required".to_string(),
            GatewayError::RateLimited { .. } => "Rate limit exceeded".to_string(),
            GatewayError::NotFound { what } => format!("{what} not found"),
            GatewayError::Store(RepoError::NotFound) => "Resource not found".to_string(),
            GatewayError::Store(_) => "Service temporarily unavailable".to_string(),
            GatewayError::System(_) => "Unexpected error occurred".to_string(),
        }
    }

    /// Extended detail, emitted only when the service runs in debug mode.
    pub fn detail(&self) -> Option<String> {
        match self {
            GatewayError::Store(err) => Some(err.to_string()),
            GatewayError::System(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn retry_after(&self) -> Option<u64> {
        match self {
            GatewayError::RateLimited { retry_after } => Some(*retry_after),
            _ => None,
        }
    }
}

impl From<CatalogError> for GatewayError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(field) => GatewayError::Validation(field),
            CatalogError::NotFound => GatewayError::NotFound { what: "product" },
            CatalogError::Repo(repo) => GatewayError::Store(repo),
        }
    }
}

impl From<OrderError> for GatewayError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Validation(field) => GatewayError::Validation(field),
            OrderError::Domain(DomainError::Validation { message }) => {
                GatewayError::Validation(FieldError::new("cart", message))
            }
            OrderError::Domain(domain) => GatewayError::System(domain.to_string()),
            OrderError::Repo(repo) => GatewayError::Store(repo),
        }
    }
}
