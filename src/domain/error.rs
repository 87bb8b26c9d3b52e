use thiserror::Error;

/// Failures raised by domain-level rules, independent of any transport or
/// storage concern.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("`{entity}` does not exist")]
    NotFound { entity: &'static str },
    #[error("{message}")]
    Validation { message: String },
    #[error("invariant violated: {message}")]
    Invariant { message: String },
}

impl DomainError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::Invariant {
            message: message.into(),
        }
    }
}
