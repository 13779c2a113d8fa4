use thiserror::Error;

use crate::domains::moderation::models::ModerationStatus;
use crate::kernel::GatewayError;

/// Errors produced by directory and moderation operations.
///
/// Validation, transition and lookup failures are detected locally. Anything
/// the database reports comes back as `Upstream` with its message untouched.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Cannot move item from {from} to {to}")]
    InvalidTransition {
        from: ModerationStatus,
        to: ModerationStatus,
    },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Duplicate submission: {0}")]
    DuplicateSubmission(String),

    #[error(transparent)]
    Upstream(#[from] GatewayError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        DomainError::NotFound(what.into())
    }

    /// Stable machine-readable name, used in HTTP error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "validation_error",
            DomainError::InvalidTransition { .. } => "invalid_transition",
            DomainError::NotFound(_) => "not_found",
            DomainError::DuplicateSubmission(_) => "duplicate_submission",
            DomainError::Upstream(_) => "upstream_error",
        }
    }
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;
