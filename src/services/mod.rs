pub mod account_service;
pub mod session_service;
pub mod student_service;
mod validate;

use thiserror::Error;

use crate::store::StoreError;

/// Service-level failure taxonomy. Transport-agnostic: the HTTP boundary
/// maps each variant to a status in `crate::error`.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input (400)
    #[error("{0}")]
    Validation(String),

    /// Duplicate username/email (400 on the wire)
    #[error("{0}")]
    Conflict(String),

    /// Missing or bad credentials (401)
    #[error("{0}")]
    Unauthorized(String),

    /// Missing resource or ownership mismatch, indistinguishable (404)
    #[error("{0}")]
    NotFound(String),

    /// Broken internal invariant, surfaced but non-fatal (404)
    #[error("{0}")]
    Integrity(String),

    /// Unexpected internal failure (500, detail logged only)
    #[error("{0}")]
    Internal(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
