//! Domain-specific error types for OTP issuance and synchronization
//!
//! The taxonomy mirrors the issuance lifecycle: caller errors
//! (`ValidationError`), collaborator failures during delivery, mirror
//! failures (`SyncFailure`), and internal faults. Expiry-clear failures are
//! operational-log only and never reach the original caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Validation errors (caller errors, no side effects occurred)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid identity: {identity}")]
    InvalidIdentity { identity: String },

    #[error("Identity is required")]
    MissingIdentity,
}

/// External-sync failures, distinct by cause so callers can tell a missing
/// target from a transport fault
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncFailure {
    #[error("Target location not found for key: {key}")]
    TargetNotFound { key: String },

    #[error("Owner mismatch at target location for key: {key}")]
    OwnerMismatch { key: String },

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Top-level domain error for OTP operations
#[derive(Error, Debug)]
pub enum DomainError {
    /// Caller error; no state was created
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Notification delivery failed; no record was created and no external
    /// write was attempted, so the caller may retry the whole issuance
    #[error("Mail delivery failed: {message}")]
    Delivery { message: String },

    /// External mirror write failed
    #[error(transparent)]
    Sync(#[from] SyncFailure),

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Stable code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "INVALID_IDENTITY",
            DomainError::Delivery { .. } => "DELIVERY_ERROR",
            DomainError::Sync(_) => "SYNC_ERROR",
            DomainError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

/// Unified error response structure for API responses
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl ToString, message: impl ToString) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            timestamp: Utc::now(),
        }
    }
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        ErrorResponse::new(err.error_code(), err.to_string())
    }
}
