//! Error types for the OTP lifecycle domain

pub mod domain_error;

pub use domain_error::{
    DomainError, DomainResult, ErrorResponse, SyncFailure, ValidationError,
};
