//! # OtpRelay Core
//!
//! Core business logic and domain layer for the OtpRelay backend.
//! This crate contains the OTP record entity, the authoritative in-process
//! record store, the issuance orchestrator, the expiry sweeper, and the
//! error types that form the foundation of the application.

pub mod domain;
pub mod errors;
pub mod services;
pub mod store;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
pub use store::*;
