//! Issuance service module for email-based verification codes
//!
//! This module provides the complete code-issuance workflow:
//! - Identity validation and normalization
//! - Code generation and record keeping
//! - Mail delivery through the notification seam
//! - Mirroring into the external sheet store

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::IssuanceConfig;
pub use service::IssuanceService;
pub use traits::{ExternalStoreTrait, MailerTrait};
pub use types::{IssueOutcome, IssueReceipt};
