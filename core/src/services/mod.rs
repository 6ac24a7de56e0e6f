//! Business services for the OTP lifecycle

pub mod expiry;
pub mod issuance;

// Re-export commonly used types
pub use expiry::{ExpirySweeper, SweepConfig, SweepResult};
pub use issuance::{
    ExternalStoreTrait, IssuanceConfig, IssuanceService, IssueOutcome, IssueReceipt, MailerTrait,
};
