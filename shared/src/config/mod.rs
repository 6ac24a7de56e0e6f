//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `server` - HTTP server configuration
//! - `otp` - Code validity window and expiry sweep settings
//! - `mail` - Mail delivery provider configuration
//! - `sheet` - External sheet-store configuration

pub mod mail;
pub mod otp;
pub mod server;
pub mod sheet;

pub use mail::MailConfig;
pub use otp::{KeyMappingRule, OtpConfig};
pub use server::ServerConfig;
pub use sheet::SheetConfig;
