//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the OtpRelay
//! application. It provides concrete implementations for the external
//! collaborators the core orchestrates:
//! - **Mail**: HTTP mail-gateway delivery and a mock for development
//! - **Sheet**: sheet-store client and the external sync adapter

/// Mail delivery module - gateway and mock providers
pub mod mail;

/// Sheet-store module - HTTP client and sync adapter
pub mod sheet;

use otp_shared::config::{MailConfig, SheetConfig};

/// Infrastructure configuration settings
#[derive(Debug, Clone)]
pub struct InfrastructureConfig {
    /// Mail delivery configuration
    pub mail: MailConfig,
    /// Sheet-store configuration
    pub sheet: SheetConfig,
}

/// Load infrastructure configuration from environment
pub fn load_config() -> InfrastructureConfig {
    dotenvy::dotenv().ok(); // Load .env file if present

    InfrastructureConfig {
        mail: MailConfig::from_env(),
        sheet: SheetConfig::from_env(),
    }
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Mail delivery error
    #[error("Mail service error: {0}")]
    Mail(String),

    /// Sheet-store error
    #[error("Sheet service error: {0}")]
    Sheet(String),
}
