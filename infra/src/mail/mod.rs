//! Mail Delivery Module
//!
//! This module provides mail service implementations for sending
//! verification codes. It includes a mock implementation for development
//! and an HTTP gateway client for production delivery.
//!
//! - **MailService trait**: common interface for all providers
//! - **Mock implementation**: console output for development
//! - **Gateway support**: production delivery via an HTTP mail gateway
//! - **Security**: recipient addresses are masked in logs

use std::sync::Arc;

use otp_shared::config::MailConfig;

pub mod gateway;
pub mod mail_service;
pub mod mailer_adapter;
pub mod mock_mail;

// Re-export commonly used types
pub use gateway::GatewayMailService;
pub use mail_service::{verification_code_body, MailService};
pub use mailer_adapter::MailerAdapter;
pub use mock_mail::MockMailService;

/// Create a mail service based on configuration.
///
/// Returns the provider named by the configuration, falling back to the
/// mock implementation when the gateway cannot be constructed.
pub fn create_mail_service(config: &MailConfig) -> Arc<dyn MailService> {
    match config.provider.as_str() {
        "mock" => Arc::new(MockMailService::new()),
        "gateway" => match GatewayMailService::new(config.clone()) {
            Ok(service) => Arc::new(service),
            Err(e) => {
                tracing::error!("Failed to initialize gateway mail service: {}", e);
                tracing::warn!("Falling back to mock mail service");
                Arc::new(MockMailService::new())
            }
        },
        other => {
            tracing::warn!("Unknown mail provider '{}', using mock implementation", other);
            Arc::new(MockMailService::new())
        }
    }
}
