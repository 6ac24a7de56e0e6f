//! Mock Mail Service Implementation
//!
//! A mock implementation of the mail service for development and testing.
//! Messages are logged to the console instead of being sent.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use otp_shared::utils::mask_email;

use super::mail_service::MailService;
use crate::InfrastructureError;

/// Mock mail service for development and testing
///
/// This implementation:
/// - Logs messages to the console
/// - Generates mock message IDs
/// - Tracks message count for testing
#[derive(Clone)]
pub struct MockMailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print messages to console
    console_output: bool,
}

impl MockMailService {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }

    /// Reset the message counter
    pub fn reset_counter(&self) {
        self.message_count.store(0, Ordering::SeqCst);
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let masked_to = mask_email(to);

        // Simulate failure if configured
        if self.simulate_failure {
            warn!(
                "Mock mail service simulating failure for recipient: {}",
                masked_to
            );
            return Err(InfrastructureError::Mail(
                "Simulated mail delivery failure".to_string(),
            ));
        }

        // Generate mock message ID
        let message_id = format!("mock_{}", Uuid::new_v4());

        // Increment message counter
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        if self.console_output {
            // Console output for development - show full message
            println!("\n{}", "=".repeat(60));
            println!("MOCK MAIL SERVICE - MESSAGE #{}", count);
            println!("{}", "=".repeat(60));
            println!("To: {} (masked: {})", to, masked_to);
            println!("Subject: {}", subject);
            println!("Message ID: {}", message_id);
            println!("Body: {}", body);
            println!("{}\n", "=".repeat(60));
        }

        // Structured logging for production
        info!(
            target: "mail_service",
            provider = "mock",
            recipient = %masked_to,
            message_id = %message_id,
            body_length = body.len(),
            "Mail sent successfully (mock)"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }

    async fn is_available(&self) -> bool {
        !self.simulate_failure
    }
}
