//! Common mail service interface

use async_trait::async_trait;

use crate::InfrastructureError;

/// Trait for mail providers
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send a mail message. Returns the provider message id on success.
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Provider name for logging and diagnostics
    fn provider_name(&self) -> &str;

    /// Whether the provider is currently able to deliver
    async fn is_available(&self) -> bool;
}

/// Body text for a verification-code mail
pub fn verification_code_body(code: &str, validity_minutes: i64) -> String {
    format!(
        "Your OTP is: {}. It will expire in {} minutes.",
        code, validity_minutes
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verification_code_body() {
        let body = verification_code_body("123456", 3);
        assert_eq!(body, "Your OTP is: 123456. It will expire in 3 minutes.");
    }
}
