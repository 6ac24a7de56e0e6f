//! Adapter bridging the core mailer seam to a concrete mail service

use std::sync::Arc;

use async_trait::async_trait;

use otp_core::services::issuance::MailerTrait;
use otp_shared::utils::is_valid_email;

use super::mail_service::{verification_code_body, MailService};

/// Adapts a [`MailService`] provider to the core's mailer contract.
pub struct MailerAdapter {
    service: Arc<dyn MailService>,
    subject: String,
}

impl MailerAdapter {
    pub fn new(service: Arc<dyn MailService>, subject: impl Into<String>) -> Self {
        Self {
            service,
            subject: subject.into(),
        }
    }
}

#[async_trait]
impl MailerTrait for MailerAdapter {
    async fn send_code_email(
        &self,
        to: &str,
        code: &str,
        validity_minutes: i64,
    ) -> Result<String, String> {
        let body = verification_code_body(code, validity_minutes);
        self.service
            .send_mail(to, &self.subject, &body)
            .await
            .map_err(|e| e.to_string())
    }

    fn is_valid_email(&self, email: &str) -> bool {
        is_valid_email(email)
    }
}
