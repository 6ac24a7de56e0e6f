//! HTTP Mail Gateway Implementation
//!
//! Production mail delivery through an HTTP mail gateway. The gateway
//! exposes a JSON message endpoint; this client posts one message per
//! delivery with a bounded timeout and at most one retry.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use otp_shared::config::MailConfig;
use otp_shared::utils::mask_email;

use super::mail_service::MailService;
use crate::InfrastructureError;

#[derive(Debug, Serialize)]
struct OutboundMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse {
    id: String,
}

/// Mail service backed by an HTTP gateway
pub struct GatewayMailService {
    client: reqwest::Client,
    config: MailConfig,
}

impl GatewayMailService {
    /// Create a new gateway mail service
    pub fn new(config: MailConfig) -> Result<Self, InfrastructureError> {
        if config.gateway_url.is_empty() {
            return Err(InfrastructureError::Config(
                "MAIL_GATEWAY_URL not set".to_string(),
            ));
        }
        if config.api_token.is_empty() {
            return Err(InfrastructureError::Config(
                "MAIL_API_TOKEN not set".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            "Gateway mail service initialized with from address: {}",
            mask_email(&config.from_address)
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Self::new(MailConfig::from_env())
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.config.gateway_url.trim_end_matches('/'))
    }

    async fn post_message(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let message = OutboundMessage {
            from: &self.config.from_address,
            to,
            subject,
            text: body,
        };

        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.config.api_token)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(InfrastructureError::Mail(format!(
                "gateway returned {}: {}",
                status, detail
            )));
        }

        let parsed: GatewayResponse = response.json().await?;
        Ok(parsed.id)
    }
}

#[async_trait]
impl MailService for GatewayMailService {
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, InfrastructureError> {
        let masked_to = mask_email(to);
        debug!("Sending mail to {}", masked_to);

        // One bounded retry; collaborator failures are never retried
        // silently more than once
        let first_attempt = self.post_message(to, subject, body).await;
        let message_id = match first_attempt {
            Ok(id) => id,
            Err(e) => {
                warn!(
                    recipient = %masked_to,
                    error = %e,
                    "Mail delivery failed, retrying once"
                );
                self.post_message(to, subject, body).await?
            }
        };

        info!(
            target: "mail_service",
            provider = "gateway",
            recipient = %masked_to,
            message_id = %message_id,
            "Mail sent successfully"
        );

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Gateway"
    }

    async fn is_available(&self) -> bool {
        !self.config.gateway_url.is_empty()
    }
}
