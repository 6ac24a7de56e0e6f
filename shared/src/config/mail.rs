//! Mail delivery configuration module

use serde::{Deserialize, Serialize};

/// Mail delivery provider configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Mail provider ("gateway" or "mock")
    pub provider: String,

    /// Base URL of the HTTP mail gateway
    pub gateway_url: String,

    /// API token for the gateway
    pub api_token: String,

    /// From address used for outgoing mail
    pub from_address: String,

    /// Subject line for verification-code mail
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: "mock".to_string(),
            gateway_url: String::new(),
            api_token: String::new(),
            from_address: "no-reply@otprelay.dev".to_string(),
            subject: default_subject(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl MailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            provider: std::env::var("MAIL_PROVIDER").unwrap_or_else(|_| "mock".to_string()),
            gateway_url: std::env::var("MAIL_GATEWAY_URL").unwrap_or_default(),
            api_token: std::env::var("MAIL_API_TOKEN").unwrap_or_default(),
            from_address: std::env::var("MAIL_FROM_ADDRESS")
                .unwrap_or_else(|_| "no-reply@otprelay.dev".to_string()),
            subject: std::env::var("MAIL_SUBJECT").unwrap_or_else(|_| default_subject()),
            request_timeout_secs: std::env::var("MAIL_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_request_timeout),
        }
    }
}

fn default_subject() -> String {
    "Your OTP Code".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_config_default() {
        let config = MailConfig::default();
        assert_eq!(config.provider, "mock");
        assert_eq!(config.subject, "Your OTP Code");
        assert_eq!(config.request_timeout_secs, 10);
    }
}
