//! Traits for mail delivery and external-store integration

use async_trait::async_trait;

use crate::errors::SyncFailure;

/// Trait for mail delivery integration
#[async_trait]
pub trait MailerTrait: Send + Sync {
    /// Send a verification code to the given address. Returns the provider
    /// message id on success.
    async fn send_code_email(
        &self,
        to: &str,
        code: &str,
        validity_minutes: i64,
    ) -> Result<String, String>;

    /// Check if the email address format is deliverable
    fn is_valid_email(&self, email: &str) -> bool;
}

/// Trait for the external record-store mirror
#[async_trait]
pub trait ExternalStoreTrait: Send + Sync {
    /// Overwrite the external projection at the key's location with `code`.
    /// `identity` is the raw identity, used for the optional owner-match
    /// verification at the target location.
    async fn publish(&self, key: &str, identity: &str, code: &str) -> Result<(), SyncFailure>;

    /// Overwrite the external projection at the key's location with the
    /// empty value. Idempotent; clearing an already-empty location succeeds.
    async fn clear(&self, key: &str) -> Result<(), SyncFailure>;
}
