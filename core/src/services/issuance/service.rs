//! Main issuance service implementation

use std::sync::Arc;

use chrono::Utc;

use otp_shared::config::KeyMappingRule;

use crate::domain::entities::OtpRecord;
use crate::domain::value_objects::{NormalizedIdentity, MAX_KEY_LENGTH};
use crate::errors::{DomainError, DomainResult, ValidationError};
use crate::store::OtpStore;

use super::config::IssuanceConfig;
use super::traits::{ExternalStoreTrait, MailerTrait};
use super::types::{IssueOutcome, IssueReceipt};

/// Issuance service orchestrating the OTP lifecycle entry point.
///
/// For each request it normalizes the identity, generates a code, delivers
/// it by mail, records it in the store, and mirrors it into the external
/// sheet. The store and the external connection handle are process-wide
/// singletons injected at construction.
pub struct IssuanceService<M: MailerTrait, X: ExternalStoreTrait> {
    /// Mail delivery implementation
    mailer: Arc<M>,
    /// External sheet-store adapter
    external: Arc<X>,
    /// Authoritative record store
    store: Arc<OtpStore>,
    /// Service configuration
    config: IssuanceConfig,
}

impl<M: MailerTrait, X: ExternalStoreTrait> IssuanceService<M, X> {
    /// Create a new issuance service
    pub fn new(
        mailer: Arc<M>,
        external: Arc<X>,
        store: Arc<OtpStore>,
        config: IssuanceConfig,
    ) -> Self {
        Self {
            mailer,
            external,
            store,
            config,
        }
    }

    /// Map a raw identity to the key its record is stored under.
    ///
    /// The key doubles as the external location, so both mapping rules
    /// honor the external store's length cap.
    fn identity_key(&self, raw_identity: &str) -> DomainResult<String> {
        match self.config.key_mapping {
            KeyMappingRule::Normalized => {
                Ok(NormalizedIdentity::normalize(raw_identity)?.into_string())
            }
            KeyMappingRule::Verbatim => {
                if raw_identity.is_empty() || raw_identity.len() > MAX_KEY_LENGTH {
                    return Err(DomainError::Validation(ValidationError::InvalidIdentity {
                        identity: raw_identity.to_string(),
                    }));
                }
                Ok(raw_identity.to_string())
            }
        }
    }

    /// Issue a verification code for an email identity.
    ///
    /// The request walks the lifecycle in order:
    /// 1. Validate and normalize the identity
    /// 2. Generate a fresh 6-digit code
    /// 3. Deliver it by mail; a delivery failure leaves no state behind
    /// 4. Record it in the store (superseding any outstanding code)
    /// 5. Publish it to the external mirror; a publish failure keeps the
    ///    local record live and is reported as a partial success
    ///
    /// Re-issuance for an identity with an outstanding code is not a
    /// conflict; the new record supersedes the old one.
    pub async fn issue_code(&self, raw_identity: &str) -> DomainResult<IssueOutcome> {
        let raw_identity = raw_identity.trim();
        if raw_identity.is_empty() {
            return Err(DomainError::Validation(ValidationError::MissingIdentity));
        }

        if !self.mailer.is_valid_email(raw_identity) {
            return Err(DomainError::Validation(ValidationError::InvalidIdentity {
                identity: raw_identity.to_string(),
            }));
        }

        let key = self.identity_key(raw_identity)?;

        let record = OtpRecord::new(
            key.as_str().to_string(),
            Utc::now(),
            self.config.validity_minutes,
        );

        tracing::info!(
            identity_key = key.as_str(),
            issuance_id = %record.id,
            event = "otp_generated",
            "Generated new verification code"
        );

        // Deliver first. A code that cannot reach the user must not go live.
        let message_id = self
            .mailer
            .send_code_email(raw_identity, &record.code, self.config.validity_minutes)
            .await
            .map_err(|e| {
                tracing::warn!(
                    identity_key = key.as_str(),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Mail delivery failed, no record created"
                );
                DomainError::Delivery { message: e }
            })?;

        let receipt = IssueReceipt {
            issuance_id: record.id,
            identity_key: key.as_str().to_string(),
            message_id,
            expires_at: record.expires_at,
        };
        let code = record.code.clone();

        // The record becomes live only after delivery succeeded. The expiry
        // sweep retires it once expires_at passes.
        self.store.put(record);

        tracing::info!(
            identity_key = key.as_str(),
            issuance_id = %receipt.issuance_id,
            event = "otp_recorded",
            "Verification code recorded"
        );

        match self.external.publish(key.as_str(), raw_identity, &code).await {
            Ok(()) => {
                tracing::info!(
                    identity_key = key.as_str(),
                    event = "otp_published",
                    "Verification code mirrored to external store"
                );
                Ok(IssueOutcome::Acknowledged(receipt))
            }
            Err(failure) => {
                // The user already holds the code; rolling back the record
                // would invalidate a delivered code. Report the stale mirror
                // instead.
                tracing::warn!(
                    identity_key = key.as_str(),
                    error = %failure,
                    event = "otp_publish_failed",
                    "External publish failed, local record stays live"
                );
                Ok(IssueOutcome::MirrorFailed { receipt, failure })
            }
        }
    }

    /// Retire an outstanding code early: remove the local record and clear
    /// the external projection. Absent records are not an error.
    pub async fn clear_code(&self, raw_identity: &str) -> DomainResult<()> {
        let key = self.identity_key(raw_identity)?;

        self.store.remove(key.as_str());

        if let Err(failure) = self.external.clear(key.as_str()).await {
            tracing::warn!(
                identity_key = key.as_str(),
                error = %failure,
                event = "otp_clear_failed",
                "External clear failed during early retirement"
            );
        }

        Ok(())
    }

    /// Get the outstanding record for an identity, if any
    pub fn outstanding_code(&self, raw_identity: &str) -> DomainResult<Option<OtpRecord>> {
        let key = self.identity_key(raw_identity)?;
        Ok(self.store.get(key.as_str()))
    }
}
