//! Adapter implementing the core external-store contract over the sheet
//! client

use async_trait::async_trait;
use tracing::{debug, warn};

use otp_core::errors::SyncFailure;
use otp_core::services::issuance::ExternalStoreTrait;
use otp_shared::utils::mask_email;

use super::client::SheetClient;
use crate::InfrastructureError;

/// Mirrors outstanding codes into the external sheet store.
///
/// The normalized identity key doubles as the tab name; the code and the
/// owning identity live in fixed cells on that tab.
pub struct SheetSyncAdapter {
    client: SheetClient,
}

impl SheetSyncAdapter {
    pub fn new(client: SheetClient) -> Self {
        Self { client }
    }

    fn map_failure(key: &str, error: InfrastructureError) -> SyncFailure {
        match error {
            InfrastructureError::NotFound(_) => SyncFailure::TargetNotFound {
                key: key.to_string(),
            },
            other => SyncFailure::Transport(other.to_string()),
        }
    }

    async fn verify_owner(&self, key: &str, identity: &str) -> Result<(), SyncFailure> {
        let owner_cell = &self.client.config().owner_cell;
        let owner = self
            .client
            .read_cell(key, owner_cell)
            .await
            .map_err(|e| Self::map_failure(key, e))?;

        match owner {
            Some(recorded) if recorded != identity => {
                warn!(
                    key = %key,
                    recorded_owner = %mask_email(&recorded),
                    "Sheet tab owner does not match the requesting identity"
                );
                Err(SyncFailure::OwnerMismatch {
                    key: key.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ExternalStoreTrait for SheetSyncAdapter {
    async fn publish(&self, key: &str, identity: &str, code: &str) -> Result<(), SyncFailure> {
        let config = self.client.config();

        if config.verify_target {
            let exists = self
                .client
                .tab_exists(key)
                .await
                .map_err(|e| Self::map_failure(key, e))?;
            if !exists {
                return Err(SyncFailure::TargetNotFound {
                    key: key.to_string(),
                });
            }
        }

        self.verify_owner(key, identity).await?;

        self.client
            .write_cell(key, &config.code_cell, code)
            .await
            .map_err(|e| Self::map_failure(key, e))?;

        debug!(key = %key, "Code published to sheet store");
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), SyncFailure> {
        let config = self.client.config();

        match self.client.write_cell(key, &config.code_cell, "").await {
            Ok(()) => {
                debug!(key = %key, "Code cleared from sheet store");
                Ok(())
            }
            // A tab that no longer exists has nothing left to clear
            Err(InfrastructureError::NotFound(_)) => Ok(()),
            Err(other) => Err(SyncFailure::Transport(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_missing_target() {
        let failure = SheetSyncAdapter::map_failure(
            "user_example_com",
            InfrastructureError::NotFound("sheet tab 'user_example_com' does not exist".into()),
        );
        assert!(matches!(failure, SyncFailure::TargetNotFound { .. }));
    }

    #[test]
    fn test_other_errors_map_to_transport() {
        let failure = SheetSyncAdapter::map_failure(
            "user_example_com",
            InfrastructureError::Sheet("cell write returned 500".into()),
        );
        assert!(matches!(failure, SyncFailure::Transport(_)));
    }
}
