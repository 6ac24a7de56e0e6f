//! Periodic sweep for expired OTP records
//!
//! Each cycle removes every record past its validity window and requests
//! the external clear for it. A failed clear is retried once; a still
//! failing clear is logged and never resurrects the local record, which is
//! authoritative and already gone.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::errors::{DomainError, DomainResult};
use crate::services::issuance::ExternalStoreTrait;
use crate::store::OtpStore;

use super::config::SweepConfig;

/// Service retiring expired records and their external projections
pub struct ExpirySweeper<X: ExternalStoreTrait + 'static> {
    store: Arc<OtpStore>,
    external: Arc<X>,
    config: SweepConfig,
}

impl<X: ExternalStoreTrait> ExpirySweeper<X> {
    /// Create a new expiry sweeper.
    ///
    /// Fails if the sweep interval is not strictly smaller than the
    /// validity window; otherwise a code could stay visible for up to
    /// `validity + interval` past issuance without that slack being the
    /// documented, bounded grace period.
    pub fn new(
        store: Arc<OtpStore>,
        external: Arc<X>,
        config: SweepConfig,
        validity_minutes: i64,
    ) -> DomainResult<Self> {
        let validity_seconds = (validity_minutes.max(0) as u64) * 60;
        if config.enabled && config.interval_seconds >= validity_seconds {
            return Err(DomainError::Internal {
                message: format!(
                    "sweep interval ({}s) must be smaller than the validity window ({}s)",
                    config.interval_seconds, validity_seconds
                ),
            });
        }

        info!(
            interval_seconds = config.interval_seconds,
            validity_seconds,
            "Expiry sweeper configured; worst-case visibility slack is one sweep interval"
        );

        Ok(Self {
            store,
            external,
            config,
        })
    }

    /// Run a single sweep cycle against the current clock
    pub async fn run_sweep(&self) -> SweepResult {
        self.run_sweep_at(Utc::now()).await
    }

    /// Run a single sweep cycle at the given instant.
    ///
    /// Removes every record with `expires_at <= now`, then clears each
    /// identity's external projection with at most one retry.
    pub async fn run_sweep_at(&self, now: DateTime<Utc>) -> SweepResult {
        let retired = self.store.sweep_expired(now);
        let mut result = SweepResult {
            expired_removed: retired.len(),
            clear_failures: Vec::new(),
        };

        if retired.is_empty() {
            return result;
        }

        info!(
            count = retired.len(),
            event = "otp_sweep",
            "Retiring expired verification codes"
        );

        for identity_key in retired {
            if let Err(failure) = self.clear_with_retry(&identity_key).await {
                // The local record is already gone; the stale mirror is an
                // operational concern, not a caller-visible error.
                error!(
                    identity_key = %identity_key,
                    error = %failure,
                    event = "otp_expiry_clear_failed",
                    "External clear failed after retry"
                );
                result.clear_failures.push(identity_key);
            }
        }

        result
    }

    /// Clear the external projection with exactly one retry
    async fn clear_with_retry(&self, identity_key: &str) -> Result<(), crate::errors::SyncFailure> {
        match self.external.clear(identity_key).await {
            Ok(()) => Ok(()),
            Err(first) => {
                warn!(
                    identity_key = %identity_key,
                    error = %first,
                    event = "otp_expiry_clear_retry",
                    "External clear failed, retrying once"
                );
                self.external.clear(identity_key).await
            }
        }
    }

    /// Start the sweeper as a background task.
    ///
    /// Spawns a tokio task that runs a sweep cycle at the configured
    /// interval for the lifetime of the process.
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Expiry sweeper is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Expiry sweeper started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                let result = self.run_sweep().await;
                if !result.clear_failures.is_empty() {
                    warn!(
                        failures = result.clear_failures.len(),
                        "Sweep completed with external clear failures"
                    );
                }
            }
        });
    }
}

/// Result of one sweep cycle
#[derive(Debug, Default)]
pub struct SweepResult {
    /// Number of expired records removed from the store
    pub expired_removed: usize,
    /// Identities whose external clear still failed after the retry
    pub clear_failures: Vec<String>,
}

impl SweepResult {
    /// Whether every external clear went through
    pub fn is_clean(&self) -> bool {
        self.clear_failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OtpRecord;
    use crate::errors::SyncFailure;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // External store stub tracking clear calls, optionally failing the
    // first N attempts per key
    struct StubExternalStore {
        clears: Mutex<HashMap<String, u32>>,
        failures_per_key: u32,
    }

    impl StubExternalStore {
        fn new(failures_per_key: u32) -> Self {
            Self {
                clears: Mutex::new(HashMap::new()),
                failures_per_key,
            }
        }

        fn clear_count(&self, key: &str) -> u32 {
            *self.clears.lock().unwrap().get(key).unwrap_or(&0)
        }
    }

    #[async_trait]
    impl ExternalStoreTrait for StubExternalStore {
        async fn publish(&self, _key: &str, _identity: &str, _code: &str) -> Result<(), SyncFailure> {
            Ok(())
        }

        async fn clear(&self, key: &str) -> Result<(), SyncFailure> {
            let mut clears = self.clears.lock().unwrap();
            let count = clears.entry(key.to_string()).or_insert(0);
            *count += 1;
            if *count <= self.failures_per_key {
                Err(SyncFailure::Transport("connection reset".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn sweeper_with(
        store: Arc<OtpStore>,
        external: Arc<StubExternalStore>,
    ) -> ExpirySweeper<StubExternalStore> {
        ExpirySweeper::new(store, external, SweepConfig::default(), 3).unwrap()
    }

    #[test]
    fn test_rejects_interval_not_below_validity() {
        let store = Arc::new(OtpStore::new());
        let external = Arc::new(StubExternalStore::new(0));
        let config = SweepConfig {
            interval_seconds: 180,
            enabled: true,
        };
        assert!(ExpirySweeper::new(store, external, config, 3).is_err());
    }

    #[test]
    fn test_disabled_sweeper_accepts_any_interval() {
        let store = Arc::new(OtpStore::new());
        let external = Arc::new(StubExternalStore::new(0));
        let config = SweepConfig {
            interval_seconds: 3600,
            enabled: false,
        };
        assert!(ExpirySweeper::new(store, external, config, 3).is_ok());
    }

    #[tokio::test]
    async fn test_sweep_retires_expired_and_clears_mirror() {
        let store = Arc::new(OtpStore::new());
        let external = Arc::new(StubExternalStore::new(0));
        let t0 = Utc::now();

        store.put(OtpRecord::new("a_b_com".to_string(), t0, 3));
        store.put(OtpRecord::new("c_d_com".to_string(), t0 + Duration::seconds(120), 3));

        let sweeper = sweeper_with(store.clone(), external.clone());
        let result = sweeper.run_sweep_at(t0 + Duration::seconds(180)).await;

        assert_eq!(result.expired_removed, 1);
        assert!(result.is_clean());
        assert!(store.get("a_b_com").is_none());
        assert!(store.get("c_d_com").is_some());
        assert_eq!(external.clear_count("a_b_com"), 1);
        assert_eq!(external.clear_count("c_d_com"), 0);
    }

    #[tokio::test]
    async fn test_sweep_before_expiry_is_a_noop() {
        let store = Arc::new(OtpStore::new());
        let external = Arc::new(StubExternalStore::new(0));
        let t0 = Utc::now();

        store.put(OtpRecord::new("a_b_com".to_string(), t0, 3));

        let sweeper = sweeper_with(store.clone(), external.clone());
        let result = sweeper.run_sweep_at(t0 + Duration::seconds(179)).await;

        assert_eq!(result.expired_removed, 0);
        assert!(store.get("a_b_com").is_some());
        assert_eq!(external.clear_count("a_b_com"), 0);
    }

    #[tokio::test]
    async fn test_clear_failure_is_retried_once() {
        let store = Arc::new(OtpStore::new());
        let external = Arc::new(StubExternalStore::new(1));
        let t0 = Utc::now();

        store.put(OtpRecord::new("a_b_com".to_string(), t0, 3));

        let sweeper = sweeper_with(store.clone(), external.clone());
        let result = sweeper.run_sweep_at(t0 + Duration::minutes(5)).await;

        // First clear fails, retry succeeds
        assert_eq!(result.expired_removed, 1);
        assert!(result.is_clean());
        assert_eq!(external.clear_count("a_b_com"), 2);
    }

    #[tokio::test]
    async fn test_persistent_clear_failure_does_not_resurrect_record() {
        let store = Arc::new(OtpStore::new());
        let external = Arc::new(StubExternalStore::new(u32::MAX));
        let t0 = Utc::now();

        store.put(OtpRecord::new("a_b_com".to_string(), t0, 3));

        let sweeper = sweeper_with(store.clone(), external.clone());
        let result = sweeper.run_sweep_at(t0 + Duration::minutes(5)).await;

        assert_eq!(result.expired_removed, 1);
        assert_eq!(result.clear_failures, vec!["a_b_com".to_string()]);
        // Exactly one retry, and the local record stays gone
        assert_eq!(external.clear_count("a_b_com"), 2);
        assert!(store.get("a_b_com").is_none());
    }
}
