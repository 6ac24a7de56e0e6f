//! OTP record entity for email-based verification.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default validity window for issued codes (3 minutes)
pub const DEFAULT_VALIDITY_MINUTES: i64 = 3;

/// OTP record entity, the unit of state in the record store.
///
/// At most one live record exists per identity; a later issuance for the
/// same identity replaces the record and restarts its validity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Unique identifier for this issuance
    pub id: Uuid,

    /// Normalized identity key this code was issued for
    pub identity: String,

    /// The 6-digit verification code
    pub code: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a new OTP record with a fresh random 6-digit code
    ///
    /// # Arguments
    ///
    /// * `identity` - The normalized identity key the code is issued for
    /// * `issued_at` - Issuance instant (passed in so callers control the clock)
    /// * `validity_minutes` - Number of minutes until the code expires
    pub fn new(identity: String, issued_at: DateTime<Utc>, validity_minutes: i64) -> Self {
        let code = Self::generate_code();
        let expires_at = issued_at + Duration::minutes(validity_minutes);

        Self {
            id: Uuid::new_v4(),
            identity,
            code,
            issued_at,
            expires_at,
        }
    }

    /// Generates a random 6-digit code, uniform over [000000, 999999]
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        let code: u32 = rng.gen_range(0..1_000_000);
        format!("{:06}", code)
    }

    /// Checks whether the record has expired at the given instant.
    ///
    /// A record expires exactly at `expires_at`, never before.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Gets the time remaining until expiration, or zero if expired
    pub fn time_until_expiration(&self, now: DateTime<Utc>) -> Duration {
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
