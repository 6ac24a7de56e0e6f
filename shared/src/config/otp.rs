//! OTP lifecycle configuration module

use serde::{Deserialize, Serialize};

/// How an identity is mapped to its location in the external sheet store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMappingRule {
    /// Use the normalized identity key as the sheet tab name
    Normalized,
    /// Use the raw identity verbatim as the sheet tab name
    Verbatim,
}

impl Default for KeyMappingRule {
    fn default() -> Self {
        KeyMappingRule::Normalized
    }
}

fn default_sweep_enabled() -> bool {
    true
}

/// OTP lifecycle configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Number of minutes an issued code stays valid
    pub validity_minutes: i64,

    /// How often the expiry sweep runs, in seconds.
    /// Must be strictly smaller than the validity window; an expired code
    /// may stay visible for up to one extra sweep interval.
    pub sweep_interval_seconds: u64,

    /// Whether the background expiry sweep is enabled
    #[serde(default = "default_sweep_enabled")]
    pub sweep_enabled: bool,

    /// Identity-to-sheet-location mapping rule
    #[serde(default)]
    pub key_mapping: KeyMappingRule,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            validity_minutes: 3,
            sweep_interval_seconds: 60,
            sweep_enabled: default_sweep_enabled(),
            key_mapping: KeyMappingRule::default(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let validity_minutes = std::env::var("OTP_VALIDITY_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);
        let sweep_interval_seconds = std::env::var("OTP_SWEEP_INTERVAL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);
        let sweep_enabled = std::env::var("OTP_SWEEP_ENABLED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_sweep_enabled);

        Self {
            validity_minutes,
            sweep_interval_seconds,
            sweep_enabled,
            key_mapping: KeyMappingRule::default(),
        }
    }

    /// Validity window in seconds
    pub fn validity_seconds(&self) -> u64 {
        (self.validity_minutes.max(0) as u64) * 60
    }

    /// Check that the sweep interval is strictly smaller than the validity
    /// window, so the visibility slack stays bounded by one interval
    pub fn sweep_interval_is_sound(&self) -> bool {
        self.sweep_interval_seconds < self.validity_seconds()
    }
}
