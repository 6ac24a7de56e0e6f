//! Configuration for the issuance service

use otp_shared::config::KeyMappingRule;

use crate::domain::entities::otp_record::DEFAULT_VALIDITY_MINUTES;

/// Configuration for the issuance service
#[derive(Debug, Clone)]
pub struct IssuanceConfig {
    /// Number of minutes an issued code stays valid
    pub validity_minutes: i64,

    /// How an identity is mapped to its record key and external location
    pub key_mapping: KeyMappingRule,
}

impl Default for IssuanceConfig {
    fn default() -> Self {
        Self {
            validity_minutes: DEFAULT_VALIDITY_MINUTES,
            key_mapping: KeyMappingRule::default(),
        }
    }
}
