//! Normalized identity value object.
//!
//! Maps a free-form email identity to a bounded key that is safe to use as
//! a sheet tab name and as the record-store key. Normalization is
//! deterministic and idempotent, so repeated issuance for the same identity
//! always targets the same external location.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DomainError, ValidationError};

/// Maximum length of a normalized key (the sheet store's tab-name limit)
pub const MAX_KEY_LENGTH: usize = 100;

/// Replacement for characters outside `[A-Za-z0-9]`
pub const PLACEHOLDER: char = '_';

/// A normalized identity key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedIdentity(String);

impl NormalizedIdentity {
    /// Normalize a raw identity string into a bounded key.
    ///
    /// Every character outside `[A-Za-z0-9]` becomes the placeholder and the
    /// result is truncated to `MAX_KEY_LENGTH`. An empty or all-placeholder
    /// result is rejected as an invalid identity.
    pub fn normalize(raw: &str) -> Result<Self, DomainError> {
        let key: String = raw
            .chars()
            .take(MAX_KEY_LENGTH)
            .map(|c| if c.is_ascii_alphanumeric() { c } else { PLACEHOLDER })
            .collect();

        if key.is_empty() || key.chars().all(|c| c == PLACEHOLDER) {
            return Err(DomainError::Validation(ValidationError::InvalidIdentity {
                identity: raw.to_string(),
            }));
        }

        Ok(Self(key))
    }

    /// The normalized key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the value object, yielding the key
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for NormalizedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        let key = NormalizedIdentity::normalize("a@b.com").unwrap();
        assert_eq!(key.as_str(), "a_b_com");
    }

    #[test]
    fn test_normalize_preserves_alphanumerics() {
        let key = NormalizedIdentity::normalize("User.Name+tag@Example99.org").unwrap();
        assert_eq!(key.as_str(), "User_Name_tag_Example99_org");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = NormalizedIdentity::normalize("user@example.com").unwrap();
        let twice = NormalizedIdentity::normalize(once.as_str()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_truncates_to_limit() {
        let raw = format!("{}@example.com", "a".repeat(200));
        let key = NormalizedIdentity::normalize(&raw).unwrap();
        assert_eq!(key.as_str().len(), MAX_KEY_LENGTH);
        assert_eq!(key.as_str(), "a".repeat(MAX_KEY_LENGTH));
    }

    #[test]
    fn test_normalize_rejects_empty() {
        assert!(NormalizedIdentity::normalize("").is_err());
    }

    #[test]
    fn test_normalize_rejects_all_placeholder() {
        assert!(NormalizedIdentity::normalize("@@@...!!!").is_err());
        assert!(NormalizedIdentity::normalize("___").is_err());
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let a = NormalizedIdentity::normalize("a@b.com").unwrap();
        let b = NormalizedIdentity::normalize("a@b.com").unwrap();
        assert_eq!(a, b);
    }
}
