//! In-memory OTP record store.
//!
//! The store is the single source of truth for "is a code currently
//! outstanding". It owns the record collection exclusively; the external
//! sheet mirror is a projection reconciled from here, never the reverse.
//! The interior lock is the serialization point for racing operations on
//! the same identity: a `put` that acquires the lock before a sweep is
//! observed by that sweep and not retired early.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::domain::entities::OtpRecord;

/// Process-wide store of outstanding OTP records, keyed by normalized
/// identity. Constructed once at startup and shared via `Arc`.
#[derive(Debug, Default)]
pub struct OtpStore {
    records: RwLock<HashMap<String, OtpRecord>>,
}

impl OtpStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }

    /// Insert or replace the record for its identity.
    ///
    /// A replacement supersedes the previous record entirely; its validity
    /// window restarts from the new record's `issued_at`.
    pub fn put(&self, record: OtpRecord) {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        records.insert(record.identity.clone(), record);
    }

    /// Get the outstanding record for an identity, if any
    pub fn get(&self, identity: &str) -> Option<OtpRecord> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.get(identity).cloned()
    }

    /// Remove the record for an identity. Idempotent; removing an absent
    /// identity is not an error.
    pub fn remove(&self, identity: &str) {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        records.remove(identity);
    }

    /// Remove and return every identity whose record has expired at `now`
    /// (`expires_at <= now`).
    pub fn sweep_expired(&self, now: DateTime<Utc>) -> Vec<String> {
        let mut records = self
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let expired: Vec<String> = records
            .iter()
            .filter(|(_, record)| record.is_expired(now))
            .map(|(identity, _)| identity.clone())
            .collect();

        for identity in &expired {
            records.remove(identity);
        }

        expired
    }

    /// Number of outstanding records
    pub fn len(&self) -> usize {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        records.len()
    }

    /// Whether no records are outstanding
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
