//! Mock implementations for testing the issuance service

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::errors::SyncFailure;
use crate::services::issuance::traits::{ExternalStoreTrait, MailerTrait};

// Mock mailer for testing
pub struct MockMailer {
    pub sent_messages: Arc<Mutex<HashMap<String, String>>>,
    pub should_fail: bool,
}

impl MockMailer {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
        }
    }

    pub fn sent_code(&self, email: &str) -> Option<String> {
        self.sent_messages.lock().unwrap().get(email).cloned()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl MailerTrait for MockMailer {
    async fn send_code_email(
        &self,
        to: &str,
        code: &str,
        _validity_minutes: i64,
    ) -> Result<String, String> {
        if self.should_fail {
            return Err("mail gateway error".to_string());
        }
        self.sent_messages
            .lock()
            .unwrap()
            .insert(to.to_string(), code.to_string());
        Ok(format!("mock-msg-{}", uuid::Uuid::new_v4()))
    }

    fn is_valid_email(&self, email: &str) -> bool {
        email.contains('@') && email.contains('.')
    }
}

// Mock external sheet store for testing
pub struct MockExternalStore {
    pub cells: Arc<Mutex<HashMap<String, String>>>, // key -> mirrored value
    pub missing_targets: HashSet<String>,
    pub owner_mismatches: HashSet<String>,
    pub fail_transport: bool,
}

impl MockExternalStore {
    pub fn new() -> Self {
        Self {
            cells: Arc::new(Mutex::new(HashMap::new())),
            missing_targets: HashSet::new(),
            owner_mismatches: HashSet::new(),
            fail_transport: false,
        }
    }

    pub fn failing_transport() -> Self {
        Self {
            fail_transport: true,
            ..Self::new()
        }
    }

    pub fn with_missing_target(key: &str) -> Self {
        let mut store = Self::new();
        store.missing_targets.insert(key.to_string());
        store
    }

    pub fn mirrored_value(&self, key: &str) -> Option<String> {
        self.cells.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ExternalStoreTrait for MockExternalStore {
    async fn publish(&self, key: &str, _identity: &str, code: &str) -> Result<(), SyncFailure> {
        if self.fail_transport {
            return Err(SyncFailure::Transport("connection refused".to_string()));
        }
        if self.missing_targets.contains(key) {
            return Err(SyncFailure::TargetNotFound {
                key: key.to_string(),
            });
        }
        if self.owner_mismatches.contains(key) {
            return Err(SyncFailure::OwnerMismatch {
                key: key.to_string(),
            });
        }
        self.cells
            .lock()
            .unwrap()
            .insert(key.to_string(), code.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<(), SyncFailure> {
        if self.fail_transport {
            return Err(SyncFailure::Transport("connection refused".to_string()));
        }
        // Overwrite-with-empty semantics: clearing an absent key succeeds
        self.cells
            .lock()
            .unwrap()
            .insert(key.to_string(), String::new());
        Ok(())
    }
}
