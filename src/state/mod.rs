//! Persisted key/value state capability.
//!
//! The recurrence tracker reads and writes its next-trigger timestamp
//! through the [`StateStore`] trait so the schedule logic can be tested
//! without a real storage backend. Production code uses the sqlite-backed
//! score store; tests use [`MemoryStateStore`].

use crate::error::{RescoreError, Result};
use std::collections::HashMap;
use std::sync::Mutex;

/// Minimal string key/value persistence used for recurrence state.
pub trait StateStore {
    /// Get the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory state store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStateStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| RescoreError::InvalidState("state store mutex poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| RescoreError::InvalidState("state store mutex poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
