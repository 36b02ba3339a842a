//! Durable key-value preference storage.
//!
//! Every persisted preference is a plain string under a string key. The
//! SQLite [`Database`](crate::db::Database) is the real backend;
//! [`MemoryStore`] backs tests and the fallback when no database opens.

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Preference store unavailable")]
    Unavailable,
}

/// A string-keyed, string-valued durable store.
pub trait PreferenceStore {
    /// Read a value. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Read a boolean flag stored as `"true"` / `"false"`.
///
/// Only the exact string `"true"` counts; absence and read errors are false.
pub fn get_flag(store: &dyn PreferenceStore, key: &str) -> bool {
    match store.get(key) {
        Ok(value) => value.as_deref() == Some("true"),
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "Failed to read flag");
            false
        }
    }
}

/// Format a flag the way [`get_flag`] reads it.
pub fn flag_value(flag: bool) -> &'static str {
    if flag {
        "true"
    } else {
        "false"
    }
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every access fails, like blocked browser storage.
    pub fn failing() -> Self {
        Self {
            values: RefCell::default(),
            failing: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            Err(StoreError::Unavailable)
        } else {
            Ok(())
        }
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
        assert!(!store.is_empty());

        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
        store.remove("k").unwrap();
    }

    #[test]
    fn test_failing_store_errors_everywhere() {
        let store = MemoryStore::failing();
        assert!(matches!(store.get("k"), Err(StoreError::Unavailable)));
        assert!(store.set("k", "v").is_err());
        assert!(store.remove("k").is_err());
    }

    #[test]
    fn test_get_flag_only_accepts_exact_true() {
        let store = MemoryStore::new();
        assert!(!get_flag(&store, "flag"));

        store.set("flag", "true").unwrap();
        assert!(get_flag(&store, "flag"));

        store.set("flag", "TRUE").unwrap();
        assert!(!get_flag(&store, "flag"));

        store.set("flag", flag_value(false)).unwrap();
        assert!(!get_flag(&store, "flag"));

        assert!(!get_flag(&MemoryStore::failing(), "flag"));
    }
}
