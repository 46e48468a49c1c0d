//! In-process key-value store for tests and headless hosts.
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

use crate::KeyValueStore;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MemoryStoreError {
    /// Mirrors a browser store that refuses access (private mode, quota).
    #[error("storage is unavailable")]
    Unavailable,
}

/// Shared map; clones see the same entries.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    available: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Rc::default(),
            available: true,
        }
    }

    /// A store whose every operation fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            entries: Rc::default(),
            available: false,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    const fn check(&self) -> Result<(), MemoryStoreError> {
        if self.available {
            Ok(())
        } else {
            Err(MemoryStoreError::Unavailable)
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    type Error = MemoryStoreError;

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.check()?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.check()?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(handle.is_empty());
    }

    #[test]
    fn unavailable_store_rejects_everything() {
        let store = MemoryStore::unavailable();
        assert_eq!(store.get("k"), Err(MemoryStoreError::Unavailable));
        assert_eq!(store.set("k", "v"), Err(MemoryStoreError::Unavailable));
        assert_eq!(store.remove("k"), Err(MemoryStoreError::Unavailable));
    }
}
