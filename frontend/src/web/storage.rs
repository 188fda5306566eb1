//! Key-value storage.
//!
//! `BrowserStorage` wraps `localStorage` / `sessionStorage` through
//! `gloo-storage`. Values are plain strings, never JSON-encoded, so they stay
//! readable by anything else on the page. `MemoryStorage` is the in-memory
//! stand-in used by tests.

use gloo_storage::{LocalStorage, SessionStorage, Storage as GlooStorage};
#[cfg(test)]
use std::collections::HashMap;
#[cfg(test)]
use std::sync::{Arc, Mutex, MutexGuard};

/// String key-value store.
///
/// Failures (storage disabled, quota exceeded) degrade to "absent".
pub trait Storage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Returns `false` if the write was refused.
    fn set(&self, key: &str, value: &str) -> bool;

    fn delete(&self, key: &str) -> bool;

    /// Removes every key.
    fn clear(&self);
}

/// Which browser store to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserStorage {
    /// `localStorage`: survives reloads and restarts.
    Local,
    /// `sessionStorage`: scoped to the tab.
    Session,
}

impl BrowserStorage {
    fn raw(&self) -> web_sys::Storage {
        match self {
            BrowserStorage::Local => LocalStorage::raw(),
            BrowserStorage::Session => SessionStorage::raw(),
        }
    }
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        match self.raw().set_item(key, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[Storage] write of {key} refused: {e:?}");
                false
            }
        }
    }

    fn delete(&self, key: &str) -> bool {
        self.raw().remove_item(key).is_ok()
    }

    fn clear(&self) {
        if let Err(e) = self.raw().clear() {
            log::warn!("[Storage] clear failed: {e:?}");
        }
    }
}

/// In-memory store. Clones share the same entries.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries().insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.entries().remove(key);
        true
    }

    fn clear(&self) {
        self.entries().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_clones_share_entries() {
        let a = MemoryStorage::new();
        let b = a.clone();
        assert!(a.set("token", "abc"));
        assert_eq!(b.get("token").as_deref(), Some("abc"));

        b.delete("token");
        assert!(a.get("token").is_none());

        a.set("x", "1");
        a.set("y", "2");
        assert_eq!(a.len(), 2);
        b.clear();
        assert!(a.is_empty());
    }
}
