//! Storage - where the connection record lives between page loads
//!
//! Backends:
//! - Memory: ephemeral, every target
//! - File: JSON map on disk (native)
//! - Cookie / localStorage: browser (see `crate::wasm`)

mod cookie;
#[cfg(feature = "native")]
mod file;

pub use cookie::{find_cookie, CookieAttributes, SameSite};
#[cfg(feature = "native")]
pub use file::FileStore;

use crate::error::ConnectorResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Small string key/value persistence port.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ConnectorResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ConnectorResult<()>;
    fn remove(&self, key: &str) -> ConnectorResult<()>;
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-memory store. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        store
            .values
            .borrow_mut()
            .extend(entries.into_iter().map(|(k, v)| (k.to_string(), v.to_string())));
        store
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ConnectorResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ConnectorResult<()> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ConnectorResult<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert!(store.is_empty());
        // removing a missing key is fine
        store.remove("k").unwrap();
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryStore::with_entries([("a", "1")]);
        let view = store.clone();
        view.set("b", "2").unwrap();
        assert_eq!(store.len(), 2);
    }
}
