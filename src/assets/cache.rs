//! Process-local asset-profile cache. Entries never expire; a successful
//! refresh replaces them.

use super::AssetProfile;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetKey {
    pub address: String,
    pub asset_type: String,
}

impl AssetKey {
    pub fn new(address: impl Into<String>, asset_type: impl Into<String>) -> Self {
        Self { address: address.into(), asset_type: asset_type.into() }
    }
}

#[derive(Clone, Default)]
pub struct AssetCache {
    entries: Rc<RefCell<HashMap<AssetKey, AssetProfile>>>,
}

impl AssetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &AssetKey) -> Option<AssetProfile> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn insert(&self, key: AssetKey, profile: AssetProfile) {
        self.entries.borrow_mut().insert(key, profile);
    }

    pub fn contains(&self, key: &AssetKey) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(n: usize) -> AssetProfile {
        AssetProfile { assets: Vec::with_capacity(n), status: Some(true) }
    }

    #[test]
    fn test_keys_are_per_address_and_type() {
        let cache = AssetCache::new();
        cache.insert(AssetKey::new("0xabc", "NFT"), profile(0));
        cache.insert(AssetKey::new("0xabc", "Donation"), profile(0));
        cache.insert(AssetKey::new("0xdef", "NFT"), profile(0));
        assert_eq!(cache.len(), 3);
        assert!(cache.contains(&AssetKey::new("0xabc", "NFT")));
        assert!(!cache.contains(&AssetKey::new("0xabc", "POAP")));
    }

    #[test]
    fn test_insert_replaces_entry() {
        let cache = AssetCache::new();
        let key = AssetKey::new("0xabc", "NFT");
        cache.insert(key.clone(), AssetProfile { assets: vec![], status: Some(false) });
        cache.insert(key.clone(), AssetProfile { assets: vec![], status: Some(true) });
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&key).and_then(|p| p.status), Some(true));
    }

    #[test]
    fn test_clones_share_entries() {
        let cache = AssetCache::new();
        let shared = cache.clone();
        shared.insert(AssetKey::new("0xabc", "NFT"), profile(0));
        assert!(!cache.is_empty());
    }
}
