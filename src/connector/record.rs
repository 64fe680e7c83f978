//! The persisted connection record and the one-time legacy migration.

use crate::core::keys::{legacy, persisted};
use crate::core::Address;
use crate::error::ConnectorResult;
use crate::storage::KeyValueStore;
use crate::wallet::ConnectMethod;

/// Last successful connection as found in storage. Either half may be
/// missing or unrecognised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionRecord {
    pub method: Option<ConnectMethod>,
    pub address: Option<Address>,
}

impl ConnectionRecord {
    pub fn load(store: &dyn KeyValueStore) -> ConnectorResult<Self> {
        let method = store.get(persisted::METHOD)?;
        let method = method.as_deref().and_then(|raw| {
            let parsed = ConnectMethod::from_str(raw);
            if parsed.is_none() {
                tracing::warn!(method = raw, "ignoring unknown persisted connect method");
            }
            parsed
        });

        let address = store.get(persisted::ADDRESS)?;
        let address = address.as_deref().filter(|raw| !raw.is_empty()).and_then(|raw| {
            Address::checksummed(raw)
                .map_err(|e| tracing::warn!(error = %e, "ignoring malformed persisted address"))
                .ok()
        });

        Ok(Self { method, address })
    }

    pub fn save(store: &dyn KeyValueStore, method: ConnectMethod, address: &Address) -> ConnectorResult<()> {
        store.set(persisted::METHOD, method.as_str())?;
        store.set(persisted::ADDRESS, address.as_str())
    }

    pub fn clear(store: &dyn KeyValueStore) -> ConnectorResult<()> {
        for key in persisted::ALL {
            store.remove(key)?;
        }
        Ok(())
    }
}

/// Copy legacy keys into `store`, deleting each one once copied. Returns how
/// many keys moved.
pub fn migrate_legacy_keys(store: &dyn KeyValueStore, legacy_store: &dyn KeyValueStore) -> ConnectorResult<usize> {
    let mut moved = 0;
    for (old, new) in legacy::MIGRATIONS {
        if let Some(value) = legacy_store.get(old)?.filter(|v| !v.is_empty()) {
            store.set(new, &value)?;
            legacy_store.remove(old)?;
            moved += 1;
        }
    }
    if moved > 0 {
        tracing::info!(moved, "migrated legacy connection keys");
    }
    Ok(moved)
}
