//! File-backed key/value store for native hosts.

use super::KeyValueStore;
use crate::error::{ConnectorError, ConnectorResult};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// JSON map at `{root}/{app}/data/connection.json`, rewritten on every change.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: RefCell<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store for `app` under `$HUBCONNECT_ROOT` or the platform data dir.
    pub fn load(app: &str) -> ConnectorResult<Self> {
        Self::open(store_path(app))
    }

    pub fn open(path: impl Into<PathBuf>) -> ConnectorResult<Self> {
        let path = path.into();
        let values = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| ConnectorError::Storage(format!("store read: {e}")))?;
            serde_json::from_str(&raw)
                .map_err(|e| ConnectorError::Storage(format!("store json: {e}")))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, values: RefCell::new(values) })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> ConnectorResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConnectorError::Storage(format!("store mkdir: {e}")))?;
        }
        let raw = serde_json::to_string_pretty(&*self.values.borrow())
            .map_err(|e| ConnectorError::Storage(format!("store json: {e}")))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| ConnectorError::Storage(format!("store write: {e}")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ConnectorResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ConnectorResult<()> {
        self.values.borrow_mut().insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&self, key: &str) -> ConnectorResult<()> {
        if self.values.borrow_mut().remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

fn store_path(app: &str) -> PathBuf {
    let root = std::env::var("HUBCONNECT_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")));
    root.join(app).join("data").join("connection.json")
}
