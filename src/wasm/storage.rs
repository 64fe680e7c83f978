//! Browser persistence: `document.cookie` and `window.localStorage`.

use crate::config::ConnectorConfig;
use crate::error::{ConnectorError, ConnectorResult};
use crate::storage::{find_cookie, CookieAttributes, KeyValueStore};
use wasm_bindgen::JsCast;

use super::describe;

fn html_document() -> ConnectorResult<web_sys::HtmlDocument> {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok())
        .ok_or_else(|| ConnectorError::Storage("no html document".into()))
}

/// Connection record in cookies shared across subdomains.
#[derive(Debug, Clone)]
pub struct CookieStore {
    attributes: CookieAttributes,
}

impl CookieStore {
    pub fn new(attributes: CookieAttributes) -> Self {
        Self { attributes }
    }

    pub fn from_config(config: &ConnectorConfig) -> Self {
        Self::new(CookieAttributes::from_config(config))
    }

    fn write(&self, assignment: &str) -> ConnectorResult<()> {
        html_document()?
            .set_cookie(assignment)
            .map_err(|e| ConnectorError::Storage(format!("cookie write: {}", describe(&e))))
    }
}

impl KeyValueStore for CookieStore {
    fn get(&self, key: &str) -> ConnectorResult<Option<String>> {
        let header = html_document()?
            .cookie()
            .map_err(|e| ConnectorError::Storage(format!("cookie read: {}", describe(&e))))?;
        Ok(find_cookie(&header, key))
    }

    fn set(&self, key: &str, value: &str) -> ConnectorResult<()> {
        self.write(&self.attributes.set_cookie(key, value, chrono::Utc::now()))
    }

    fn remove(&self, key: &str) -> ConnectorResult<()> {
        self.write(&self.attributes.remove_cookie(key, chrono::Utc::now()))
    }
}

/// `window.localStorage`, where older releases kept the record.
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> ConnectorResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| ConnectorError::Storage("no window".into()))?
            .local_storage()
            .map_err(|e| ConnectorError::Storage(describe(&e)))?
            .ok_or_else(|| ConnectorError::Storage("localStorage unavailable".into()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> ConnectorResult<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| ConnectorError::Storage(format!("localStorage get: {}", describe(&e))))
    }

    fn set(&self, key: &str, value: &str) -> ConnectorResult<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| ConnectorError::Storage(format!("localStorage set: {}", describe(&e))))
    }

    fn remove(&self, key: &str) -> ConnectorResult<()> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| ConnectorError::Storage(format!("localStorage remove: {}", describe(&e))))
    }
}
