//! WASM module: the connector inside a web page
//!
//! Provides browser implementations of every port plus the JS-facing
//! [`WasmConnector`]:
//! - Cookies (cross-subdomain connection record)
//! - localStorage (legacy record, migrated once)
//! - `window.ethereum` (extension wallet)
//! - a host-built relay provider object (QR wallet)
//!
//! Architecture:
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        WasmConnector (JS API)           │
//! │  connect*, disconnect, reconnect,       │
//! │  assetProfile, nftDetail, themes ...    │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │              Connector                  │
//! │  session + asset cache                  │
//! └───────┬─────────────────────┬───────────┘
//!         │                     │
//! ┌───────▼────────┐   ┌────────▼──────────┐
//! │ InjectedWallet │   │ CookieStore       │
//! │ JsRelay        │   │ LocalStorageStore │
//! └────────────────┘   └───────────────────┘
//! ```

mod bindings;
mod ethereum;
mod relay;
mod storage;

pub use bindings::WasmConnector;
pub use ethereum::InjectedWallet;
pub use relay::JsRelay;
pub use storage::{CookieStore, LocalStorageStore};

use wasm_bindgen::prelude::*;

/// Initialize WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console
pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

pub(crate) use log;

pub(crate) fn js_error(message: impl ToString) -> JsValue {
    JsValue::from_str(&message.to_string())
}

/// Readable text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", value))
}

/// EIP-1193 "user rejected request".
pub(crate) fn is_user_rejection(value: &JsValue) -> bool {
    js_sys::Reflect::get(value, &JsValue::from_str("code"))
        .ok()
        .and_then(|code| code.as_f64())
        .is_some_and(|code| code == 4001.0)
}
