//! Relay (QR) wallet provider built by the host page.
//!
//! The page constructs the relay provider (it owns the bridge and the QR
//! modal) with the RPC map from `WasmConnector.relayRpc` and hands the object
//! over. Only `enable`, `request`, `disconnect` and `on` are used.

use crate::error::{ConnectorError, ConnectorResult};
use crate::wallet::{RelayTransport, Signer};
use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::ethereum::{accounts_from_js, personal_sign, wallet_error};
use super::{describe, log};

const SIGN_PROMPT: &str = "Ready to sign... You may need to prepare your wallet.";

#[derive(Debug, Clone)]
pub struct JsRelay {
    provider: JsValue,
}

impl JsRelay {
    pub fn new(provider: JsValue) -> Self {
        Self { provider }
    }

    fn method(&self, name: &str) -> ConnectorResult<Function> {
        Reflect::get(&self.provider, &JsValue::from_str(name))
            .map_err(|e| ConnectorError::Wallet(describe(&e)))?
            .dyn_into()
            .map_err(|_| ConnectorError::Wallet(format!("relay provider has no {name}()")))
    }

    async fn call(&self, name: &str) -> Result<JsValue, JsValue> {
        let function = self.method(name).map_err(|e| JsValue::from_str(&e.to_string()))?;
        let result = function.call0(&self.provider)?;
        match result.dyn_into::<Promise>() {
            Ok(promise) => JsFuture::from(promise).await,
            Err(value) => Ok(value),
        }
    }

    /// Subscribe to the provider's `disconnect` event.
    pub fn on_disconnect(&self, handler: impl FnMut(i64, String) + 'static) -> ConnectorResult<()> {
        let on = self.method("on")?;
        let mut handler = handler;
        let callback = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |code: JsValue, reason: JsValue| {
            let code = code.as_f64().unwrap_or_default() as i64;
            handler(code, reason.as_string().unwrap_or_default());
        });
        on.call2(&self.provider, &JsValue::from_str("disconnect"), callback.as_ref().unchecked_ref())
            .map_err(|e| ConnectorError::Wallet(describe(&e)))?;
        // the provider holds the listener for the page's lifetime
        callback.forget();
        Ok(())
    }
}

#[async_trait(?Send)]
impl Signer for JsRelay {
    async fn personal_sign(&self, message: &str, address: &str) -> ConnectorResult<String> {
        personal_sign(&self.provider, message, address).await
    }
}

#[async_trait(?Send)]
impl RelayTransport for JsRelay {
    async fn enable(&self) -> ConnectorResult<Vec<String>> {
        let accounts = self.call("enable").await.map_err(wallet_error)?;
        if accounts.is_undefined() || accounts.is_null() {
            return Err(ConnectorError::Declined);
        }
        accounts_from_js(accounts)
    }

    fn prepare_sign(&self) {
        if let Some(window) = web_sys::window() {
            if window.alert_with_message(SIGN_PROMPT).is_err() {
                log!("[hubconnect] {}", SIGN_PROMPT);
            }
        }
    }

    async fn disconnect(&self) -> ConnectorResult<()> {
        self.call("disconnect").await.map_err(wallet_error)?;
        Ok(())
    }
}
