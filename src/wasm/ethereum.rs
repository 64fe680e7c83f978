//! `window.ethereum` and other EIP-1193 providers.

use crate::error::{ConnectorError, ConnectorResult};
use crate::wallet::{ExtensionWallet, Signer};
use async_trait::async_trait;
use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{describe, is_user_rejection};

/// `provider.request({ method, params })`, awaited.
pub(crate) async fn eip1193_request(provider: &JsValue, method: &str, params: Option<Array>) -> Result<JsValue, JsValue> {
    let request: Function = Reflect::get(provider, &JsValue::from_str("request"))?.dyn_into()?;

    let args = Object::new();
    Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))?;
    if let Some(params) = params {
        Reflect::set(&args, &JsValue::from_str("params"), &params)?;
    }

    let promise: Promise = request.call1(provider, &args)?.dyn_into()?;
    JsFuture::from(promise).await
}

pub(crate) fn wallet_error(value: JsValue) -> ConnectorError {
    if is_user_rejection(&value) {
        ConnectorError::Declined
    } else {
        ConnectorError::Wallet(describe(&value))
    }
}

pub(crate) fn accounts_from_js(value: JsValue) -> ConnectorResult<Vec<String>> {
    serde_wasm_bindgen::from_value(value).map_err(|e| ConnectorError::Wallet(format!("accounts: {e}")))
}

/// `personal_sign` takes the message hex encoded, then the account.
pub(crate) fn personal_sign_params(message: &str, address: &str) -> Array {
    let params = Array::new();
    params.push(&JsValue::from_str(&format!("0x{}", hex::encode(message.as_bytes()))));
    params.push(&JsValue::from_str(address));
    params
}

pub(crate) async fn personal_sign(provider: &JsValue, message: &str, address: &str) -> ConnectorResult<String> {
    let signature = eip1193_request(provider, "personal_sign", Some(personal_sign_params(message, address)))
        .await
        .map_err(wallet_error)?;
    signature
        .as_string()
        .ok_or_else(|| ConnectorError::Wallet("signature is not a string".into()))
}

/// Wallet extension injected into the page. Without an explicit provider,
/// `window.ethereum` is looked up on every call so late injection works.
#[derive(Debug, Clone, Default)]
pub struct InjectedWallet {
    provider: Option<JsValue>,
}

impl InjectedWallet {
    pub fn new(provider: JsValue) -> Self {
        Self { provider: Some(provider) }
    }

    pub fn window() -> Self {
        Self { provider: None }
    }

    fn provider(&self) -> ConnectorResult<JsValue> {
        if let Some(provider) = &self.provider {
            return Ok(provider.clone());
        }
        let window = web_sys::window().ok_or_else(|| ConnectorError::Wallet("no window".into()))?;
        let provider = Reflect::get(&window, &JsValue::from_str("ethereum"))
            .map_err(|e| ConnectorError::Wallet(describe(&e)))?;
        if provider.is_undefined() || provider.is_null() {
            return Err(ConnectorError::Wallet("no injected wallet".into()));
        }
        Ok(provider)
    }
}

#[async_trait(?Send)]
impl Signer for InjectedWallet {
    async fn personal_sign(&self, message: &str, address: &str) -> ConnectorResult<String> {
        personal_sign(&self.provider()?, message, address).await
    }
}

#[async_trait(?Send)]
impl ExtensionWallet for InjectedWallet {
    async fn request_accounts(&self) -> ConnectorResult<Vec<String>> {
        let accounts = eip1193_request(&self.provider()?, "eth_requestAccounts", None)
            .await
            .map_err(wallet_error)?;
        accounts_from_js(accounts)
    }
}
