//! WasmConnector: the connector exposed to JavaScript
//!
//! Every async operation returns a `Promise`. Errors reject with the error's
//! message; a declined wallet prompt resolves to `null` instead so pages can
//! treat "user closed the modal" as a non-event.

use super::{js_error, log, CookieStore, InjectedWallet, JsRelay, LocalStorageStore};
use crate::assets::IndexAsset;
use crate::config::ConnectorConfig;
use crate::connector::{Connector, ConnectorPorts};
use crate::error::{ConnectorError, ConnectorResult};
use crate::hub::HubSession;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

fn from_js<T: for<'de> Deserialize<'de>>(value: JsValue) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(js_error)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(js_error)
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsSession {
    endpoint: String,
    address: Option<String>,
    agent_sign: bool,
}

impl From<&HubSession> for JsSession {
    fn from(session: &HubSession) -> Self {
        Self {
            endpoint: session.endpoint().to_string(),
            address: session.address().map(|a| a.to_string()),
            agent_sign: session.agent_sign(),
        }
    }
}

fn session_to_js(result: ConnectorResult<HubSession>) -> Result<JsValue, JsValue> {
    match result {
        Ok(session) => to_js(&JsSession::from(&session)),
        Err(ConnectorError::Declined) => Ok(JsValue::NULL),
        Err(e) => Err(js_error(e)),
    }
}

/// Browser connector with cookie persistence and `window.ethereum`.
#[wasm_bindgen]
pub struct WasmConnector {
    connector: Connector,
}

impl WasmConnector {
    fn spawn<F>(&self, run: impl FnOnce(Connector) -> F) -> js_sys::Promise
    where
        F: Future<Output = Result<JsValue, JsValue>> + 'static,
    {
        future_to_promise(run(self.connector.clone()))
    }
}

#[wasm_bindgen]
impl WasmConnector {
    /// `config` is a plain object (`hubEndpoint`, `rootDomain`, `themes`, ...);
    /// `relay_provider` the page-built relay provider object.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, relay_provider: JsValue) -> Result<WasmConnector, JsValue> {
        let config: ConnectorConfig = if config.is_undefined() || config.is_null() {
            ConnectorConfig::default()
        } else {
            from_js(config)?
        };

        let relay = JsRelay::new(relay_provider);
        let ports = ConnectorPorts {
            relay: Rc::new(relay.clone()),
            extension: Rc::new(InjectedWallet::window()),
            store: Rc::new(CookieStore::from_config(&config)),
            legacy_store: Rc::new(LocalStorageStore),
        };
        let connector = Connector::new(config, ports).map_err(js_error)?;

        let events = connector.clone();
        if let Err(e) = relay.on_disconnect(move |code, reason| events.handle_relay_disconnect(code, &reason)) {
            log!("[hubconnect] relay disconnect events unavailable: {}", e);
        }

        log!("[hubconnect] connector ready for {}", connector.config().hub());
        Ok(Self { connector })
    }

    /// Chain id → RPC url map for building the relay provider.
    #[wasm_bindgen(getter, js_name = "relayRpc")]
    pub fn relay_rpc(&self) -> Result<JsValue, JsValue> {
        let rpc: BTreeMap<String, String> = self
            .connector
            .config()
            .relay_rpc
            .iter()
            .map(|(chain, url)| (chain.to_string(), url.clone()))
            .collect();
        to_js(&rpc)
    }

    #[wasm_bindgen(js_name = "isValid")]
    pub fn is_valid(&self) -> bool {
        self.connector.is_valid()
    }

    /// Current session summary, or `null`.
    #[wasm_bindgen]
    pub fn session(&self) -> Result<JsValue, JsValue> {
        match self.connector.session() {
            Some(session) => to_js(&JsSession::from(&session)),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen]
    pub fn visitor(&self) -> Result<JsValue, JsValue> {
        to_js(&JsSession::from(&self.connector.visitor()))
    }

    #[wasm_bindgen(js_name = "connectViaRelay")]
    pub fn connect_via_relay(&self) -> js_sys::Promise {
        self.spawn(|c| async move { session_to_js(c.connect_via_relay().await) })
    }

    #[wasm_bindgen(js_name = "connectViaExtension")]
    pub fn connect_via_extension(&self) -> js_sys::Promise {
        self.spawn(|c| async move { session_to_js(c.connect_via_extension().await) })
    }

    #[wasm_bindgen]
    pub fn disconnect(&self) -> js_sys::Promise {
        self.spawn(|c| async move {
            c.disconnect().await.map_err(js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Resolves to whether a session is active afterwards.
    #[wasm_bindgen(js_name = "reconnectIfPersisted")]
    pub fn reconnect_if_persisted(&self) -> js_sys::Promise {
        self.spawn(|c| async move {
            let restored = c.reconnect_if_persisted().await.map_err(js_error)?;
            Ok(JsValue::from_bool(restored))
        })
    }

    #[wasm_bindgen(js_name = "assetProfile")]
    pub fn asset_profile(&self, address: String, asset_type: String, refresh: Option<bool>) -> js_sys::Promise {
        self.spawn(move |c| async move {
            let profile = c
                .fetch_asset_profile(&address, &asset_type, refresh.unwrap_or(false))
                .await
                .map_err(js_error)?;
            to_js(&profile)
        })
    }

    #[wasm_bindgen(js_name = "nftDetail")]
    pub fn nft_detail(&self, address: String, platform: String, identity: String, id: String) -> js_sys::Promise {
        self.spawn(move |c| async move {
            let detail = c
                .fetch_nft_detail(&address, &platform, &identity, &id)
                .await
                .map_err(js_error)?;
            to_js(&detail)
        })
    }

    #[wasm_bindgen(js_name = "donationDetail")]
    pub fn donation_detail(&self, address: String, platform: String, identity: String, id: String) -> js_sys::Promise {
        self.spawn(move |c| async move {
            let detail = c
                .fetch_donation_detail(&address, &platform, &identity, &id)
                .await
                .map_err(js_error)?;
            to_js(&detail)
        })
    }

    /// Resolves to `{platform, identity, signature}`; rejects with
    /// "Not logged in" when there is no session.
    #[wasm_bindgen(js_name = "addLinkedAccount")]
    pub fn add_linked_account(&self, platform: String) -> js_sys::Promise {
        self.spawn(move |c| async move {
            let account = c.add_linked_account(&platform).await.map_err(js_error)?;
            to_js(&account)
        })
    }

    #[wasm_bindgen(js_name = "availableThemes")]
    pub fn available_themes(&self, assets: JsValue) -> Result<JsValue, JsValue> {
        let assets: Vec<IndexAsset> = from_js(assets)?;
        to_js(&self.connector.available_themes(&assets))
    }
}
