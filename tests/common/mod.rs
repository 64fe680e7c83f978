//! Scripted wallets and a mock hub shared by the integration suites.

#![allow(dead_code)]

use async_trait::async_trait;
use hubconnect::{
    Connector, ConnectorConfig, ConnectorError, ConnectorPorts, ConnectorResult, ExtensionWallet, MemoryStore,
    RelayTransport, Signer,
};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ALICE: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
pub const BOB: &str = "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359";

/// Relay wallet that approves with `accounts` (or declines when `None`).
#[derive(Default)]
pub struct ScriptedRelay {
    pub accounts: Option<Vec<String>>,
    pub enable_calls: Cell<u32>,
    pub prompts: Cell<u32>,
    pub signed: RefCell<Vec<String>>,
    pub disconnects: Cell<u32>,
}

impl ScriptedRelay {
    pub fn approving(account: &str) -> Self {
        Self { accounts: Some(vec![account.to_string()]), ..Self::default() }
    }

    pub fn declining() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl Signer for ScriptedRelay {
    async fn personal_sign(&self, message: &str, address: &str) -> ConnectorResult<String> {
        self.signed.borrow_mut().push(message.to_string());
        Ok(format!("relay-sig:{address}"))
    }
}

#[async_trait(?Send)]
impl RelayTransport for ScriptedRelay {
    async fn enable(&self) -> ConnectorResult<Vec<String>> {
        self.enable_calls.set(self.enable_calls.get() + 1);
        self.accounts.clone().ok_or(ConnectorError::Wallet("User closed modal".into()))
    }

    fn prepare_sign(&self) {
        self.prompts.set(self.prompts.get() + 1);
    }

    async fn disconnect(&self) -> ConnectorResult<()> {
        self.disconnects.set(self.disconnects.get() + 1);
        Ok(())
    }
}

/// Extension wallet returning a fixed account list.
#[derive(Default)]
pub struct ScriptedExtension {
    pub accounts: Vec<String>,
    pub account_requests: Cell<u32>,
    pub signed: RefCell<Vec<(String, String)>>,
}

impl ScriptedExtension {
    pub fn with_account(account: &str) -> Self {
        Self { accounts: vec![account.to_string()], ..Self::default() }
    }
}

#[async_trait(?Send)]
impl Signer for ScriptedExtension {
    async fn personal_sign(&self, message: &str, address: &str) -> ConnectorResult<String> {
        self.signed.borrow_mut().push((message.to_string(), address.to_string()));
        Ok(format!("ext-sig:{address}"))
    }
}

#[async_trait(?Send)]
impl ExtensionWallet for ScriptedExtension {
    async fn request_accounts(&self) -> ConnectorResult<Vec<String>> {
        self.account_requests.set(self.account_requests.get() + 1);
        Ok(self.accounts.clone())
    }
}

pub struct Harness {
    pub connector: Connector,
    pub relay: Rc<ScriptedRelay>,
    pub extension: Rc<ScriptedExtension>,
    pub store: MemoryStore,
    pub legacy: MemoryStore,
}

pub fn harness(hub: &str, relay: ScriptedRelay, extension: ScriptedExtension) -> Harness {
    harness_with(ConnectorConfig::new(hub), relay, extension, MemoryStore::new(), MemoryStore::new())
}

pub fn harness_with(
    config: ConnectorConfig,
    relay: ScriptedRelay,
    extension: ScriptedExtension,
    store: MemoryStore,
    legacy: MemoryStore,
) -> Harness {
    #[cfg(feature = "native")]
    hubconnect::logging::init_logging();
    let relay = Rc::new(relay);
    let extension = Rc::new(extension);
    let ports = ConnectorPorts {
        relay: relay.clone(),
        extension: extension.clone(),
        store: Rc::new(store.clone()),
        legacy_store: Rc::new(legacy.clone()),
    };
    let connector = Connector::new(config, ports).expect("connector");
    Harness { connector, relay, extension, store, legacy }
}

/// Hub that has no file for `address` yet and accepts one upload.
pub async fn mount_fresh_hub(server: &MockServer, address: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/{address}")))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "code": 0 })))
        .expect(1)
        .mount(server)
        .await;
}
