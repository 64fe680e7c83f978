//! Connector - wallet login, hub sessions, and asset lookups for one page
//!
//! One `Connector` per page (or process). It owns the only active session and
//! the asset-profile cache; clones share both.
//!
//! # Flows
//!
//! ```text
//! connect_via_relay      enable relay ─┐
//!                                      ├─ checksum first account
//! connect_via_extension  record or ────┘        │
//!                        request_accounts       ▼
//!                                     HubSession::signing
//!                                               │
//!                                      initial sync (get → set → sync)
//!                                               │
//!                                      install session + persist record
//!
//! reconnect_if_persisted migrate legacy keys → restore from record
//!                        (no signature) or rerun connect without sync
//! ```

mod record;

pub use record::{migrate_legacy_keys, ConnectionRecord};

use crate::assets::{self, AssetCache, AssetKey, AssetProfile, DonationDetail, IndexAsset, NftDetail, Theme};
use crate::config::ConnectorConfig;
use crate::core::keys::hub as hub_paths;
use crate::core::Address;
use crate::error::{ConnectorError, ConnectorResult};
use crate::hub::{HubSession, LinkedAccount};
use crate::storage::KeyValueStore;
use crate::wallet::{ConnectMethod, ExtensionSigner, ExtensionWallet, RelaySigner, RelayTransport, Signer};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Host-supplied wallets and storage.
#[derive(Clone)]
pub struct ConnectorPorts {
    pub relay: Rc<dyn RelayTransport>,
    pub extension: Rc<dyn ExtensionWallet>,
    /// Current persistence (cookies on the web).
    pub store: Rc<dyn KeyValueStore>,
    /// Pre-cookie persistence, read only by the migration.
    pub legacy_store: Rc<dyn KeyValueStore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InitialSync {
    Run,
    Skip,
}

struct ActiveSession {
    method: ConnectMethod,
    session: HubSession,
}

struct ConnectorInner {
    config: ConnectorConfig,
    ports: ConnectorPorts,
    http: reqwest::Client,
    active: RefCell<Option<ActiveSession>>,
    relay_opened: Cell<bool>,
    assets: AssetCache,
}

#[derive(Clone)]
pub struct Connector {
    inner: Rc<ConnectorInner>,
}

impl Connector {
    pub fn new(config: ConnectorConfig, ports: ConnectorPorts) -> ConnectorResult<Self> {
        Self::with_http_client(config, ports, reqwest::Client::new())
    }

    pub fn with_http_client(config: ConnectorConfig, ports: ConnectorPorts, http: reqwest::Client) -> ConnectorResult<Self> {
        config.validate()?;
        Ok(Self {
            inner: Rc::new(ConnectorInner {
                config,
                ports,
                http,
                active: RefCell::new(None),
                relay_opened: Cell::new(false),
                assets: AssetCache::new(),
            }),
        })
    }

    pub fn config(&self) -> &ConnectorConfig {
        &self.inner.config
    }

    // =========================================================================
    // SESSION STATE
    // =========================================================================

    pub fn is_valid(&self) -> bool {
        self.inner.active.borrow().is_some()
    }

    pub fn session(&self) -> Option<HubSession> {
        self.inner.active.borrow().as_ref().map(|a| a.session.clone())
    }

    pub fn active_method(&self) -> Option<ConnectMethod> {
        self.inner.active.borrow().as_ref().map(|a| a.method)
    }

    /// The active session, or a read-only one when nobody is logged in.
    pub fn visitor(&self) -> HubSession {
        self.session()
            .unwrap_or_else(|| HubSession::visitor(self.inner.config.hub(), self.inner.http.clone()))
    }

    pub fn record(&self) -> ConnectorResult<ConnectionRecord> {
        ConnectionRecord::load(self.inner.ports.store.as_ref())
    }

    fn install(&self, method: ConnectMethod, session: HubSession) {
        *self.inner.active.borrow_mut() = Some(ActiveSession { method, session });
    }

    fn persist(&self, method: ConnectMethod, session: &HubSession) -> ConnectorResult<()> {
        match session.address() {
            Some(address) => ConnectionRecord::save(self.inner.ports.store.as_ref(), method, address),
            None => Ok(()),
        }
    }

    fn signing_session(&self, address: Address, signer: Rc<dyn Signer>) -> HubSession {
        HubSession::signing(self.inner.config.hub(), address, signer, true, self.inner.http.clone())
    }

    // =========================================================================
    // CONNECT / DISCONNECT
    // =========================================================================

    /// Log in through the relay (QR) wallet and persist the connection.
    pub async fn connect_via_relay(&self) -> ConnectorResult<HubSession> {
        let session = self.relay_session(InitialSync::Run).await?;
        self.persist(ConnectMethod::Relay, &session)?;
        Ok(session)
    }

    /// Log in through the page's extension wallet and persist the connection.
    pub async fn connect_via_extension(&self) -> ConnectorResult<HubSession> {
        let session = self.extension_session(InitialSync::Run).await?;
        self.persist(ConnectMethod::Extension, &session)?;
        Ok(session)
    }

    async fn relay_session(&self, sync: InitialSync) -> ConnectorResult<HubSession> {
        let relay = self.inner.ports.relay.clone();
        self.inner.relay_opened.set(true);

        let accounts = match relay.enable().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::info!(error = %e, "relay session not approved");
                return Err(ConnectorError::Declined);
            }
        };
        let address = first_account(&accounts)?;

        let session = self.signing_session(address, Rc::new(RelaySigner(relay)));
        self.finish_connect(ConnectMethod::Relay, session, sync).await
    }

    async fn extension_session(&self, sync: InitialSync) -> ConnectorResult<HubSession> {
        let extension = self.inner.ports.extension.clone();

        let address = match self.record()? {
            ConnectionRecord { method: Some(ConnectMethod::Extension), address: Some(address) } => {
                tracing::debug!(%address, "reusing persisted extension address");
                address
            }
            _ => first_account(&extension.request_accounts().await?)?,
        };

        let session = self.signing_session(address, Rc::new(ExtensionSigner(extension)));
        self.finish_connect(ConnectMethod::Extension, session, sync).await
    }

    async fn finish_connect(&self, method: ConnectMethod, session: HubSession, sync: InitialSync) -> ConnectorResult<HubSession> {
        if sync == InitialSync::Run {
            initial_sync(&session).await?;
        }
        self.install(method, session.clone());
        tracing::info!(
            method = method.as_str(),
            address = ?session.address().map(Address::as_str),
            "wallet connected"
        );
        Ok(session)
    }

    /// Drop the session, close the relay if this connector opened it, and
    /// forget the persisted record.
    pub async fn disconnect(&self) -> ConnectorResult<()> {
        self.inner.active.borrow_mut().take();
        if self.inner.relay_opened.replace(false) {
            if let Err(e) = self.inner.ports.relay.disconnect().await {
                tracing::warn!(error = %e, "relay teardown failed");
            }
        }
        ConnectionRecord::clear(self.inner.ports.store.as_ref())?;
        tracing::info!("wallet disconnected");
        Ok(())
    }

    /// Relay transport's disconnect event. Drops a relay-backed session; the
    /// persisted record stays so the next load can restore it.
    pub fn handle_relay_disconnect(&self, code: i64, reason: &str) {
        tracing::info!(code, reason, "relay session closed by wallet");
        let mut active = self.inner.active.borrow_mut();
        if active.as_ref().is_some_and(|a| a.method == ConnectMethod::Relay) {
            *active = None;
        }
    }

    // =========================================================================
    // RESTORE
    // =========================================================================

    pub fn migrate_legacy_keys(&self) -> ConnectorResult<usize> {
        migrate_legacy_keys(self.inner.ports.store.as_ref(), self.inner.ports.legacy_store.as_ref())
    }

    /// Restore the last session on page load. Returns whether a session is
    /// active afterwards.
    pub async fn reconnect_if_persisted(&self) -> ConnectorResult<bool> {
        self.migrate_legacy_keys()?;
        let record = self.record()?;

        match (record.method, record.address) {
            (Some(method), Some(address)) => {
                let signer: Rc<dyn Signer> = match method {
                    ConnectMethod::Relay => {
                        self.inner.relay_opened.set(true);
                        Rc::new(RelaySigner(self.inner.ports.relay.clone()))
                    }
                    ConnectMethod::Extension => Rc::new(ExtensionSigner(self.inner.ports.extension.clone())),
                };
                tracing::info!(method = method.as_str(), %address, "restored persisted session");
                self.install(method, self.signing_session(address, signer));
                Ok(true)
            }
            (None, Some(address)) => {
                tracing::warn!(%address, "persisted address without a usable method");
                Ok(self.is_valid())
            }
            (_, None) if self.is_valid() => Ok(true),
            (None, None) => Ok(false),
            (Some(method), None) => {
                let attempt = match method {
                    ConnectMethod::Relay => self.relay_session(InitialSync::Skip).await,
                    ConnectMethod::Extension => self.extension_session(InitialSync::Skip).await,
                };
                match attempt {
                    Ok(_) => Ok(true),
                    Err(ConnectorError::Declined) => Ok(false),
                    Err(e) => Err(e),
                }
            }
        }
    }

    // =========================================================================
    // ACCOUNTS & THEMES
    // =========================================================================

    /// Ask the extension for an account to link and have it sign the
    /// session's challenge.
    pub async fn add_linked_account(&self, platform: &str) -> ConnectorResult<LinkedAccount> {
        let session = self.session().ok_or(ConnectorError::NotAuthenticated)?;
        let extension = self.inner.ports.extension.clone();

        let identity = first_account(&extension.request_accounts().await?)?;
        let account = LinkedAccount::new(platform, identity.as_str());
        let message = session.sig_message(&account)?;
        let signature = extension.personal_sign(&message, identity.as_str()).await?;

        tracing::info!(platform, identity = identity.as_str(), "linked account signed");
        Ok(account.with_signature(signature))
    }

    pub fn available_themes(&self, assets: &[IndexAsset]) -> Vec<Theme> {
        assets::available_themes(&self.inner.config.themes, assets)
    }

    // =========================================================================
    // LOOKUPS
    // =========================================================================

    /// Cached per (address, type). `refresh` always goes to the hub; failures
    /// leave any cached entry in place.
    pub async fn fetch_asset_profile(&self, address: &str, asset_type: &str, refresh: bool) -> ConnectorResult<AssetProfile> {
        let key = AssetKey::new(address, asset_type);
        if !refresh {
            if let Some(profile) = self.inner.assets.get(&key) {
                tracing::debug!(address, asset_type, "asset profile cache hit");
                return Ok(profile);
            }
        }

        let url = format!(
            "{}/{}/{}/{}/",
            self.inner.config.hub(),
            hub_paths::ASSET_PROFILE,
            address,
            asset_type.to_lowercase()
        );
        let profile: AssetProfile = self.get_json(&url, &[]).await.map_err(|e| {
            tracing::warn!(address, asset_type, error = %e, "asset profile lookup failed");
            e
        })?;
        self.inner.assets.insert(key, profile.clone());
        Ok(profile)
    }

    pub async fn fetch_nft_detail(&self, address: &str, platform: &str, identity: &str, id: &str) -> ConnectorResult<NftDetail> {
        self.fetch_detail(address, hub_paths::NFT, platform, identity, id).await
    }

    pub async fn fetch_donation_detail(&self, address: &str, platform: &str, identity: &str, id: &str) -> ConnectorResult<DonationDetail> {
        self.fetch_detail(address, hub_paths::DONATION, platform, identity, id).await
    }

    pub fn cached_profiles(&self) -> &AssetCache {
        &self.inner.assets
    }

    async fn fetch_detail<T: DeserializeOwned>(
        &self,
        address: &str,
        kind: &str,
        platform: &str,
        identity: &str,
        id: &str,
    ) -> ConnectorResult<T> {
        let url = format!("{}/{}/{}/{}/", self.inner.config.hub(), hub_paths::ASSET_PROFILE, address, kind);
        let query = [("platform", platform), ("id", id), ("identity", identity)];
        self.get_json(&url, &query).await.map_err(|e| {
            tracing::warn!(address, kind, id, error = %e, "asset detail lookup failed");
            e
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> ConnectorResult<T> {
        let mut request = self.inner.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Http { status: status.as_u16() });
        }
        let body = response.bytes().await?;
        if body.is_empty() {
            return Err(ConnectorError::EmptyBody);
        }
        let value: Value = serde_json::from_slice(&body)?;
        if value.is_null() {
            return Err(ConnectorError::EmptyBody);
        }
        Ok(serde_json::from_value(value)?)
    }
}

fn first_account(accounts: &[String]) -> ConnectorResult<Address> {
    let first = accounts.first().ok_or(ConnectorError::Declined)?;
    Address::checksummed(first)
}

/// Fetch the user's own hub file and sign it back.
async fn initial_sync(session: &HubSession) -> ConnectorResult<()> {
    let address = session.address().ok_or(ConnectorError::NotAuthenticated)?;
    let files = session.files();
    let file = files.get(address.as_str()).await?;
    files.set(file)?;
    files.sync().await
}
