//! hubconnect: wallet login and cached asset lookups for a content-index hub.
//!
//! # Architecture
//!
//! ```text
//! Connector (one per page / process)
//!   │
//!   ├── Wallet ports
//!   │     ├── RelayTransport   (QR session through a bridge)
//!   │     └── ExtensionWallet  (injected page wallet)
//!   │
//!   ├── Storage ports
//!   │     ├── store            (cookies / file / memory)
//!   │     └── legacy_store     (localStorage, migrated once)
//!   │
//!   ├── HubSession (signing or visitor)
//!   │     └── files: get / set / sync
//!   │
//!   └── AssetCache (address, type) → AssetProfile
//! ```
//!
//! # Operations
//!
//! | Operation | Method | Needs session |
//! |-----------|--------|---------------|
//! | Relay login | `connect_via_relay()` | no |
//! | Extension login | `connect_via_extension()` | no |
//! | Logout | `disconnect()` | no |
//! | Restore on load | `reconnect_if_persisted()` | no |
//! | Asset profile | `fetch_asset_profile(addr, type, refresh)` | no |
//! | NFT / donation detail | `fetch_nft_detail(..)` / `fetch_donation_detail(..)` | no |
//! | Link account | `add_linked_account(platform)` | yes |
//! | Themes | `available_themes(assets)` | no |
//!
//! # Features
//!
//! - `native` - file-backed store, rustls, tracing subscriber
//! - `wasm` - cookies, localStorage, `window.ethereum`, JS bindings
//!
//! # Usage
//!
//! ```ignore
//! use hubconnect::{Connector, ConnectorConfig, ConnectorPorts};
//!
//! let connector = Connector::new(ConnectorConfig::new("https://hub.example.org"), ports)?;
//! if !connector.reconnect_if_persisted().await? {
//!     connector.connect_via_extension().await?;
//! }
//! let nfts = connector.fetch_asset_profile(address, "NFT", false).await?;
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod assets;
pub mod config;
pub mod connector;
pub mod core;
pub mod error;
pub mod hub;
pub mod storage;
pub mod wallet;

// =============================================================================
// Native-only modules
// =============================================================================
#[cfg(feature = "native")]
pub mod logging;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports
// =============================================================================
pub use assets::{AssetProfile, DonationDetail, GeneralAsset, IndexAsset, NftDetail, Theme};
pub use config::ConnectorConfig;
pub use connector::{ConnectionRecord, Connector, ConnectorPorts};
pub use crate::core::Address;
pub use error::{ConnectorError, ConnectorResult};
pub use hub::{HubSession, LinkedAccount};
pub use storage::{KeyValueStore, MemoryStore};
pub use wallet::{ConnectMethod, ExtensionWallet, RelayTransport, Signer};

#[cfg(feature = "native")]
pub use storage::FileStore;

#[cfg(feature = "wasm")]
pub use wasm::WasmConnector;
