//! Wallet module - the two ways a user can bring an account
//!
//! The connector never holds keys. It asks a wallet for accounts and for
//! `personal_sign` signatures through these ports; hosts supply the
//! implementations (the `wasm` feature ships browser ones).
//!
//! # Architecture
//!
//! ```text
//! Connector
//!     │
//!     ├── RelayTransport   (QR approval relayed through a bridge server)
//!     │        └── enable → accounts, prepare_sign, personal_sign, disconnect
//!     │
//!     └── ExtensionWallet  (object injected into the page)
//!              └── request_accounts, personal_sign
//! ```

mod method;

pub use method::ConnectMethod;

use crate::error::ConnectorResult;
use async_trait::async_trait;
use std::rc::Rc;

/// Anything that can produce a `personal_sign` signature for an account.
#[async_trait(?Send)]
pub trait Signer {
    async fn personal_sign(&self, message: &str, address: &str) -> ConnectorResult<String>;
}

/// In-page wallet extension (EIP-1193 provider).
#[async_trait(?Send)]
pub trait ExtensionWallet: Signer {
    /// `eth_requestAccounts`; may prompt the user.
    async fn request_accounts(&self) -> ConnectorResult<Vec<String>>;
}

/// Relay-based wallet session approved out of band.
#[async_trait(?Send)]
pub trait RelayTransport: Signer {
    /// Open the session. Declining the QR prompt is `Err(Declined)` or an
    /// empty account list.
    async fn enable(&self) -> ConnectorResult<Vec<String>>;

    /// Called right before each signature request so the host can tell the
    /// user to pick up their phone.
    fn prepare_sign(&self) {}

    async fn disconnect(&self) -> ConnectorResult<()>;
}

/// Signs through a relay, running its prompt hook first.
pub struct RelaySigner(pub Rc<dyn RelayTransport>);

#[async_trait(?Send)]
impl Signer for RelaySigner {
    async fn personal_sign(&self, message: &str, address: &str) -> ConnectorResult<String> {
        self.0.prepare_sign();
        self.0.personal_sign(message, address).await
    }
}

/// Signs through the page's extension wallet.
pub struct ExtensionSigner(pub Rc<dyn ExtensionWallet>);

#[async_trait(?Send)]
impl Signer for ExtensionSigner {
    async fn personal_sign(&self, message: &str, address: &str) -> ConnectorResult<String> {
        self.0.personal_sign(message, address).await
    }
}
