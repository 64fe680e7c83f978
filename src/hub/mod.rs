//! Hub - sessions against the content-index service
//!
//! A [`HubSession`] is bound to one endpoint and, when signing-capable, one
//! address and signer. Visitor sessions have no account and can only read.
//!
//! ```text
//! HubSession
//!     ├── sign(data)          → signer.personal_sign(data, address)
//!     ├── sig_message(acct)   → challenge text for linking another account
//!     └── files()             → HubFiles: get / set / sync
//! ```

mod files;

pub use files::HubFiles;

use crate::core::Address;
use crate::error::{ConnectorError, ConnectorResult};
use crate::wallet::Signer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// An extra account linked to the user's hub identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedAccount {
    pub platform: String,
    pub identity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl LinkedAccount {
    pub fn new(platform: impl Into<String>, identity: impl Into<String>) -> Self {
        Self { platform: platform.into(), identity: identity.into(), signature: None }
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }
}

struct SessionAccount {
    address: Address,
    signer: Rc<dyn Signer>,
    agent_sign: bool,
}

struct SessionInner {
    endpoint: String,
    account: Option<SessionAccount>,
    http: reqwest::Client,
    staged: RefCell<Vec<Value>>,
}

/// Session against the hub. Clones share staged files.
#[derive(Clone)]
pub struct HubSession {
    inner: Rc<SessionInner>,
}

impl HubSession {
    /// Signing session for `address`.
    pub fn signing(
        endpoint: impl Into<String>,
        address: Address,
        signer: Rc<dyn Signer>,
        agent_sign: bool,
        http: reqwest::Client,
    ) -> Self {
        Self::build(endpoint.into(), Some(SessionAccount { address, signer, agent_sign }), http)
    }

    /// Read-only session with no account.
    pub fn visitor(endpoint: impl Into<String>, http: reqwest::Client) -> Self {
        Self::build(endpoint.into(), None, http)
    }

    fn build(endpoint: String, account: Option<SessionAccount>, http: reqwest::Client) -> Self {
        Self {
            inner: Rc::new(SessionInner {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                account,
                http,
                staged: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    pub fn address(&self) -> Option<&Address> {
        self.inner.account.as_ref().map(|a| &a.address)
    }

    pub fn agent_sign(&self) -> bool {
        self.inner.account.as_ref().is_some_and(|a| a.agent_sign)
    }

    pub fn is_visitor(&self) -> bool {
        self.inner.account.is_none()
    }

    /// Sign `data` with the session's wallet for the session's address.
    pub async fn sign(&self, data: &str) -> ConnectorResult<String> {
        let account = self.inner.account.as_ref().ok_or(ConnectorError::NotAuthenticated)?;
        let signer = account.signer.clone();
        signer.personal_sign(data, account.address.as_str()).await
    }

    /// Challenge the new account signs to prove it may be linked here.
    pub fn sig_message(&self, account: &LinkedAccount) -> ConnectorResult<String> {
        let address = self.address().ok_or(ConnectorError::NotAuthenticated)?;
        Ok(format!(
            "[RSS3] I am adding account {}-{} to my RSS3 Instance {}",
            account.platform, account.identity, address
        ))
    }

    pub fn files(&self) -> HubFiles<'_> {
        HubFiles::new(self)
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.inner.http
    }

    pub(crate) fn staged(&self) -> &RefCell<Vec<Value>> {
        &self.inner.staged
    }
}

impl fmt::Debug for HubSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubSession")
            .field("endpoint", &self.inner.endpoint)
            .field("address", &self.address())
            .field("agent_sign", &self.agent_sign())
            .field("staged", &self.inner.staged.borrow().len())
            .finish()
    }
}
