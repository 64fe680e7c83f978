//! Connector errors.
//!
//! Every failure a caller can branch on has its own variant, so nothing is
//! signalled through `None` returns or magic strings.

use thiserror::Error;

/// Result type for connector operations
pub type ConnectorResult<T> = Result<T, ConnectorError>;

#[derive(Debug, Error)]
pub enum ConnectorError {
    /// The user dismissed the wallet prompt or the wallet returned no accounts.
    #[error("wallet approval declined")]
    Declined,

    /// The operation needs an active session.
    #[error("Not logged in")]
    NotAuthenticated,

    #[error("network: {0}")]
    Network(String),

    #[error("hub responded with HTTP {status}")]
    Http { status: u16 },

    #[error("hub returned an empty body")]
    EmptyBody,

    #[error("decode: {0}")]
    Decode(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("wallet: {0}")]
    Wallet(String),

    #[error("storage: {0}")]
    Storage(String),

    #[error("config: {0}")]
    Config(String),
}

impl ConnectorError {
    /// Lookup failures a caller may retry by re-invoking the fetch.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            ConnectorError::Network(_)
                | ConnectorError::Http { .. }
                | ConnectorError::EmptyBody
                | ConnectorError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ConnectorError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            ConnectorError::Http { status: status.as_u16() }
        } else {
            ConnectorError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ConnectorError {
    fn from(e: serde_json::Error) -> Self {
        ConnectorError::Decode(e.to_string())
    }
}
