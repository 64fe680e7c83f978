use serde::{Deserialize, Serialize};

/// How the user connected. Persisted string forms predate this crate and
/// are kept so existing cookies keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectMethod {
    #[serde(rename = "walletConnect")]
    Relay,
    #[serde(rename = "metamask")]
    Extension,
}

impl ConnectMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectMethod::Relay => "walletConnect",
            ConnectMethod::Extension => "metamask",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim() {
            "walletConnect" => Some(ConnectMethod::Relay),
            "metamask" => Some(ConnectMethod::Extension),
            _ => None,
        }
    }
}
