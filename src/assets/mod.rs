//! Assets - hub asset-profile payloads, the profile cache, and theme unlocks
//!
//! # Hub Paths
//!
//! | Path | Cached | Payload |
//! |------|--------|---------|
//! | `/asset-profile/{address}/{type}/` | yes, per (address, type) | [`AssetProfile`] |
//! | `/asset-profile/{address}/nft/?platform&id&identity` | no | [`NftDetail`] |
//! | `/asset-profile/{address}/gitcoin-donation/?platform&id&identity` | no | [`DonationDetail`] |

mod cache;
mod themes;

pub use cache::{AssetCache, AssetKey};
pub use themes::{available_themes, Theme};

use crate::core::keys::asset;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-computed summary of an address's holdings of one asset type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetProfile {
    #[serde(default)]
    pub assets: Vec<GeneralAsset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralAsset {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub identity: String,
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Value>,
}

/// Detail for a single NFT. `data` is hub-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(default)]
    pub data: Value,
}

/// Detail for a single donation. `data` is hub-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(default)]
    pub data: Value,
}

/// An asset entry from the user's hub file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexAsset {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl IndexAsset {
    pub fn new(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self { kind: kind.into(), id: id.into(), tags: None }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.get_or_insert_with(Vec::new).push(tag.into());
        self
    }

    pub fn is_nft(&self) -> bool {
        self.kind == asset::NFT_TYPE
    }

    pub fn is_hidden(&self) -> bool {
        self.tags
            .as_ref()
            .is_some_and(|tags| tags.iter().any(|t| t == asset::HIDDEN_TAG))
    }
}
