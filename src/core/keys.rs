//! Key and path constants
//!
//! Centralized registry for persisted keys and hub URL segments.

/// Current persistence keys (cookie names on the web)
pub mod persisted {
    pub const METHOD: &str = "LAST_CONNECT_METHOD";
    pub const ADDRESS: &str = "LAST_CONNECT_ADDRESS";

    pub const ALL: &[&str] = &[METHOD, ADDRESS];
}

/// Pre-cookie localStorage keys, migrated once then deleted
pub mod legacy {
    pub const METHOD: &str = "lastConnect";
    pub const ADDRESS: &str = "lastAddress";

    /// (legacy key, current key)
    pub const MIGRATIONS: &[(&str, &str)] = &[
        (METHOD, super::persisted::METHOD),
        (ADDRESS, super::persisted::ADDRESS),
    ];
}

/// Hub asset-profile paths
pub mod hub {
    pub const ASSET_PROFILE: &str = "asset-profile";
    pub const NFT: &str = "nft";
    pub const DONATION: &str = "gitcoin-donation";
}

/// Asset tags and types from hub files
pub mod asset {
    pub const NFT_TYPE: &str = "NFT";
    pub const HIDDEN_TAG: &str = "pass:hidden";
}
