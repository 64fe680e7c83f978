//! Visual themes unlocked by NFT holdings.

use super::IndexAsset;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub name: String,
    /// CSS class applied to the page.
    pub class: String,
    pub nft_id_prefix: String,
}

impl Theme {
    pub fn new(name: impl Into<String>, class: impl Into<String>, nft_id_prefix: impl Into<String>) -> Self {
        Self { name: name.into(), class: class.into(), nft_id_prefix: nft_id_prefix.into() }
    }

    /// Unlocked by a visible NFT whose id carries this theme's prefix.
    pub fn unlocked_by(&self, asset: &IndexAsset) -> bool {
        asset.is_nft() && !asset.is_hidden() && asset.id.starts_with(&self.nft_id_prefix)
    }
}

/// Configured themes, in configuration order, that any asset unlocks.
pub fn available_themes(themes: &[Theme], assets: &[IndexAsset]) -> Vec<Theme> {
    themes
        .iter()
        .filter(|theme| assets.iter().any(|asset| theme.unlocked_by(asset)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn themes() -> Vec<Theme> {
        vec![
            Theme::new("loot", "loot-theme", "EVM+-0xFF9C1b15B16263C61d017ee9F65C50e4AE0113D7-"),
            Theme::new("rss3", "rss3-theme", "EVM+-0x5a59B7B9a9dB4b5a1e5c6DBf8E5dC9b2a8Ff1a2b-"),
        ]
    }

    fn loot(n: u32) -> IndexAsset {
        IndexAsset::new("NFT", format!("EVM+-0xFF9C1b15B16263C61d017ee9F65C50e4AE0113D7-{n}"))
    }

    #[test]
    fn test_empty_assets_unlock_nothing() {
        assert!(available_themes(&themes(), &[]).is_empty());
    }

    #[test]
    fn test_theme_listed_once_for_many_matches() {
        let assets = vec![loot(1), loot(2), loot(3)];
        let unlocked = available_themes(&themes(), &assets);
        assert_eq!(unlocked.len(), 1);
        assert_eq!(unlocked[0].name, "loot");
    }

    #[test]
    fn test_hidden_and_non_nft_assets_ignored() {
        let hidden = loot(1).with_tag("pass:hidden");
        let not_nft = IndexAsset::new("Donation", loot(2).id);
        assert!(available_themes(&themes(), &[hidden, not_nft]).is_empty());
    }

    #[test]
    fn test_other_tags_do_not_hide() {
        let tagged = loot(1).with_tag("pass:order:1");
        assert_eq!(available_themes(&themes(), &[tagged]).len(), 1);
    }

    #[test]
    fn test_preserves_config_order() {
        let rss3 = IndexAsset::new("NFT", "EVM+-0x5a59B7B9a9dB4b5a1e5c6DBf8E5dC9b2a8Ff1a2b-7");
        let unlocked = available_themes(&themes(), &[rss3, loot(1)]);
        let names: Vec<_> = unlocked.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["loot", "rss3"]);
    }
}
