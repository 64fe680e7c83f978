//! Lookup Test Suite: asset profiles and details against a mock hub
//!
//! 1. Cached profiles are served without a request
//! 2. `refresh` always goes to the hub
//! 3. Failed lookups never touch the cache
//! 4. Detail lookups send platform, identity, and id
//! 5. Empty and undecodable bodies are distinct errors
//! 6. An unreachable hub is a network error and caches nothing

mod common;

use common::*;
use hubconnect::assets::AssetKey;
use hubconnect::ConnectorError;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn profile_path(address: &str, kind: &str) -> String {
    format!("/asset-profile/{address}/{kind}/")
}

fn profile_body(id: &str) -> serde_json::Value {
    json!({
        "status": true,
        "assets": [{ "platform": "EVM+", "identity": ALICE, "id": id, "type": "Ethereum-NFT" }]
    })
}

async fn connector(server: &MockServer) -> Harness {
    harness(&server.uri(), ScriptedRelay::declining(), ScriptedExtension::default())
}

#[tokio::test]
async fn cached_profile_is_fetched_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(profile_path(ALICE, "nft")))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("1")))
        .expect(1)
        .mount(&server)
        .await;
    let h = connector(&server).await;

    // type is lowercased for the URL only
    let first = h.connector.fetch_asset_profile(ALICE, "NFT", false).await.expect("first");
    let second = h.connector.fetch_asset_profile(ALICE, "NFT", false).await.expect("second");

    assert_eq!(first, second);
    assert_eq!(first.assets.len(), 1);
    assert_eq!(first.assets[0].kind, "Ethereum-NFT");
    assert!(h.connector.cached_profiles().contains(&AssetKey::new(ALICE, "NFT")));
}

#[tokio::test]
async fn refresh_always_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(profile_path(ALICE, "nft")))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("1")))
        .expect(3)
        .mount(&server)
        .await;
    let h = connector(&server).await;

    h.connector.fetch_asset_profile(ALICE, "NFT", false).await.unwrap();
    h.connector.fetch_asset_profile(ALICE, "NFT", true).await.unwrap();
    h.connector.fetch_asset_profile(ALICE, "NFT", true).await.unwrap();
}

#[tokio::test]
async fn cache_is_keyed_by_address_and_type() {
    let server = MockServer::start().await;
    for (address, kind) in [(ALICE, "nft"), (ALICE, "donation"), (BOB, "nft")] {
        Mock::given(method("GET"))
            .and(path(profile_path(address, kind)))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_body(kind)))
            .expect(1)
            .mount(&server)
            .await;
    }
    let h = connector(&server).await;

    h.connector.fetch_asset_profile(ALICE, "NFT", false).await.unwrap();
    h.connector.fetch_asset_profile(ALICE, "Donation", false).await.unwrap();
    h.connector.fetch_asset_profile(BOB, "NFT", false).await.unwrap();

    assert_eq!(h.connector.cached_profiles().len(), 3);
}

#[tokio::test]
async fn failed_lookup_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(profile_path(ALICE, "nft")))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;
    let h = connector(&server).await;

    for _ in 0..2 {
        let err = h.connector.fetch_asset_profile(ALICE, "NFT", false).await.unwrap_err();
        assert!(matches!(err, ConnectorError::Http { status: 500 }));
        assert!(err.is_lookup_failure());
    }
    assert!(h.connector.cached_profiles().is_empty());
}

#[tokio::test]
async fn failed_refresh_keeps_previous_entry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(profile_path(ALICE, "nft")))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_body("old")))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(profile_path(ALICE, "nft")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let h = connector(&server).await;

    h.connector.fetch_asset_profile(ALICE, "NFT", false).await.unwrap();
    assert!(h.connector.fetch_asset_profile(ALICE, "NFT", true).await.is_err());

    let cached = h.connector.fetch_asset_profile(ALICE, "NFT", false).await.expect("cached");
    assert_eq!(cached.assets[0].id, "old");
}

#[tokio::test]
async fn nft_detail_sends_asset_coordinates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(profile_path(ALICE, "nft")))
        .and(query_param("platform", "EVM+"))
        .and(query_param("identity", BOB))
        .and(query_param("id", "EVM+-0xLOOT-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": { "name": "Loot #1" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let h = connector(&server).await;

    let detail = h
        .connector
        .fetch_nft_detail(ALICE, "EVM+", BOB, "EVM+-0xLOOT-1")
        .await
        .expect("detail");

    assert_eq!(detail.status, Some(true));
    assert_eq!(detail.data["name"], "Loot #1");
}

#[tokio::test]
async fn donation_detail_uses_donation_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(profile_path(ALICE, "gitcoin-donation")))
        .and(query_param("id", "grant-12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": { "grant": 12 }
        })))
        .mount(&server)
        .await;
    let h = connector(&server).await;

    let detail = h
        .connector
        .fetch_donation_detail(ALICE, "EVM+", ALICE, "grant-12")
        .await
        .expect("detail");

    assert_eq!(detail.data["grant"], 12);
}

#[tokio::test]
async fn empty_and_null_bodies_are_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(profile_path(ALICE, "nft")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(profile_path(BOB, "nft")))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;
    let h = connector(&server).await;

    let empty = h.connector.fetch_nft_detail(ALICE, "EVM+", ALICE, "1").await;
    assert!(matches!(empty, Err(ConnectorError::EmptyBody)));

    let null = h.connector.fetch_asset_profile(BOB, "NFT", false).await;
    assert!(matches!(null, Err(ConnectorError::EmptyBody)));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(profile_path(ALICE, "nft")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    let h = connector(&server).await;

    let err = h.connector.fetch_asset_profile(ALICE, "NFT", false).await.unwrap_err();
    assert!(matches!(err, ConnectorError::Decode(_)));
    assert!(h.connector.cached_profiles().is_empty());
}

// nothing listens on the discard port
const UNREACHABLE_HUB: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn unreachable_hub_is_a_network_error() {
    let h = harness(UNREACHABLE_HUB, ScriptedRelay::declining(), ScriptedExtension::default());

    let err = h.connector.fetch_asset_profile(ALICE, "NFT", false).await.unwrap_err();
    assert!(matches!(err, ConnectorError::Network(_)), "got {err:?}");
    assert!(err.is_lookup_failure());
    assert!(h.connector.cached_profiles().is_empty());

    let err = h.connector.fetch_nft_detail(ALICE, "EVM+", ALICE, "1").await.unwrap_err();
    assert!(matches!(err, ConnectorError::Network(_)), "got {err:?}");
    assert!(err.is_lookup_failure());
}
