//! Node RPC and custody service clients against mockito servers

use std::str::FromStr;

use tezos_connect::tezos::{Address, BlockHash, KeyKind};
use tezos_connect::{BlockId, ChainClient, HttpRpcClient, LookupError, RpcError, SignatoryClient};
use tezos_connect_http_client::{HttpClient, HttpError};

const ALICE: &str = "tz1VSUr8wwNhLAzempoch5d6hLRiTh8Cjcjb";
const ALICE_PK: &str = "edpkvGfYw3LyB1UcCahKQk4rF2tvbMUk8GFiTuMjL75uGXrpvKXhjn";
const TZBTC: &str = "KT1PWx2mnDueood7fEmfbBDKx1D9BAnnXitn";
const GENESIS: &str = "BLockGenesisGenesisGenesisGenesisGenesisf79b5d1CoW2";

// === HttpRpcClient ===

#[tokio::test]
async fn test_block_hash() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chains/main/blocks/head/hash")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#""{}""#, GENESIS))
        .create_async()
        .await;

    let client = HttpRpcClient::new(server.url(), HttpClient::new());
    let hash = client
        .get_block_hash(BlockId::Head)
        .await
        .expect("block hash");

    assert_eq!(hash, BlockHash::from_str(GENESIS).expect("valid hash"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unrevealed_implicit_account() {
    let mut server = mockito::Server::new_async().await;
    let contract = server
        .mock("GET", format!("/chains/main/blocks/head/context/contracts/{}", ALICE).as_str())
        .with_status(200)
        .with_body(r#"{"balance": "2500000", "counter": "41"}"#)
        .create_async()
        .await;
    let manager_key = server
        .mock(
            "GET",
            format!("/chains/main/blocks/head/context/contracts/{}/manager_key", ALICE).as_str(),
        )
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let client = HttpRpcClient::new(server.url(), HttpClient::new());
    let info = client
        .get_contract_ext(&Address::from_str(ALICE).expect("address"), BlockId::Head)
        .await
        .expect("contract info");

    assert_eq!(info.counter, 41);
    assert!(!info.is_revealed());

    contract.assert_async().await;
    manager_key.assert_async().await;
}

#[tokio::test]
async fn test_revealed_implicit_account_at_level() {
    let mut server = mockito::Server::new_async().await;
    let _contract = server
        .mock("GET", format!("/chains/main/blocks/100/context/contracts/{}", ALICE).as_str())
        .with_status(200)
        .with_body(r#"{"balance": "0", "counter": "7"}"#)
        .create_async()
        .await;
    let _manager_key = server
        .mock(
            "GET",
            format!("/chains/main/blocks/100/context/contracts/{}/manager_key", ALICE).as_str(),
        )
        .with_status(200)
        .with_body(format!(r#""{}""#, ALICE_PK))
        .create_async()
        .await;

    let client = HttpRpcClient::new(server.url(), HttpClient::new());
    let info = client
        .get_contract_ext(&Address::from_str(ALICE).expect("address"), BlockId::Level(100))
        .await
        .expect("contract info");

    assert_eq!(info.counter, 7);
    assert_eq!(info.manager_key.as_deref(), Some(ALICE_PK));
}

#[tokio::test]
async fn test_originated_contract_has_no_manager_key() {
    let mut server = mockito::Server::new_async().await;
    let _contract = server
        .mock("GET", format!("/chains/main/blocks/head/context/contracts/{}", TZBTC).as_str())
        .with_status(200)
        .with_body(r#"{"balance": "0"}"#)
        .create_async()
        .await;
    let manager_key = server
        .mock(
            "GET",
            format!("/chains/main/blocks/head/context/contracts/{}/manager_key", TZBTC).as_str(),
        )
        .expect(0)
        .create_async()
        .await;

    let client = HttpRpcClient::new(server.url(), HttpClient::new());
    let info = client
        .get_contract_ext(&Address::from_str(TZBTC).expect("address"), BlockId::Head)
        .await
        .expect("contract info");

    assert_eq!(info.counter, 0);
    manager_key.assert_async().await;
}

#[tokio::test]
async fn test_missing_contract() {
    let mut server = mockito::Server::new_async().await;
    let _contract = server
        .mock("GET", format!("/chains/main/blocks/head/context/contracts/{}", ALICE).as_str())
        .with_status(404)
        .with_body("[]")
        .create_async()
        .await;

    let client = HttpRpcClient::new(server.url(), HttpClient::new());
    let err = client
        .get_contract_ext(&Address::from_str(ALICE).expect("address"), BlockId::Head)
        .await
        .expect_err("missing contract");

    assert!(matches!(err, RpcError::UnknownContract(ref address) if address == ALICE));
}

#[tokio::test]
async fn test_node_error() {
    let mut server = mockito::Server::new_async().await;
    let _hash = server
        .mock("GET", "/chains/main/blocks/head/hash")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let client = HttpRpcClient::new(server.url(), HttpClient::new());
    let err = client
        .get_block_hash(BlockId::Head)
        .await
        .expect_err("node error");

    assert!(matches!(
        err,
        RpcError::Http(HttpError::Status { status: 500, .. })
    ));
}

// === SignatoryClient ===

#[tokio::test]
async fn test_public_key_lookup() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", format!("/keys/{}", ALICE).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"public_key": "{}"}}"#, ALICE_PK))
        .create_async()
        .await;

    let client = SignatoryClient::new(format!("{}/", server.url()), HttpClient::new());
    let key = client.get_public_key(ALICE).await.expect("public key");

    assert_eq!(key.kind(), KeyKind::Ed25519);
    assert_eq!(key.to_string(), ALICE_PK);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_public_key_lookup_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/keys/{}", ALICE).as_str())
        .with_status(404)
        .with_body("unknown key")
        .create_async()
        .await;

    let client = SignatoryClient::new(server.url(), HttpClient::new());
    let err = client.get_public_key(ALICE).await.expect_err("not found");

    assert!(matches!(err, LookupError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_public_key_lookup_bad_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/keys/{}", ALICE).as_str())
        .with_status(200)
        .with_body(r#"{"key": "missing field"}"#)
        .create_async()
        .await;

    let client = SignatoryClient::new(server.url(), HttpClient::new());
    let err = client.get_public_key(ALICE).await.expect_err("bad body");

    assert!(matches!(err, LookupError::Json(_)));
}

#[tokio::test]
async fn test_public_key_lookup_bad_key() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", format!("/keys/{}", ALICE).as_str())
        .with_status(200)
        .with_body(r#"{"public_key": "edpkNOTAKEY"}"#)
        .create_async()
        .await;

    let client = SignatoryClient::new(server.url(), HttpClient::new());
    let err = client.get_public_key(ALICE).await.expect_err("bad key");

    assert!(matches!(err, LookupError::Key(_)));
}

#[tokio::test]
async fn test_public_key_lookup_unreachable() {
    let client = SignatoryClient::new("http://127.0.0.1:1", HttpClient::new());
    let err = client.get_public_key(ALICE).await.expect_err("unreachable");

    assert!(matches!(err, LookupError::Request(_)));
}
