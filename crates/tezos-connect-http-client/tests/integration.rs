//! HttpClient against a mockito server

use std::time::Duration;

use serde::Deserialize;
use tezos_connect_http_client::{HttpClient, HttpError};

#[derive(Debug, Deserialize, PartialEq)]
struct ContractResponse {
    balance: String,
    counter: String,
}

// === fetch ===

#[tokio::test]
async fn test_fetch_decodes_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chains/main/blocks/head/context/contracts/tz1abc")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"balance": "10", "counter": "41"}"#)
        .create_async()
        .await;

    let client = HttpClient::new();
    let url = format!(
        "{}/chains/main/blocks/head/context/contracts/tz1abc",
        server.url()
    );
    let contract: ContractResponse = client.fetch(&url).await.expect("contract");

    assert_eq!(contract.balance, "10");
    assert_eq!(contract.counter, "41");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_json_null() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/manager_key")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let client = HttpClient::new();
    let key: Option<String> = client
        .fetch(&format!("{}/manager_key", server.url()))
        .await
        .expect("null body");

    assert_eq!(key, None);
}

#[tokio::test]
async fn test_fetch_error_status_keeps_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/chains/main/blocks/head/hash")
        .with_status(500)
        .with_body(r#"[{"kind":"temporary","id":"failure"}]"#)
        .create_async()
        .await;

    let client = HttpClient::new();
    let result: Result<String, _> = client
        .fetch(&format!("{}/chains/main/blocks/head/hash", server.url()))
        .await;

    match result {
        Err(HttpError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert!(body.contains("temporary"));
        }
        other => panic!("expected a status error, got {:?}", other),
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_invalid_json() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/chains/main/blocks/head/hash")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = HttpClient::new();
    let result: Result<String, _> = client
        .fetch(&format!("{}/chains/main/blocks/head/hash", server.url()))
        .await;

    assert!(matches!(result, Err(HttpError::Decode(_))));
}

#[tokio::test]
async fn test_fetch_unreachable() {
    let client = HttpClient::builder()
        .timeout(Duration::from_secs(5))
        .build()
        .expect("client");
    let result: Result<String, _> = client.fetch("http://127.0.0.1:1/hash").await;

    let err = result.expect_err("nothing listens on port 1");
    assert_eq!(err.status(), None);
}

// === get_raw ===

#[tokio::test]
async fn test_get_raw_text() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/keys/tz1abc")
        .with_status(200)
        .with_body(r#"{"public_key": "edpk"}"#)
        .create_async()
        .await;

    let client = HttpClient::new();
    let response = client
        .get_raw(&format!("{}/keys/tz1abc", server.url()))
        .await
        .expect("answered");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.text().await.expect("body"),
        r#"{"public_key": "edpk"}"#
    );

    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_raw_leaves_status_to_caller() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/keys/tz1abc")
        .with_status(404)
        .with_body("unknown address")
        .create_async()
        .await;

    let client = HttpClient::new();
    let response = client
        .get_raw(&format!("{}/keys/tz1abc", server.url()))
        .await
        .expect("answered");

    assert_eq!(response.status(), 404);
}
