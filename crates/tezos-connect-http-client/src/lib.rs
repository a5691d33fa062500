//! HTTP client abstraction for the Tezos connector
//!
//! This crate wraps the underlying HTTP library (reqwest) so the connector
//! crates talk to the chain node and the signatory service through one small,
//! testable surface.
//!
//! # Example
//!
//! ```no_run
//! use serde::Deserialize;
//! use tezos_connect_http_client::{HttpClient, Response};
//!
//! #[derive(Deserialize)]
//! struct KeyResponse {
//!     public_key: String,
//! }
//!
//! async fn example() -> Response<KeyResponse> {
//!     let client = HttpClient::new();
//!     client.fetch("http://localhost:6732/keys/tz1...").await
//! }
//! ```

mod client;
mod error;
mod response;

pub use client::{HttpClient, HttpClientBuilder};
pub use error::HttpError;
pub use response::{RawResponse, Response};
