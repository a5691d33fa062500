//! Custody service public key lookup

use std::str::FromStr;

use serde::Deserialize;
use tezos_connect_http_client::{HttpClient, HttpError};
use thiserror::Error;
use tracing::instrument;

use crate::tezos::{self, PublicKey};

/// Key lookup error
#[derive(Debug, Error)]
pub enum LookupError {
    /// Request could not be sent
    #[error("key request failed: {0}")]
    Request(HttpError),
    /// Service answered with a non success status
    #[error("key lookup for `{address}` returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Address that was looked up
        address: String,
    },
    /// Body could not be read
    #[error("failed to read key response: {0}")]
    Body(HttpError),
    /// Body is not the expected JSON document
    #[error("invalid key response: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned key cannot be parsed
    #[error("invalid public key: {0}")]
    Key(#[from] tezos::Error),
}

#[derive(Debug, Deserialize)]
struct KeyResponse {
    public_key: String,
}

/// Client for the signing custody service
#[derive(Debug, Clone)]
pub struct SignatoryClient {
    base_url: String,
    http_client: HttpClient,
}

impl SignatoryClient {
    /// Client for the service at `base_url`
    pub fn new(base_url: impl Into<String>, http_client: HttpClient) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Public key held for `address`
    #[instrument(skip(self))]
    pub async fn get_public_key(&self, address: &str) -> Result<PublicKey, LookupError> {
        let url = format!("{}/keys/{}", self.base_url, address);

        let response = self
            .http_client
            .get_raw(&url)
            .await
            .map_err(LookupError::Request)?;

        if response.status() != 200 {
            return Err(LookupError::Status {
                status: response.status(),
                address: address.to_string(),
            });
        }

        let body = response.text().await.map_err(LookupError::Body)?;
        let key: KeyResponse = serde_json::from_str(&body)?;

        tracing::debug!("Custody service returned key {} for {}", key.public_key, address);

        Ok(PublicKey::from_str(&key.public_key)?)
    }
}
