//! HTTP client wrapper

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::HttpError;
use crate::response::{RawResponse, Response};

/// HTTP client wrapper
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Create a new HTTP client builder
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// GET request, returns JSON deserialized to R
    ///
    /// Any non-2xx status is returned as [`HttpError::Status`] carrying the
    /// response body.
    pub async fn fetch<R>(&self, url: &str) -> Response<R>
    where
        R: DeserializeOwned,
    {
        tracing::trace!("GET {}", url);
        let response = self.inner.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// GET request returning raw response body
    ///
    /// The status is not checked, callers inspect it on the returned
    /// [`RawResponse`].
    pub async fn get_raw(&self, url: &str) -> Response<RawResponse> {
        tracing::trace!("GET {}", url);
        let response = self.inner.get(url).send().await?;
        Ok(RawResponse::new(response))
    }
}

/// HTTP client builder for configuring timeouts
#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    timeout: Option<Duration>,
}

impl HttpClientBuilder {
    /// Total timeout applied to every request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the HTTP client
    pub fn build(self) -> Response<HttpClient> {
        let mut builder = reqwest::Client::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(HttpError::from)?;
        Ok(HttpClient { inner: client })
    }
}
