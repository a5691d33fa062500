//! HTTP errors

use thiserror::Error;

/// Error returned by [`HttpClient`](crate::HttpClient) requests
#[derive(Debug, Error)]
pub enum HttpError {
    /// Server answered with a non success status
    #[error("status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, empty when unreadable
        body: String,
    },
    /// Server could not be reached
    #[error("cannot connect: {0}")]
    Connect(String),
    /// Request did not complete in time
    #[error("request timed out")]
    Timeout,
    /// Body is not the expected JSON document
    #[error("cannot decode body: {0}")]
    Decode(String),
    /// Client could not be configured
    #[error("cannot build client: {0}")]
    Build(String),
    /// Any other transport failure
    #[error("request failed: {0}")]
    Request(String),
}

impl HttpError {
    /// Status code, for errors produced by an answered request
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return HttpError::Timeout;
        }
        if err.is_builder() {
            return HttpError::Build(err.to_string());
        }
        if err.is_connect() {
            return HttpError::Connect(err.to_string());
        }
        if err.is_decode() {
            return HttpError::Decode(err.to_string());
        }
        match err.status() {
            Some(status) => HttpError::Status {
                status: status.as_u16(),
                body: String::new(),
            },
            None => HttpError::Request(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for HttpError {
    fn from(err: serde_json::Error) -> Self {
        HttpError::Decode(err.to_string())
    }
}
