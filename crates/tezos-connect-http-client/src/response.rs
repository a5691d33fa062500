//! Response handling

use crate::error::HttpError;

/// Result of an HTTP operation
pub type Response<R, E = HttpError> = Result<R, E>;

/// Answered request whose status has not been checked
#[derive(Debug)]
pub struct RawResponse {
    status: u16,
    inner: reqwest::Response,
}

impl RawResponse {
    pub(crate) fn new(response: reqwest::Response) -> Self {
        Self {
            status: response.status().as_u16(),
            inner: response,
        }
    }

    /// Status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Body as text
    pub async fn text(self) -> Response<String> {
        Ok(self.inner.text().await?)
    }
}
