//! HTTP response wrapper.

use bytes::Bytes;
use http::StatusCode;

use crate::Result;

/// HTTP response with a fully buffered body.
#[derive(Debug)]
pub struct Response {
    status: StatusCode,
    body: Bytes,
}

impl Response {
    /// Create a response from a reqwest response, reading the whole body.
    ///
    /// A body that fails mid-read is an error: a truncated payload would
    /// otherwise be classified as if it were complete.
    pub(crate) async fn from_reqwest(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let body = response.bytes().await?;
        Ok(Self { status, body })
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the raw body.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Get the body as text, replacing invalid UTF-8 sequences.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
