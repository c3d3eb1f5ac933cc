//! Form POST request.

use http::header::CONTENT_TYPE;
use url::Url;

use crate::{HttpClient, Response, Result};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A POST carrying an already URL-encoded form body.
///
/// The body is sent verbatim, so field layouts such as repeated `key[]=`
/// pairs reach the server exactly as encoded.
pub struct FormRequest<'a> {
    client: &'a HttpClient,
    url: String,
    body: String,
}

impl<'a> FormRequest<'a> {
    pub(crate) fn new(client: &'a HttpClient, url: String) -> Self {
        Self {
            client,
            url,
            body: String::new(),
        }
    }

    /// Set the encoded form body.
    pub fn form_encoded(mut self, encoded: impl Into<String>) -> Self {
        self.body = encoded.into();
        self
    }

    fn build(self) -> Result<reqwest::Request> {
        let url = Url::parse(&self.url)?;
        let request = self
            .client
            .inner()
            .post(url)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(self.body)
            .build()?;
        Ok(request)
    }

    /// Send the request once. An error status is a response, not an error.
    pub async fn send(self) -> Result<Response> {
        let client = self.client;
        let request = self.build()?;
        client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_keeps_query_and_body_verbatim() {
        let client = HttpClient::new(Default::default()).unwrap();
        let request = client
            .post("https://sendgrid.com/api/mail.send.json?bcc[]=x%40example.com")
            .form_encoded("to[]=a%40x.com&to[]=b%40x.com")
            .build()
            .unwrap();

        assert_eq!(request.method(), &http::Method::POST);
        assert_eq!(request.url().query(), Some("bcc[]=x%40example.com"));
        assert_eq!(request.headers().get(CONTENT_TYPE).unwrap(), FORM_CONTENT_TYPE);
        assert_eq!(
            request.body().and_then(|body| body.as_bytes()),
            Some(&b"to[]=a%40x.com&to[]=b%40x.com"[..])
        );
    }

    #[test]
    fn test_relative_url_is_invalid() {
        let client = HttpClient::new(Default::default()).unwrap();
        let err = client.post("api/mail.send.json").build().unwrap_err();
        assert!(err.is_invalid_url());
    }
}
