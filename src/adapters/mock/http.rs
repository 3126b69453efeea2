//! Mock HTTP client for testing.
//!
//! Provides a configurable mock HTTP client that can return predefined
//! responses or errors for testing purposes.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{FilePart, Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method
    pub method: String,
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body (JSON requests) or a multipart field summary
    pub body: Option<String>,
}

impl RecordedRequest {
    /// The Authorization header value, if any.
    pub fn auth_header(&self) -> Option<&str> {
        self.headers.get("Authorization").map(String::as_str)
    }
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a successful response
    Success(Response),
    /// Return an error
    Error(HttpError),
}

impl MockResponse {
    /// Shorthand for a JSON body response.
    pub fn json(status: u16, body: &str) -> Self {
        MockResponse::Success(Response::new(status, bytes::Bytes::from(body.to_string())))
    }
}

/// Mock HTTP client for testing.
///
/// Responses are keyed by `(method, url)` with exact match first and
/// prefix match as a fallback, so one entry can cover a family of URLs
/// (`DELETE /api/favoritos` matches `/api/favoritos/7`). Every request
/// is recorded for verification.
///
/// # Example
///
/// ```ignore
/// use pluma::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response("GET", "http://x/api/publicacoes", MockResponse::json(200, "[]"));
///
/// let response = client.get("http://x/api/publicacoes", &Headers::new()).await?;
/// assert_eq!(response.status, 200);
/// assert_eq!(client.requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Configured responses by (method, url-prefix)
    responses: Arc<Mutex<HashMap<(String, String), MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a method + URL. The URL matches exactly or as
    /// a prefix of the requested URL.
    pub fn set_response(&self, method: &str, url: &str, response: MockResponse) {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), url.to_string()), response);
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record(&self, method: &str, url: &str, headers: &Headers, body: Option<String>) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        });
    }

    fn response_for(&self, method: &str, url: &str) -> Result<Response, HttpError> {
        let responses = self.responses.lock().unwrap();

        let exact = responses.get(&(method.to_string(), url.to_string())).cloned();
        let found = exact.or_else(|| {
            responses
                .iter()
                .find(|((m, prefix), _)| m == method && url.starts_with(prefix.as_str()))
                .map(|(_, r)| r.clone())
        });

        match found {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!(
                "No mock response for {} {}",
                method, url
            ))),
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record("GET", url, headers, None);
        self.response_for("GET", url)
    }

    async fn post(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record("POST", url, headers, Some(body.to_string()));
        self.response_for("POST", url)
    }

    async fn put(&self, url: &str, body: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record("PUT", url, headers, Some(body.to_string()));
        self.response_for("PUT", url)
    }

    async fn delete(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.record("DELETE", url, headers, None);
        self.response_for("DELETE", url)
    }

    async fn post_multipart(
        &self,
        url: &str,
        fields: &[(String, String)],
        file: FilePart,
        headers: &Headers,
    ) -> Result<Response, HttpError> {
        let summary = fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .chain(std::iter::once(format!(
                "{}=@{}({} bytes)",
                file.name,
                file.filename,
                file.data.len()
            )))
            .collect::<Vec<_>>()
            .join("&");
        self.record("POST", url, headers, Some(summary));
        self.response_for("POST", url)
    }
}
