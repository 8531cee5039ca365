//! Transport seam between the request pipeline and the network.
//!
//! `HttpTransport` sends requests with reqwest. Tests substitute their own
//! `Transport` to record requests and replay canned responses.

use std::future::Future;

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::config::ClientConfig;

/// An outgoing request, path relative to the API base (e.g. `/checklists`).
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Attach a JSON body.
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A fully read response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Parse the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Body as text, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends one request and returns the raw response.
///
/// Only network-level failures are errors here; every status code,
/// including 401, comes back as `Ok` for the pipeline to interpret.
pub trait Transport {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ApiError>> + Send;
}

/// reqwest-backed transport rooted at `{server_url}{api_prefix}`.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Build a transport for the given configuration.
    ///
    /// The client keeps a cookie store so session cookies issued by the
    /// backend ride along on later requests.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self
            .client
            .request(request.method, &url)
            .headers(request.headers);

        if let Some(body) = request.body {
            builder = builder.body(serde_json::to_vec(&body)?);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builders() {
        let req = ApiRequest::put("/checklists/1/reorder").json(serde_json::json!({"itemIds": [2, 1]}));
        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.path, "/checklists/1/reorder");
        assert!(req.headers.is_empty());
        assert!(req.body.is_some());
    }

    #[test]
    fn test_response_json_and_text() {
        let resp = ApiResponse::new(StatusCode::OK, r#"{"id": 1, "name": "Groceries"}"#);
        let value: serde_json::Value = resp.json().unwrap();
        assert_eq!(value["name"], "Groceries");

        let bad = ApiResponse::new(StatusCode::OK, "not json");
        assert!(matches!(bad.json::<serde_json::Value>(), Err(ApiError::Decode(_))));
        assert_eq!(bad.text(), "not json");
    }

    #[test]
    fn test_http_transport_base_url() {
        let config = ClientConfig::new("http://localhost:8080/");
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8080/api");
    }
}
