//! HTTP client utilities for the shopfront catalog.
//!
//! A thin builder API over `reqwest` with automatic JSON handling. Every
//! request is fully buffered into a [`Response`] before it is handed back.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_data::FetchClient;
//!
//! let client = FetchClient::new().with_base_url("https://dummyjson.com");
//! let page: serde_json::Value = client
//!     .get("/products")
//!     .query("skip", 0)
//!     .query("limit", 8)
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;

use std::collections::HashMap;
use std::time::Duration;

pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;

/// HTTP client for making outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client without a request timeout.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
        }
    }

    /// Create a client whose requests fail with [`FetchError::Timeout`] after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: None,
            default_headers: HashMap::new(),
        })
    }

    /// Create a client with a base URL that will be prepended to all requests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let full_url = self.resolve_url(url.into());

        let mut builder = RequestBuilder::new(full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            http: self.http.clone(),
            builder,
        }
    }

    fn resolve_url(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Append a percent-encoded path segment.
    pub fn segment(mut self, value: impl ToString) -> Self {
        self.builder = self.builder.segment(value);
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.builder = self.builder.query(key, value);
        self
    }

    /// The request as built so far.
    pub fn request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let url = self.builder.build_url()?;
        tracing::debug!(%url, "sending request");

        let mut request = self.http.get(url);
        for (key, value) in &self.builder.headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request.send().await?;
        Response::from_reqwest(response).await
    }
}
