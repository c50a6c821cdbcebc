//! HTTP request builder.

use crate::FetchError;
use reqwest::Url;
use std::collections::HashMap;

/// A builder for constructing GET requests.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) url: String,
    pub(crate) segments: Vec<String>,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: HashMap<String, String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            segments: Vec::new(),
            query: Vec::new(),
            headers: HashMap::new(),
        }
    }

    /// Append one path segment. `/`, spaces and other reserved characters
    /// are percent-encoded when the URL is built.
    pub fn segment(mut self, value: impl ToString) -> Self {
        self.segments.push(value.to_string());
        self
    }

    /// Append a query parameter. Values are percent-encoded when the URL is built.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a header to the request.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Resolve the final URL including path segments and the query string.
    pub fn build_url(&self) -> Result<Url, FetchError> {
        let mut url =
            Url::parse(&self.url).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.url, e)))?;

        if !self.segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl(format!("{}: cannot hold a path", self.url)))?
                .pop_if_empty()
                .extend(&self.segments);
        }
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }
}
