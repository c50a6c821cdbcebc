//! Remote catalog client.

use crate::catalog::{CategoryRecord, Product, ProductsPage};
use crate::error::CommerceError;
use crate::ids::ProductId;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use shop_data::{ClientRequestBuilder, FetchClient, FetchError};
use std::time::Duration;

/// Default catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";

/// Calls against the remote product catalog.
///
/// A `limit` of `0` asks for every matching product.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /products?skip&limit`
    async fn get_products(&self, skip: u32, limit: u32) -> Result<ProductsPage, CommerceError>;

    /// `GET /products/category/{category}?skip&limit`
    async fn get_products_by_category(
        &self,
        category: &str,
        skip: u32,
        limit: u32,
    ) -> Result<ProductsPage, CommerceError>;

    /// `GET /products/{id}`
    async fn get_product_by_id(&self, id: ProductId) -> Result<Product, CommerceError>;

    /// `GET /products/search?q`
    async fn search_products(&self, query: &str) -> Result<ProductsPage, CommerceError>;

    /// `GET /products/categories`
    async fn get_categories(&self) -> Result<Vec<CategoryRecord>, CommerceError>;
}

/// [`CatalogApi`] over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: FetchClient,
}

impl HttpCatalogApi {
    /// Create a client for `base_url`, with an optional per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, CommerceError> {
        let client = match timeout {
            Some(timeout) => FetchClient::with_timeout(timeout)?,
            None => FetchClient::new(),
        };
        Ok(Self::with_client(client.with_base_url(base_url)))
    }

    /// Wrap an already configured fetch client.
    pub fn with_client(client: FetchClient) -> Self {
        Self {
            client: client.with_default_header("Accept", "application/json"),
        }
    }

    fn page(&self, path: &str, skip: u32, limit: u32) -> ClientRequestBuilder {
        self.client.get(path).query("skip", skip).query("limit", limit)
    }

    async fn get_json<T: DeserializeOwned>(request: ClientRequestBuilder) -> Result<T, FetchError> {
        request.send().await?.error_for_status()?.json()
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogApi {
    async fn get_products(&self, skip: u32, limit: u32) -> Result<ProductsPage, CommerceError> {
        tracing::debug!(skip, limit, "fetching products");
        Ok(Self::get_json(self.page("/products", skip, limit)).await?)
    }

    async fn get_products_by_category(
        &self,
        category: &str,
        skip: u32,
        limit: u32,
    ) -> Result<ProductsPage, CommerceError> {
        tracing::debug!(category, skip, limit, "fetching products by category");
        let request = self.page("/products/category", skip, limit).segment(category);
        Ok(Self::get_json(request).await?)
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Product, CommerceError> {
        tracing::debug!(product_id = %id, "fetching product");
        match Self::get_json(self.client.get("/products").segment(id)).await {
            Ok(product) => Ok(product),
            Err(FetchError::HttpError { status: 404, .. }) => Err(CommerceError::ProductNotFound(id)),
            Err(e) => Err(e.into()),
        }
    }

    async fn search_products(&self, query: &str) -> Result<ProductsPage, CommerceError> {
        tracing::debug!(query, "searching products");
        Ok(Self::get_json(self.client.get("/products/search").query("q", query)).await?)
    }

    async fn get_categories(&self) -> Result<Vec<CategoryRecord>, CommerceError> {
        tracing::debug!("fetching categories");
        Ok(Self::get_json(self.client.get("/products/categories")).await?)
    }
}
