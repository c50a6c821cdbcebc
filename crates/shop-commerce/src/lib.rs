//! Catalog, cart and favorites domain logic for the shopfront.
//!
//! - **Catalog**: remote product records, categories, the catalog client
//! - **Search**: client-side sorting and page windows
//! - **Store**: persisted cart and favorite tables
//! - **Repository**: catalog queries merged with local cart/favorite state,
//!   and cart access with a live item count
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_commerce::catalog::{Category, HttpCatalogApi, DEFAULT_BASE_URL};
//! use shop_commerce::repository::CatalogRepository;
//! use shop_commerce::search::SortOption;
//! use shop_commerce::store::Store;
//! use std::sync::Arc;
//!
//! let api = Arc::new(HttpCatalogApi::new(DEFAULT_BASE_URL, None)?);
//! let store = Store::open("shop.db")?;
//! let catalog = CatalogRepository::new(api, store.clone());
//!
//! let page = catalog.get_products(1, true, &Category::all()).await?;
//! let sorted = SortOption::PriceDesc.sorted(page.products);
//! ```

pub mod error;
pub mod ids;
pub mod mapper;

pub mod cart;
pub mod catalog;
pub mod repository;
pub mod search;
pub mod store;

pub use error::CommerceError;
pub use ids::ProductId;
