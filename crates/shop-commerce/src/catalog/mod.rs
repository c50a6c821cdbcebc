//! Product catalog module.
//!
//! Contains the remote records, the presentation product, categories and
//! the catalog client.

mod api;
mod category;
mod product;

pub use api::{CatalogApi, HttpCatalogApi, DEFAULT_BASE_URL};
pub use category::{Category, CategoryRecord, ALL_CATEGORY};
pub use product::{discounted_price, Product, ProductItem, ProductsPage};
