//! Repositories used by the screens.

mod cart;
mod catalog;

pub use cart::CartRepository;
pub use catalog::CatalogRepository;
