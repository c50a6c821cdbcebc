//! Screen state controllers for the shopfront.
//!
//! One controller per screen. Each owns a [`StateCell`] holding a
//! [`ViewState`] snapshot that subscribers observe; controllers never
//! return errors, they publish them as state.
//!
//! # Example
//!
//! ```rust,ignore
//! use shop_screens::ProductListController;
//!
//! let list = ProductListController::new(catalog, cart);
//! let mut states = list.subscribe();
//!
//! list.init().await;
//! list.select_sort(SortOption::PriceDesc).await;
//! list.apply_filters().await;
//! ```

pub mod cart;
pub mod checkout;
pub mod detail;
pub mod favorites;
pub mod product_list;
pub mod state;

pub use cart::{CartContent, CartController};
pub use checkout::CheckoutController;
pub use detail::{DetailContent, ProductDetailController};
pub use favorites::{FavoritesContent, FavoritesController};
pub use product_list::{
    FilterState, ProductListContent, ProductListController, SearchState, QUERY_TOO_SHORT,
};
pub use state::{StateCell, ViewState, GENERIC_ERROR};
