//! Product list screen.

mod controller;
mod state;

pub use controller::ProductListController;
pub use state::{
    FilterState, ProductListContent, SearchState, MIN_QUERY_LEN, QUERY_TOO_SHORT,
};
