//! Sorting and pagination.

mod pagination;
mod sort;

pub use pagination::{PageWindow, PaginatedProducts, DEFAULT_PAGE_SIZE};
pub use sort::SortOption;
