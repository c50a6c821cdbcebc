//! Page windows over the remote catalog.

use crate::catalog::ProductItem;
use serde::{Deserialize, Serialize};

/// Default number of products per page.
pub const DEFAULT_PAGE_SIZE: u32 = 8;

/// The slice of the catalog one request asks for.
///
/// A page size of `0` means the whole result set is fetched at once and
/// treated as a single page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageWindow {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page, `0` when not paginating.
    pub page_size: u32,
}

impl PageWindow {
    /// Create a window. `paginate = false` disables paging.
    pub fn new(page: u32, page_size: u32, paginate: bool) -> Self {
        Self {
            page: page.max(1),
            page_size: if paginate { page_size } else { 0 },
        }
    }

    /// Whether the window is paginated.
    pub fn is_paginated(&self) -> bool {
        self.page_size > 0
    }

    /// Number of items to skip.
    pub fn skip(&self) -> u32 {
        (self.page - 1) * self.page_size
    }

    /// Value for the `limit` query parameter.
    pub fn limit(&self) -> u32 {
        self.page_size
    }

    /// `page > ceil(total / page_size)` when paginated, else always `true`.
    pub fn is_last_page(&self, total: u32) -> bool {
        if !self.is_paginated() {
            return true;
        }
        self.page > total.div_ceil(self.page_size)
    }
}

/// A page of presentation products.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaginatedProducts {
    pub products: Vec<ProductItem>,
    pub is_last_page: bool,
    /// Total number of matching products on the server.
    pub total: u32,
}
