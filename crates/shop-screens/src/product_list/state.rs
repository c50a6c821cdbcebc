//! Product list screen state.

use serde::Serialize;
use shop_commerce::catalog::{Category, ProductItem};
use shop_commerce::search::{PaginatedProducts, SortOption};

/// Error shown when a search query is too short.
pub const QUERY_TOO_SHORT: &str = "At least 3 characters.";

/// Minimum number of characters a search query needs.
pub const MIN_QUERY_LEN: usize = 3;

/// Progress of the search box.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum SearchState {
    /// No search active.
    #[default]
    Empty,
    Loading,
    NoResult,
    Loaded(Vec<ProductItem>),
}

/// Sort and category selection plus the filter sheet.
///
/// `selected_*` is what the sheet shows; `applied_*` is what the product
/// list was last fetched with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterState {
    pub selected_sort: SortOption,
    pub selected_category: Category,
    pub applied_sort: SortOption,
    pub applied_category: Category,
    pub categories: Vec<Category>,
    pub is_applied: bool,
    pub is_sheet_open: bool,
}

impl FilterState {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            selected_sort: SortOption::Default,
            selected_category: Category::all(),
            applied_sort: SortOption::Default,
            applied_category: Category::all(),
            categories,
            is_applied: false,
            is_sheet_open: false,
        }
    }

    /// Put every selection back to the defaults.
    pub(crate) fn reset_selection(&mut self) {
        self.selected_sort = SortOption::Default;
        self.selected_category = Category::all();
    }

    /// Whether the applied filter still fetches page by page.
    pub fn paginates(&self) -> bool {
        self.applied_sort.is_default() && self.applied_category.is_all()
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// Everything the product list shows once loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductListContent {
    pub products: Vec<ProductItem>,
    pub is_last_page: bool,
    pub total_products: u32,
    pub current_page: u32,
    pub page_loading: bool,
    pub query: String,
    pub query_error: Option<String>,
    pub search_state: SearchState,
    pub filter_state: FilterState,
}

impl ProductListContent {
    /// Content for a freshly loaded first page.
    pub fn new(first_page: PaginatedProducts, categories: Vec<Category>) -> Self {
        Self {
            products: first_page.products,
            is_last_page: first_page.is_last_page,
            total_products: first_page.total,
            current_page: 1,
            page_loading: false,
            query: String::new(),
            query_error: None,
            search_state: SearchState::Empty,
            filter_state: FilterState::new(categories),
        }
    }

    /// Products the screen should list: search results while a search
    /// has results, else the browsed catalog.
    pub fn visible_products(&self) -> &[ProductItem] {
        match &self.search_state {
            SearchState::Loaded(results) => results,
            _ => &self.products,
        }
    }

    pub(crate) fn clear_search(&mut self) {
        self.query.clear();
        self.query_error = None;
        self.search_state = SearchState::Empty;
    }
}
