//! Product list (catalog browsing) controller.

use super::state::{ProductListContent, SearchState, MIN_QUERY_LEN, QUERY_TOO_SHORT};
use crate::state::{StateCell, ViewState, GENERIC_ERROR};
use shop_commerce::catalog::Category;
use shop_commerce::repository::{CartRepository, CatalogRepository};
use shop_commerce::search::SortOption;
use std::sync::Arc;
use tokio::sync::watch;

/// Drives the product list: paging, search, sort and category filters.
///
/// Every event method is `async` and returns once its state transitions
/// are published. Events that arrive before the first page is loaded, or
/// after loading failed, do nothing.
pub struct ProductListController {
    repository: CatalogRepository,
    cart: Arc<CartRepository>,
    state: StateCell<ProductListContent>,
}

impl ProductListController {
    pub fn new(repository: CatalogRepository, cart: Arc<CartRepository>) -> Self {
        Self {
            repository,
            cart,
            state: StateCell::new(),
        }
    }

    pub fn state(&self) -> ViewState<ProductListContent> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<ProductListContent>> {
        self.state.subscribe()
    }

    /// Load categories and the first page together.
    ///
    /// A failed product fetch moves to `Error`; a failed category fetch
    /// only leaves the category list empty.
    pub async fn init(&self) {
        if !self.state.is_loading() {
            return;
        }

        if let Err(e) = self.cart.init().await {
            tracing::warn!(error = %e, "could not load cart item count");
        }

        let all_category = Category::all();
        let (categories, first_page) = tokio::join!(
            self.repository.get_categories(),
            self.repository.get_products(1, true, &all_category),
        );

        match first_page {
            Ok(page) => {
                let categories = categories.unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "could not fetch categories");
                    Vec::new()
                });
                tracing::debug!(total = page.total, "product list loaded");
                self.state
                    .replace(ViewState::Content(ProductListContent::new(page, categories)));
            }
            Err(e) => {
                tracing::error!(error = %e, "could not fetch products");
                self.state.replace(ViewState::Error(GENERIC_ERROR.to_string()));
            }
        }
    }

    /// Append the next page.
    ///
    /// Does nothing while a page is loading or when the last page is shown.
    /// If the fetch fails the page loader stays on and further calls are
    /// ignored.
    pub async fn load_more(&self) {
        let mut next_page = None;
        self.state.modify(|c| {
            if c.page_loading || c.is_last_page {
                return false;
            }
            if !c.filter_state.paginates() {
                // Filtered lists arrive whole.
                c.is_last_page = true;
                return true;
            }
            c.page_loading = true;
            next_page = Some(c.current_page + 1);
            true
        });
        let Some(page) = next_page else {
            return;
        };

        match self.repository.get_products(page, true, &Category::all()).await {
            Ok(result) => {
                self.state.update(|c| {
                    c.products.extend(result.products);
                    c.page_loading = false;
                    c.is_last_page = result.is_last_page;
                    c.current_page = page;
                    c.total_products = result.total;
                });
            }
            Err(e) => tracing::warn!(page, error = %e, "could not fetch next page"),
        }
    }

    /// Update the search box text.
    pub async fn query_change(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.update(|c| {
            if query.is_empty() {
                c.search_state = SearchState::Empty;
                c.is_last_page = false;
                c.query_error = None;
            }
            c.query = query;
        });
    }

    /// Search for the current query.
    ///
    /// Queries shorter than three characters only set the query error.
    pub async fn search(&self) {
        let Some((query, previous)) = self
            .state
            .read(|c| (c.query.clone(), c.search_state.clone()))
        else {
            return;
        };

        if query.chars().count() < MIN_QUERY_LEN {
            self.state
                .update(|c| c.query_error = Some(QUERY_TOO_SHORT.to_string()));
            return;
        }

        self.state.update(|c| c.search_state = SearchState::Loading);

        match self.repository.search_products(&query).await {
            Ok(results) => {
                tracing::debug!(query = %query, results = results.len(), "search finished");
                self.state.update(|c| {
                    c.search_state = if results.is_empty() {
                        SearchState::NoResult
                    } else {
                        SearchState::Loaded(results)
                    };
                    c.query_error = None;
                    c.is_last_page = true;
                });
            }
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "search failed");
                self.state.update(|c| {
                    if c.search_state == SearchState::Loading {
                        c.search_state = previous;
                    }
                });
            }
        }
    }

    /// Stage a sort option without fetching.
    pub async fn select_sort(&self, sort: SortOption) {
        self.state.update(|c| c.filter_state.selected_sort = sort);
    }

    /// Stage a category without fetching.
    pub async fn select_category(&self, category: Category) {
        self.state
            .update(|c| c.filter_state.selected_category = category);
    }

    /// Apply the staged sort and category and reload from page one.
    pub async fn apply_filters(&self) {
        let applied = self.state.update(|c| {
            let filters = &mut c.filter_state;
            filters.is_applied = true;
            filters.is_sheet_open = false;
            filters.applied_sort = filters.selected_sort;
            filters.applied_category = filters.selected_category.clone();
            c.clear_search();
            c.current_page = 1;
        });
        if applied.is_some() {
            self.reload().await;
        }
    }

    /// Back to the default sort and category.
    ///
    /// Reloads only when a filter had been applied; otherwise just the
    /// staged selection is reverted.
    pub async fn reset_filters(&self) {
        let was_applied = self.state.update(|c| {
            let filters = &mut c.filter_state;
            let was_applied = filters.is_applied;
            filters.reset_selection();
            filters.is_sheet_open = false;
            if was_applied {
                filters.applied_sort = SortOption::Default;
                filters.applied_category = Category::all();
                filters.is_applied = false;
                c.clear_search();
                c.current_page = 1;
            }
            was_applied
        });
        if was_applied == Some(true) {
            self.reload().await;
        }
    }

    pub async fn open_filters(&self) {
        self.state.update(|c| c.filter_state.is_sheet_open = true);
    }

    /// Close the filter sheet, dropping selections that were not applied.
    pub async fn dismiss_filters(&self) {
        self.state.update(|c| {
            let filters = &mut c.filter_state;
            filters.is_sheet_open = false;
            if filters.is_applied {
                filters.selected_sort = filters.applied_sort;
                filters.selected_category = filters.applied_category.clone();
            } else {
                filters.reset_selection();
            }
        });
    }

    async fn reload(&self) {
        let Some((sort, category)) = self.state.read(|c| {
            (
                c.filter_state.applied_sort,
                c.filter_state.applied_category.clone(),
            )
        }) else {
            return;
        };

        match self
            .repository
            .get_products(1, sort.is_default(), &category)
            .await
        {
            Ok(page) => {
                self.state.update(|c| {
                    c.products = sort.sorted(page.products);
                    c.is_last_page = page.is_last_page;
                    c.total_products = page.total;
                    c.current_page = 1;
                });
            }
            Err(e) => {
                tracing::error!(category = %category.value, error = %e, "could not fetch products");
                self.state.replace(ViewState::Error(GENERIC_ERROR.to_string()));
            }
        }
    }
}
