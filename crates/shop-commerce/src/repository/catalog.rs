//! Catalog queries enriched with local cart and favorite state.

use crate::catalog::{CatalogApi, Category, Product, ProductItem};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::search::{PageWindow, PaginatedProducts, DEFAULT_PAGE_SIZE};
use crate::store::Store;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Combines the remote catalog with the local store.
///
/// Remote failures propagate unchanged; nothing is retried.
#[derive(Clone)]
pub struct CatalogRepository {
    api: Arc<dyn CatalogApi>,
    store: Store,
    page_size: u32,
}

impl CatalogRepository {
    pub fn new(api: Arc<dyn CatalogApi>, store: Store) -> Self {
        Self {
            api,
            store,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Use `page_size` products per page instead of the default.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Fetch one page of products.
    ///
    /// Pagination is turned off when `category` is not "All" or when
    /// `use_pagination` is false; the full result set then counts as the
    /// last page.
    pub async fn get_products(
        &self,
        page: u32,
        use_pagination: bool,
        category: &Category,
    ) -> Result<PaginatedProducts, CommerceError> {
        let window = PageWindow::new(page, self.page_size, use_pagination && category.is_all());
        tracing::debug!(
            page = window.page,
            limit = window.limit(),
            category = %category.value,
            "loading products"
        );

        let response = if category.is_all() {
            self.api.get_products(window.skip(), window.limit()).await?
        } else {
            self.api
                .get_products_by_category(&category.value, window.skip(), window.limit())
                .await?
        };

        let products = self.merge(response.products).await?;
        Ok(PaginatedProducts {
            products,
            is_last_page: window.is_last_page(response.total),
            total: response.total,
        })
    }

    pub async fn get_product_by_id(&self, id: ProductId) -> Result<ProductItem, CommerceError> {
        let product = self.api.get_product_by_id(id).await?;
        let (cart, favorite) = self
            .store
            .run(move |s| Ok((s.cart_line(id)?, s.favorite(id)?)))
            .await?;

        Ok(ProductItem::from(product).with_store_state(
            cart.map(|line| line.quantity).unwrap_or(0),
            favorite.is_some(),
        ))
    }

    pub async fn search_products(&self, query: &str) -> Result<Vec<ProductItem>, CommerceError> {
        tracing::debug!(query, "searching products");
        let response = self.api.search_products(query).await?;
        self.merge(response.products).await
    }

    pub async fn get_categories(&self) -> Result<Vec<Category>, CommerceError> {
        let records = self.api.get_categories().await?;
        Ok(records.into_iter().map(Category::from).collect())
    }

    /// Favorites with their current cart quantity.
    pub async fn get_favorites(&self) -> Result<Vec<ProductItem>, CommerceError> {
        let (rows, quantities) = self
            .store
            .run(|s| Ok((s.favorites()?, s.cart_quantities()?)))
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let quantity = quantities.get(&row.id).copied().unwrap_or(0);
                ProductItem::from(row).with_store_state(quantity, true)
            })
            .collect())
    }

    pub async fn add_favorite(&self, product: &ProductItem) -> Result<(), CommerceError> {
        let row = product.to_favorite_row();
        tracing::debug!(product_id = %row.id, "adding favorite");
        self.store.run(move |s| s.add_favorite(&row)).await
    }

    pub async fn delete_favorite(&self, id: ProductId) -> Result<(), CommerceError> {
        tracing::debug!(product_id = %id, "deleting favorite");
        self.store.run(move |s| s.delete_favorite(id)).await?;
        Ok(())
    }

    async fn merge(&self, products: Vec<Product>) -> Result<Vec<ProductItem>, CommerceError> {
        let (quantities, favorites): (HashMap<ProductId, u32>, HashSet<ProductId>) = self
            .store
            .run(|s| Ok((s.cart_quantities()?, s.favorite_ids()?)))
            .await?;

        Ok(products
            .into_iter()
            .map(|product| {
                let id = product.id;
                ProductItem::from(product).with_store_state(
                    quantities.get(&id).copied().unwrap_or(0),
                    favorites.contains(&id),
                )
            })
            .collect())
    }
}
