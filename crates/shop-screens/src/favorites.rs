//! Favorites screen.

use crate::state::{StateCell, ViewState, GENERIC_ERROR};
use serde::Serialize;
use shop_commerce::cart::list;
use shop_commerce::catalog::ProductItem;
use shop_commerce::repository::{CartRepository, CatalogRepository};
use shop_commerce::ProductId;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FavoritesContent {
    pub products: Vec<ProductItem>,
}

/// Favorites screen controller.
pub struct FavoritesController {
    repository: CatalogRepository,
    cart: Arc<CartRepository>,
    state: StateCell<FavoritesContent>,
}

impl FavoritesController {
    pub fn new(repository: CatalogRepository, cart: Arc<CartRepository>) -> Self {
        Self {
            repository,
            cart,
            state: StateCell::new(),
        }
    }

    pub fn state(&self) -> ViewState<FavoritesContent> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<FavoritesContent>> {
        self.state.subscribe()
    }

    pub async fn init(&self) {
        match self.repository.get_favorites().await {
            Ok(products) => self
                .state
                .replace(ViewState::Content(FavoritesContent { products })),
            Err(e) => {
                tracing::error!(error = %e, "could not load favorites");
                self.state.replace(ViewState::Error(GENERIC_ERROR.to_string()));
            }
        }
    }

    pub async fn remove_favorite(&self, id: ProductId) {
        if !self.state.has_content() {
            return;
        }

        match self.repository.delete_favorite(id).await {
            Ok(()) => {
                self.state.update(|c| list::remove_product(&mut c.products, id));
            }
            Err(e) => tracing::warn!(product_id = %id, error = %e, "could not remove favorite"),
        }
    }

    pub async fn increase_quantity(&self, id: ProductId) {
        let Some(Some(product)) = self
            .state
            .read(|c| c.products.iter().find(|p| p.id == id).cloned())
        else {
            return;
        };

        match self.cart.increase_quantity(&product).await {
            Ok(quantity) => {
                self.state
                    .update(|c| list::set_quantity(&mut c.products, id, quantity));
            }
            Err(e) => tracing::warn!(product_id = %id, error = %e, "could not add to cart"),
        }
    }

    /// Remove one unit from the cart. The favorite stays listed at zero.
    pub async fn decrease_quantity(&self, id: ProductId) {
        if !self.state.has_content() {
            return;
        }

        match self.cart.decrease_quantity(id).await {
            Ok(remaining) => {
                self.state
                    .update(|c| list::set_quantity(&mut c.products, id, remaining.unwrap_or(0)));
            }
            Err(e) => tracing::warn!(product_id = %id, error = %e, "could not remove from cart"),
        }
    }
}
