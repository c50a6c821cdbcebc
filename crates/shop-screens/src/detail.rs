//! Product detail screen.

use crate::state::{StateCell, ViewState, GENERIC_ERROR};
use serde::Serialize;
use shop_commerce::catalog::ProductItem;
use shop_commerce::repository::{CartRepository, CatalogRepository};
use shop_commerce::ProductId;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailContent {
    pub product: ProductItem,
}

/// Controller for one product's detail screen.
pub struct ProductDetailController {
    product_id: ProductId,
    repository: CatalogRepository,
    cart: Arc<CartRepository>,
    state: StateCell<DetailContent>,
}

impl ProductDetailController {
    pub fn new(
        product_id: ProductId,
        repository: CatalogRepository,
        cart: Arc<CartRepository>,
    ) -> Self {
        Self {
            product_id,
            repository,
            cart,
            state: StateCell::new(),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn state(&self) -> ViewState<DetailContent> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<DetailContent>> {
        self.state.subscribe()
    }

    pub async fn init(&self) {
        match self.repository.get_product_by_id(self.product_id).await {
            Ok(product) => self.state.replace(ViewState::Content(DetailContent { product })),
            Err(e) => {
                tracing::error!(product_id = %self.product_id, error = %e, "could not load product");
                self.state.replace(ViewState::Error(GENERIC_ERROR.to_string()));
            }
        }
    }

    /// Flip the favorite flag at once, then persist it.
    ///
    /// The flag is flipped back if the store write fails.
    pub async fn toggle_favorite(&self) {
        let Some(product) = self.state.update(|c| {
            c.product.is_favorite = !c.product.is_favorite;
            c.product.clone()
        }) else {
            return;
        };

        let result = if product.is_favorite {
            self.repository.add_favorite(&product).await
        } else {
            self.repository.delete_favorite(product.id).await
        };

        if let Err(e) = result {
            tracing::warn!(product_id = %product.id, error = %e, "could not update favorite");
            self.state
                .update(|c| c.product.is_favorite = !product.is_favorite);
        }
    }

    /// Put one more unit in the cart.
    pub async fn add_to_cart(&self) {
        let Some(product) = self.state.read(|c| c.product.clone()) else {
            return;
        };

        match self.cart.increase_quantity(&product).await {
            Ok(quantity) => {
                self.state.update(|c| c.product.quantity = quantity);
            }
            Err(e) => tracing::warn!(product_id = %product.id, error = %e, "could not add to cart"),
        }
    }

    /// Take one unit out of the cart.
    pub async fn remove_from_cart(&self) {
        if !self.state.has_content() {
            return;
        }

        match self.cart.decrease_quantity(self.product_id).await {
            Ok(remaining) => {
                self.state
                    .update(|c| c.product.quantity = remaining.unwrap_or(0));
            }
            Err(e) => tracing::warn!(product_id = %self.product_id, error = %e, "could not remove from cart"),
        }
    }
}
