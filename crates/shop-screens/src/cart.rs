//! Cart screen.

use crate::state::{StateCell, ViewState, GENERIC_ERROR};
use serde::Serialize;
use shop_commerce::cart::{list, CartTotals};
use shop_commerce::catalog::ProductItem;
use shop_commerce::repository::CartRepository;
use shop_commerce::ProductId;
use std::sync::Arc;
use tokio::sync::watch;

/// Cart lines and their totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartContent {
    pub products: Vec<ProductItem>,
    pub totals: CartTotals,
}

impl CartContent {
    pub fn new(products: Vec<ProductItem>) -> Self {
        let totals = CartTotals::from_items(&products);
        Self { products, totals }
    }

    fn recalculate(&mut self) {
        self.totals = CartTotals::from_items(&self.products);
    }
}

/// Cart screen controller.
///
/// Quantity changes are written to the store first; the shown list is
/// then patched in place rather than reloaded.
pub struct CartController {
    cart: Arc<CartRepository>,
    state: StateCell<CartContent>,
}

impl CartController {
    pub fn new(cart: Arc<CartRepository>) -> Self {
        Self {
            cart,
            state: StateCell::new(),
        }
    }

    pub fn state(&self) -> ViewState<CartContent> {
        self.state.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<CartContent>> {
        self.state.subscribe()
    }

    /// Load the cart.
    pub async fn init(&self) {
        match self.cart.get_cart_products().await {
            Ok(products) => self.state.replace(ViewState::Content(CartContent::new(products))),
            Err(e) => {
                tracing::error!(error = %e, "could not load cart");
                self.state.replace(ViewState::Error(GENERIC_ERROR.to_string()));
            }
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
                self.state.update(|c| {
                    list::set_quantity(&mut c.products, id, quantity);
                    c.recalculate();
                });
            }
            Err(e) => tracing::warn!(product_id = %id, error = %e, "could not increase quantity"),
        }
    }

    /// Remove one unit; the line disappears when its quantity reaches zero
    /// or when the row is already gone from the store.
    pub async fn decrease_quantity(&self, id: ProductId) {
        if !self.state.has_content() {
            return;
        }

        match self.cart.decrease_quantity(id).await {
            Ok(remaining) => {
                self.state.update(|c| {
                    list::set_or_remove(&mut c.products, id, remaining.unwrap_or(0));
                    c.recalculate();
                });
            }
            Err(e) => tracing::warn!(product_id = %id, error = %e, "could not decrease quantity"),
        }
    }

    pub async fn remove(&self, id: ProductId) {
        if !self.state.has_content() {
            return;
        }

        match self.cart.remove_product(id).await {
            Ok(()) => {
                self.state.update(|c| {
                    list::remove_product(&mut c.products, id);
                    c.recalculate();
                });
            }
            Err(e) => tracing::warn!(product_id = %id, error = %e, "could not remove cart line"),
        }
    }
}
