//! Checkout screen.

use crate::cart::CartContent;
use crate::state::{StateCell, ViewState, GENERIC_ERROR};
use shop_commerce::repository::CartRepository;
use std::sync::Arc;
use tokio::sync::watch;

/// Checkout screen controller: shows the cart totals and empties the cart
/// on proceed.
pub struct CheckoutController {
    cart: Arc<CartRepository>,
    state: StateCell<CartContent>,
}

impl CheckoutController {
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

    pub async fn init(&self) {
        match self.cart.get_cart_products().await {
            Ok(products) => self.state.replace(ViewState::Content(CartContent::new(products))),
            Err(e) => {
                tracing::error!(error = %e, "could not load checkout");
                self.state.replace(ViewState::Error(GENERIC_ERROR.to_string()));
            }
        }
    }

    /// Place the order by emptying the cart. Returns whether the cart was emptied.
    pub async fn proceed(&self) -> bool {
        match self.cart.empty_cart().await {
            Ok(()) => {
                tracing::info!("checkout completed");
                self.state.replace(ViewState::Content(CartContent::default()));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not empty cart");
                false
            }
        }
    }
}
