//! Cart queries and the live cart item count.

use crate::catalog::ProductItem;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::store::{CartWrite, Store};
use shop_db::DbError;
use tokio::sync::{watch, Mutex};

/// Cart access shared by every screen.
///
/// After each mutation the total number of units in the cart is
/// republished to subscribers of [`CartRepository::subscribe_total_items`].
/// The count comes from the same transaction as the write, and writes
/// through one repository publish in the order they were applied.
#[derive(Debug)]
pub struct CartRepository {
    store: Store,
    total_items: watch::Sender<u32>,
    writes: Mutex<()>,
}

impl CartRepository {
    pub fn new(store: Store) -> Self {
        let (total_items, _) = watch::channel(0);
        Self {
            store,
            total_items,
            writes: Mutex::new(()),
        }
    }

    /// Load the current item count from the store.
    pub async fn init(&self) -> Result<(), CommerceError> {
        let _writes = self.writes.lock().await;
        let total = self.store.run(|s| s.total_items()).await?;
        self.total_items.send_replace(total);
        Ok(())
    }

    /// The last published item count.
    pub fn total_items(&self) -> u32 {
        *self.total_items.borrow()
    }

    /// Observe the item count.
    pub fn subscribe_total_items(&self) -> watch::Receiver<u32> {
        self.total_items.subscribe()
    }

    pub async fn get_cart_products(&self) -> Result<Vec<ProductItem>, CommerceError> {
        let lines = self.store.run(|s| s.cart_lines()).await?;
        Ok(lines.into_iter().map(ProductItem::from).collect())
    }

    pub async fn get_cart_product(&self, id: ProductId) -> Result<Option<ProductItem>, CommerceError> {
        let line = self.store.run(move |s| s.cart_line(id)).await?;
        Ok(line.map(ProductItem::from))
    }

    /// Add one unit of `product`. Returns the new quantity.
    pub async fn increase_quantity(&self, product: &ProductItem) -> Result<u32, CommerceError> {
        let line = product.to_cart_line();
        tracing::debug!(product_id = %line.id, "increasing cart quantity");
        self.write(move |s| s.increase_quantity(&line)).await
    }

    /// Remove one unit of `id`, deleting the line at zero.
    ///
    /// Returns the remaining quantity, or `None` if `id` was not in the cart.
    pub async fn decrease_quantity(&self, id: ProductId) -> Result<Option<u32>, CommerceError> {
        tracing::debug!(product_id = %id, "decreasing cart quantity");
        self.write(move |s| s.decrease_quantity(id)).await
    }

    pub async fn remove_product(&self, id: ProductId) -> Result<(), CommerceError> {
        tracing::debug!(product_id = %id, "removing cart line");
        self.write(move |s| s.delete_cart_line(id)).await?;
        Ok(())
    }

    pub async fn empty_cart(&self) -> Result<(), CommerceError> {
        let removed = self.write(|s| s.empty_cart()).await?;
        tracing::debug!(removed, "emptied cart");
        Ok(())
    }

    /// Apply one cart write and publish the count it produced.
    ///
    /// The lock spans the store call and the send, so a slower write can
    /// never overwrite the count of a later one.
    async fn write<T, F>(&self, f: F) -> Result<T, CommerceError>
    where
        F: FnOnce(&Store) -> Result<CartWrite<T>, DbError> + Send + 'static,
        T: Send + 'static,
    {
        let _writes = self.writes.lock().await;
        let write = self.store.run(f).await?;
        self.total_items.send_replace(write.total_items);
        Ok(write.value)
    }
}
