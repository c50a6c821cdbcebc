//! Cart table operations.

use super::Store;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use shop_db::{params, Conn, DbError};
use std::collections::HashMap;

/// A persisted cart row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    /// Units in the cart. Rows are deleted rather than kept at zero.
    pub quantity: u32,
    pub price: f64,
    pub discount_price: i64,
    pub image: String,
}

/// The result of a cart write and the item count it left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartWrite<T> {
    pub value: T,
    pub total_items: u32,
}

#[derive(Deserialize)]
struct Quantity {
    quantity: u32,
}

#[derive(Deserialize)]
struct Total {
    total: i64,
}

impl Store {
    /// All cart rows.
    pub fn cart_lines(&self) -> Result<Vec<CartLine>, DbError> {
        self.db().query_as(
            "SELECT id, name, quantity, price, discount_price, image FROM cart",
            params![],
        )
    }

    /// The cart row for `id`, if any.
    pub fn cart_line(&self, id: ProductId) -> Result<Option<CartLine>, DbError> {
        self.db().query_optional(
            "SELECT id, name, quantity, price, discount_price, image FROM cart WHERE id = ?",
            params![id],
        )
    }

    /// Add one unit of `line.id`, inserting the row at quantity 1 if absent.
    ///
    /// The stored name, prices and image come from `line` only on insert.
    pub fn increase_quantity(&self, line: &CartLine) -> Result<CartWrite<u32>, DbError> {
        self.db().transaction(|tx| {
            tx.execute(
                "INSERT INTO cart (id, name, quantity, price, discount_price, image)
                 VALUES (?, ?, 1, ?, ?, ?)
                 ON CONFLICT(id) DO UPDATE SET quantity = quantity + 1",
                params![
                    line.id,
                    line.name.as_str(),
                    line.price,
                    line.discount_price,
                    line.image.as_str()
                ],
            )?;
            let row: Quantity =
                tx.query_one("SELECT quantity FROM cart WHERE id = ?", params![line.id])?;
            written(tx, row.quantity)
        })
    }

    /// Remove one unit of `id`. The row is deleted instead of reaching zero.
    ///
    /// The value is the remaining quantity, or `None` if `id` was not in the cart.
    pub fn decrease_quantity(&self, id: ProductId) -> Result<CartWrite<Option<u32>>, DbError> {
        self.db().transaction(|tx| {
            let current: Option<Quantity> =
                tx.query_optional("SELECT quantity FROM cart WHERE id = ?", params![id])?;
            let remaining = match current {
                None => None,
                Some(Quantity { quantity }) if quantity <= 1 => {
                    tx.execute("DELETE FROM cart WHERE id = ?", params![id])?;
                    Some(0)
                }
                Some(Quantity { quantity }) => {
                    tx.execute(
                        "UPDATE cart SET quantity = quantity - 1 WHERE id = ?",
                        params![id],
                    )?;
                    Some(quantity - 1)
                }
            };
            written(tx, remaining)
        })
    }

    /// Delete the cart row for `id`. The value tells whether a row existed.
    pub fn delete_cart_line(&self, id: ProductId) -> Result<CartWrite<bool>, DbError> {
        self.db().transaction(|tx| {
            let deleted = tx.execute("DELETE FROM cart WHERE id = ?", params![id])? > 0;
            written(tx, deleted)
        })
    }

    /// Delete every cart row. The value is the number of rows removed.
    pub fn empty_cart(&self) -> Result<CartWrite<usize>, DbError> {
        self.db().transaction(|tx| {
            let removed = tx.execute("DELETE FROM cart", params![])?;
            written(tx, removed)
        })
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> Result<u32, DbError> {
        self.db().with_conn(count_items)
    }

    /// Quantity per product id.
    pub fn cart_quantities(&self) -> Result<HashMap<ProductId, u32>, DbError> {
        Ok(self
            .cart_lines()?
            .into_iter()
            .map(|line| (line.id, line.quantity))
            .collect())
    }
}

fn count_items(conn: &Conn<'_>) -> Result<u32, DbError> {
    let row: Total =
        conn.query_one("SELECT COALESCE(SUM(quantity), 0) AS total FROM cart", params![])?;
    u32::try_from(row.total).map_err(|e| DbError::TypeError(e.to_string()))
}

fn written<T>(tx: &Conn<'_>, value: T) -> Result<CartWrite<T>, DbError> {
    Ok(CartWrite {
        value,
        total_items: count_items(tx)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::line;

    #[test]
    fn test_increase_creates_row_at_one() {
        let store = Store::in_memory().unwrap();
        assert_eq!(store.increase_quantity(&line(5, 0)).unwrap().value, 1);

        let row = store.cart_line(ProductId::new(5)).unwrap().unwrap();
        assert_eq!(row.quantity, 1);
        assert_eq!(row.name, "product 5");
    }

    #[test]
    fn test_increase_existing_row() {
        let store = Store::in_memory().unwrap();
        store.increase_quantity(&line(5, 0)).unwrap();
        let write = store.increase_quantity(&line(5, 0)).unwrap();
        assert_eq!(write, CartWrite { value: 2, total_items: 2 });
        assert_eq!(store.cart_lines().unwrap().len(), 1);
    }

    #[test]
    fn test_decrease_from_one_removes_row() {
        let store = Store::in_memory().unwrap();
        store.increase_quantity(&line(5, 0)).unwrap();

        assert_eq!(
            store.decrease_quantity(ProductId::new(5)).unwrap(),
            CartWrite { value: Some(0), total_items: 0 }
        );
        assert!(store.cart_line(ProductId::new(5)).unwrap().is_none());
    }

    #[test]
    fn test_decrease_above_one() {
        let store = Store::in_memory().unwrap();
        store.increase_quantity(&line(5, 0)).unwrap();
        store.increase_quantity(&line(5, 0)).unwrap();

        assert_eq!(store.decrease_quantity(ProductId::new(5)).unwrap().value, Some(1));
        assert_eq!(store.total_items().unwrap(), 1);
    }

    #[test]
    fn test_decrease_missing_row() {
        let store = Store::in_memory().unwrap();
        assert_eq!(store.decrease_quantity(ProductId::new(5)).unwrap().value, None);
    }

    #[test]
    fn test_totals_and_quantities() {
        let store = Store::in_memory().unwrap();
        store.increase_quantity(&line(1, 0)).unwrap();
        store.increase_quantity(&line(2, 0)).unwrap();
        store.increase_quantity(&line(2, 0)).unwrap();

        assert_eq!(store.total_items().unwrap(), 3);
        let quantities = store.cart_quantities().unwrap();
        assert_eq!(quantities.get(&ProductId::new(2)), Some(&2));
    }

    #[test]
    fn test_delete_and_empty() {
        let store = Store::in_memory().unwrap();
        store.increase_quantity(&line(1, 0)).unwrap();
        store.increase_quantity(&line(2, 0)).unwrap();

        assert_eq!(
            store.delete_cart_line(ProductId::new(1)).unwrap(),
            CartWrite { value: true, total_items: 1 }
        );
        assert!(!store.delete_cart_line(ProductId::new(1)).unwrap().value);
        assert_eq!(
            store.empty_cart().unwrap(),
            CartWrite { value: 1, total_items: 0 }
        );
        assert_eq!(store.total_items().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_increases_are_not_lost() {
        let store = Store::in_memory().unwrap();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| store.increase_quantity(&line(4, 0)).unwrap().total_items)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut totals: Vec<u32> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        totals.sort_unstable();

        // Every write saw a distinct count, one more than the write before it.
        assert_eq!(totals, (1..=200).collect::<Vec<u32>>());
        let row = store.cart_line(ProductId::new(4)).unwrap().unwrap();
        assert_eq!(row.quantity, 200);
    }
}
