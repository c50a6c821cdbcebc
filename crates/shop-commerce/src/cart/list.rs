//! In-place patches for product lists held by screens.
//!
//! Screens apply these after a successful store write instead of reloading,
//! using the quantity the store reports back.

use crate::catalog::ProductItem;
use crate::ids::ProductId;

/// Show `quantity` for `id`. Returns `false` if `id` is not listed.
pub fn set_quantity(items: &mut [ProductItem], id: ProductId, quantity: u32) -> bool {
    match items.iter_mut().find(|p| p.id == id) {
        Some(item) => {
            item.quantity = quantity;
            true
        }
        None => false,
    }
}

/// Like [`set_quantity`], but a zero quantity drops the entry.
pub fn set_or_remove(items: &mut Vec<ProductItem>, id: ProductId, quantity: u32) -> bool {
    if quantity == 0 {
        remove_product(items, id)
    } else {
        set_quantity(items, id, quantity)
    }
}

/// Drop `id` from the list.
pub fn remove_product(items: &mut Vec<ProductItem>, id: ProductId) -> bool {
    let before = items.len();
    items.retain(|p| p.id != id);
    items.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::item;

    fn list() -> Vec<ProductItem> {
        let mut a = item(1, "a", 10);
        a.quantity = 1;
        let mut b = item(2, "b", 20);
        b.quantity = 3;
        vec![a, b]
    }

    #[test]
    fn test_set_quantity() {
        let mut items = list();
        assert!(set_quantity(&mut items, ProductId::new(1), 4));
        assert_eq!(items[0].quantity, 4);
        assert!(set_quantity(&mut items, ProductId::new(1), 0));
        assert_eq!(items.len(), 2);
        assert!(!set_quantity(&mut items, ProductId::new(9), 1));
    }

    #[test]
    fn test_set_or_remove() {
        let mut items = list();
        set_or_remove(&mut items, ProductId::new(2), 2);
        assert_eq!(items[1].quantity, 2);
        set_or_remove(&mut items, ProductId::new(1), 0);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ProductId::new(2));
        assert!(!set_or_remove(&mut items, ProductId::new(1), 0));
    }

    #[test]
    fn test_remove() {
        let mut items = list();
        assert!(remove_product(&mut items, ProductId::new(1)));
        assert!(!remove_product(&mut items, ProductId::new(1)));
        assert_eq!(items.len(), 1);
    }
}
