//! Cart totals.

use crate::catalog::ProductItem;
use serde::{Deserialize, Serialize};

/// Totals derived from a list of cart products.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct CartTotals {
    /// Σ price × quantity.
    pub total_price: f64,
    /// `total_price` minus the payable total.
    pub total_discount: f64,
    /// Σ discounted price × quantity.
    pub total: f64,
}

impl CartTotals {
    pub fn from_items(items: &[ProductItem]) -> Self {
        let total_price: f64 = items.iter().map(|p| p.price * p.quantity as f64).sum();
        let total: f64 = items
            .iter()
            .map(|p| (p.discounted_price * p.quantity as i64) as f64)
            .sum();
        Self {
            total_price,
            total_discount: total_price - total,
            total,
        }
    }

    /// Total number of units across all lines.
    pub fn item_count(items: &[ProductItem]) -> u32 {
        items.iter().map(|p| p.quantity).sum()
    }
}
