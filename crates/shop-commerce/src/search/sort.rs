//! Client-side product sorting.

use crate::catalog::ProductItem;
use serde::{Deserialize, Serialize};

/// Sort options for product lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOption {
    /// Keep the catalog's order.
    #[default]
    Default,
    /// Sort by title A-Z.
    NameAsc,
    /// Sort by title Z-A.
    NameDesc,
    /// Sort by discounted price, low to high.
    PriceAsc,
    /// Sort by discounted price, high to low.
    PriceDesc,
}

impl SortOption {
    /// Every option, in the order the filter sheet lists them.
    pub const ALL: [SortOption; 5] = [
        SortOption::Default,
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Default => "Default",
            SortOption::NameAsc => "Alphabetically A-Z",
            SortOption::NameDesc => "Alphabetically Z-A",
            SortOption::PriceAsc => "Price low to high",
            SortOption::PriceDesc => "Price high to low",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Default => "default",
            SortOption::NameAsc => "name-asc",
            SortOption::NameDesc => "name-desc",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Check if this is the catalog's own order.
    pub fn is_default(&self) -> bool {
        *self == SortOption::Default
    }

    /// Sort `products` in place.
    ///
    /// The sort is stable: products with equal keys keep their input order.
    /// Titles compare case-sensitively.
    pub fn apply(&self, products: &mut [ProductItem]) {
        match self {
            SortOption::Default => {}
            SortOption::NameAsc => products.sort_by(|a, b| a.title.cmp(&b.title)),
            SortOption::NameDesc => products.sort_by(|a, b| b.title.cmp(&a.title)),
            SortOption::PriceAsc => products.sort_by_key(|p| p.discounted_price),
            SortOption::PriceDesc => {
                products.sort_by(|a, b| b.discounted_price.cmp(&a.discounted_price))
            }
        }
    }

    /// Return a sorted copy of `products`.
    pub fn sorted(&self, mut products: Vec<ProductItem>) -> Vec<ProductItem> {
        self.apply(&mut products);
        products
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::item;

    fn ids(products: &[ProductItem]) -> Vec<i64> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_price_high_to_low() {
        let products = vec![item(1, "a", 100), item(2, "b", 300), item(3, "c", 200)];
        let sorted = SortOption::PriceDesc.sorted(products);
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
    }

    #[test]
    fn test_price_low_to_high() {
        let products = vec![item(1, "a", 100), item(2, "b", 300), item(3, "c", 200)];
        let sorted = SortOption::PriceAsc.sorted(products);
        assert_eq!(ids(&sorted), vec![1, 3, 2]);
    }

    #[test]
    fn test_default_keeps_order() {
        let products = vec![item(3, "c", 1), item(1, "a", 3), item(2, "b", 2)];
        let sorted = SortOption::Default.sorted(products);
        assert_eq!(ids(&sorted), vec![3, 1, 2]);
    }

    #[test]
    fn test_title_sort_is_case_sensitive() {
        let products = vec![item(1, "apple", 0), item(2, "Banana", 0), item(3, "Apple", 0)];
        assert_eq!(ids(&SortOption::NameAsc.sorted(products.clone())), vec![3, 2, 1]);
        assert_eq!(ids(&SortOption::NameDesc.sorted(products)), vec![1, 2, 3]);
    }

    #[test]
    fn test_sorts_are_stable() {
        let products = vec![
            item(1, "same", 50),
            item(2, "same", 50),
            item(3, "other", 10),
            item(4, "same", 50),
        ];
        for option in SortOption::ALL {
            let sorted = option.sorted(products.clone());
            let equal: Vec<i64> = sorted
                .iter()
                .filter(|p| p.title == "same")
                .map(|p| p.id.get())
                .collect();
            assert_eq!(equal, vec![1, 2, 4], "{option:?} reordered equal keys");
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(SortOption::from_str("price-desc"), Some(SortOption::PriceDesc));
        assert_eq!(SortOption::from_str("NAME-ASC"), Some(SortOption::NameAsc));
        assert_eq!(SortOption::from_str("rating"), None);
    }

    #[test]
    fn test_display_names() {
        let names: Vec<&str> = SortOption::ALL.iter().map(|s| s.display_name()).collect();
        assert_eq!(
            names,
            vec![
                "Default",
                "Alphabetically A-Z",
                "Alphabetically Z-A",
                "Price low to high",
                "Price high to low"
            ]
        );
    }
}
