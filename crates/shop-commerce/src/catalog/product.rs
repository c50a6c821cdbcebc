//! Product records and the presentation product.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as returned by the remote catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub brand: String,
    /// Category slug.
    #[serde(default)]
    pub category: String,
    /// List price.
    pub price: f64,
    /// Discount in percent, `0.0` when not discounted.
    #[serde(default)]
    pub discount_percentage: f64,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Product {
    /// The price after discount, rounded to a whole unit.
    pub fn discounted_price(&self) -> i64 {
        discounted_price(self.price, self.discount_percentage)
    }
}

/// `round(price * (100 - discount) / 100)`, or `0` when there is no discount.
pub fn discounted_price(price: f64, discount_percentage: f64) -> i64 {
    if discount_percentage == 0.0 {
        0
    } else {
        (price * (100.0 - discount_percentage) / 100.0).round() as i64
    }
}

/// One page of catalog results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductsPage {
    pub products: Vec<Product>,
    /// Total number of matching products on the server.
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub skip: u32,
    #[serde(default)]
    pub limit: u32,
}

/// A product as shown on screen.
///
/// Carries the catalog fields plus the cart quantity and favorite flag
/// merged in from the local store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductItem {
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub brand: String,
    pub category: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub discounted_price: i64,
    pub rating: f64,
    pub stock: i64,
    pub thumbnail: String,
    pub images: Vec<String>,
    /// Quantity of this product in the cart.
    pub quantity: u32,
    pub is_favorite: bool,
}

impl ProductItem {
    /// First image, falling back to the thumbnail.
    pub fn image(&self) -> &str {
        self.images
            .first()
            .map(String::as_str)
            .unwrap_or(&self.thumbnail)
    }

    /// Whether the product is sold below its list price.
    pub fn is_discounted(&self) -> bool {
        self.discounted_price > 0
    }

    /// Copy with a different cart quantity and favorite flag.
    pub fn with_store_state(mut self, quantity: u32, is_favorite: bool) -> Self {
        self.quantity = quantity;
        self.is_favorite = is_favorite;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discounted_price_rounds() {
        assert_eq!(discounted_price(549.0, 12.96), 478);
        assert_eq!(discounted_price(100.0, 10.0), 90);
        assert_eq!(discounted_price(9.99, 10.0), 9);
    }

    #[test]
    fn test_no_discount_is_zero() {
        assert_eq!(discounted_price(549.0, 0.0), 0);
    }

    #[test]
    fn test_product_decodes_with_missing_fields() {
        let json = r#"{
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "price": 9.99,
            "discountPercentage": 7.17,
            "tags": ["beauty"],
            "thumbnail": "https://cdn.dummyjson.com/thumb.png"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.brand, "");
        assert!(product.images.is_empty());
        assert_eq!(product.discounted_price(), 9);
    }

    #[test]
    fn test_page_decodes() {
        let json = r#"{"products": [], "total": 194, "skip": 8, "limit": 8}"#;
        let page: ProductsPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 194);
        assert_eq!(page.skip, 8);
    }
}
