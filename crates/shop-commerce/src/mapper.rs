//! Conversions between remote records, stored rows and presentation products.

use crate::catalog::{Product, ProductItem};
use crate::store::{CartLine, FavoriteRow};

impl From<Product> for ProductItem {
    fn from(product: Product) -> Self {
        let discounted_price = product.discounted_price();
        Self {
            id: product.id,
            title: product.title,
            description: product.description,
            brand: product.brand,
            category: product.category,
            price: product.price,
            discount_percentage: product.discount_percentage,
            discounted_price,
            rating: product.rating,
            stock: product.stock,
            thumbnail: product.thumbnail,
            images: product.images,
            quantity: 0,
            is_favorite: false,
        }
    }
}

impl From<CartLine> for ProductItem {
    fn from(line: CartLine) -> Self {
        stored_item(line.id, line.name, line.price, line.discount_price, line.image)
            .with_store_state(line.quantity, false)
    }
}

impl From<FavoriteRow> for ProductItem {
    fn from(row: FavoriteRow) -> Self {
        stored_item(row.id, row.name, row.price, row.discount_price, row.image)
            .with_store_state(0, true)
    }
}

fn stored_item(
    id: crate::ProductId,
    title: String,
    price: f64,
    discounted_price: i64,
    image: String,
) -> ProductItem {
    ProductItem {
        id,
        title,
        description: String::new(),
        brand: String::new(),
        category: String::new(),
        price,
        discount_percentage: 0.0,
        discounted_price,
        rating: 0.0,
        stock: 0,
        thumbnail: String::new(),
        images: if image.is_empty() { Vec::new() } else { vec![image] },
        quantity: 0,
        is_favorite: false,
    }
}

impl ProductItem {
    /// The cart row for this product, carrying its current quantity.
    pub fn to_cart_line(&self) -> CartLine {
        CartLine {
            id: self.id,
            name: self.title.clone(),
            quantity: self.quantity,
            price: self.price,
            discount_price: self.discounted_price,
            image: self.image().to_string(),
        }
    }

    /// The favorite row for this product.
    pub fn to_favorite_row(&self) -> FavoriteRow {
        FavoriteRow {
            id: self.id,
            name: self.title.clone(),
            price: self.price,
            discount_price: self.discounted_price,
            image: self.image().to_string(),
        }
    }
}
