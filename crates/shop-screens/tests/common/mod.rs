//! Shared fixtures: an in-memory catalog with call recording and failure injection.

#![allow(dead_code)]

use async_trait::async_trait;
use shop_commerce::catalog::{CatalogApi, CategoryRecord, Product, ProductsPage};
use shop_commerce::repository::{CartRepository, CatalogRepository};
use shop_commerce::store::Store;
use shop_commerce::{CommerceError, ProductId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Products { skip: u32, limit: u32 },
    Category { category: String, skip: u32, limit: u32 },
    ById(i64),
    Search(String),
    Categories,
}

#[derive(Default)]
pub struct FakeCatalog {
    pub products: Vec<Product>,
    pub categories: Vec<CategoryRecord>,
    calls: Mutex<Vec<Call>>,
    pub fail_products: AtomicBool,
    pub fail_categories: AtomicBool,
    pub fail_search: AtomicBool,
    pub fail_by_id: AtomicBool,
}

impl FakeCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        let mut categories: Vec<String> = products.iter().map(|p| p.category.clone()).collect();
        categories.sort();
        categories.dedup();
        Self {
            products,
            categories: categories.into_iter().map(CategoryRecord::Slug).collect(),
            ..Default::default()
        }
    }

    /// Twenty products. Even ids are discounted 10%; every third id is a phone.
    pub fn standard() -> Self {
        Self::new((1..=20).map(standard_product).collect())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| matches(c)).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn set_failing(flag: &AtomicBool, failing: bool) {
        flag.store(failing, Ordering::SeqCst);
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(flag: &AtomicBool) -> Result<(), CommerceError> {
        if flag.load(Ordering::SeqCst) {
            Err(CommerceError::FetchError("injected failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn page(products: Vec<Product>, skip: u32, limit: u32) -> ProductsPage {
        let total = products.len() as u32;
        let selected = if limit == 0 {
            products
        } else {
            products
                .into_iter()
                .skip(skip as usize)
                .take(limit as usize)
                .collect()
        };
        ProductsPage {
            products: selected,
            total,
            skip,
            limit,
        }
    }
}

#[async_trait]
impl CatalogApi for FakeCatalog {
    async fn get_products(&self, skip: u32, limit: u32) -> Result<ProductsPage, CommerceError> {
        self.record(Call::Products { skip, limit });
        Self::check(&self.fail_products)?;
        Ok(Self::page(self.products.clone(), skip, limit))
    }

    async fn get_products_by_category(
        &self,
        category: &str,
        skip: u32,
        limit: u32,
    ) -> Result<ProductsPage, CommerceError> {
        self.record(Call::Category {
            category: category.to_string(),
            skip,
            limit,
        });
        Self::check(&self.fail_products)?;
        let matching = self
            .products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect();
        Ok(Self::page(matching, skip, limit))
    }

    async fn get_product_by_id(&self, id: ProductId) -> Result<Product, CommerceError> {
        self.record(Call::ById(id.get()));
        Self::check(&self.fail_by_id)?;
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(CommerceError::ProductNotFound(id))
    }

    async fn search_products(&self, query: &str) -> Result<ProductsPage, CommerceError> {
        self.record(Call::Search(query.to_string()));
        Self::check(&self.fail_search)?;
        let needle = query.to_lowercase();
        let matching = self
            .products
            .iter()
            .filter(|p| p.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        Ok(Self::page(matching, 0, 0))
    }

    async fn get_categories(&self) -> Result<Vec<CategoryRecord>, CommerceError> {
        self.record(Call::Categories);
        Self::check(&self.fail_categories)?;
        Ok(self.categories.clone())
    }
}

pub fn product(id: i64, title: &str, price: f64, discount_percentage: f64, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_string(),
        description: format!("Description of {title}"),
        brand: "Acme".to_string(),
        category: category.to_string(),
        price,
        discount_percentage,
        rating: 4.0,
        stock: 50,
        thumbnail: format!("https://cdn.example/{id}/thumb.png"),
        images: vec![format!("https://cdn.example/{id}/1.png")],
    }
}

fn standard_product(id: i64) -> Product {
    let discount = if id % 2 == 0 { 10.0 } else { 0.0 };
    let category = if id % 3 == 0 { "phones" } else { "laptops" };
    product(id, &format!("Product {id:02}"), 10.0 * id as f64, discount, category)
}

pub struct Harness {
    pub api: Arc<FakeCatalog>,
    pub store: Store,
    pub catalog: CatalogRepository,
    pub cart: Arc<CartRepository>,
}

impl Harness {
    pub fn new(api: FakeCatalog) -> Self {
        Self::with_store(api, Store::in_memory().unwrap())
    }

    pub fn with_store(api: FakeCatalog, store: Store) -> Self {
        let api = Arc::new(api);
        let catalog = CatalogRepository::new(api.clone(), store.clone());
        let cart = Arc::new(CartRepository::new(store.clone()));
        Self {
            api,
            store,
            catalog,
            cart,
        }
    }

    pub fn ids(products: &[shop_commerce::catalog::ProductItem]) -> Vec<i64> {
        products.iter().map(|p| p.id.get()).collect()
    }
}
