//! Cart and checkout controllers against an in-memory store.

mod common;

use common::{FakeCatalog, Harness};
use shop_commerce::cart::CartTotals;
use shop_commerce::repository::CartRepository;
use shop_commerce::ProductId;
use shop_screens::{
    CartContent, CartController, CheckoutController, ProductDetailController, ViewState,
};
use std::sync::Arc;

fn cart_content(cart: &CartController) -> CartContent {
    match cart.state() {
        ViewState::Content(content) => content,
        other => panic!("expected content, got {other:?}"),
    }
}

async fn add(h: &Harness, id: i64, times: usize) {
    let item = h.catalog.get_product_by_id(ProductId::new(id)).await.unwrap();
    for _ in 0..times {
        h.cart.increase_quantity(&item).await.unwrap();
    }
}

#[tokio::test]
async fn test_increase_creates_row_and_decrease_from_one_removes_it() {
    let h = Harness::new(FakeCatalog::standard());
    let detail = ProductDetailController::new(ProductId::new(5), h.catalog.clone(), h.cart.clone());
    detail.init().await;

    assert!(h.store.cart_line(ProductId::new(5)).unwrap().is_none());
    detail.add_to_cart().await;
    let row = h.store.cart_line(ProductId::new(5)).unwrap().unwrap();
    assert_eq!(row.quantity, 1);

    let cart = CartController::new(h.cart.clone());
    cart.init().await;
    assert_eq!(cart_content(&cart).products.len(), 1);

    cart.decrease_quantity(ProductId::new(5)).await;
    assert!(h.store.cart_line(ProductId::new(5)).unwrap().is_none());
    let c = cart_content(&cart);
    assert!(c.products.is_empty());
    assert_eq!(c.totals, CartTotals::default());
}

#[tokio::test]
async fn test_cart_totals_follow_quantity_changes() {
    let h = Harness::new(FakeCatalog::standard());
    // id 2: price 20, discounted 18. id 3: price 30, not discounted.
    add(&h, 2, 2).await;
    add(&h, 3, 1).await;

    let cart = CartController::new(h.cart.clone());
    cart.init().await;

    let c = cart_content(&cart);
    assert_eq!(c.totals.total_price, 70.0);
    assert_eq!(c.totals.total, 36.0);
    assert_eq!(c.totals.total_discount, 34.0);

    cart.increase_quantity(ProductId::new(2)).await;
    let c = cart_content(&cart);
    assert_eq!(c.products[0].quantity, 3);
    assert_eq!(c.totals.total_price, 90.0);
    assert_eq!(h.store.cart_line(ProductId::new(2)).unwrap().unwrap().quantity, 3);

    cart.remove(ProductId::new(3)).await;
    let c = cart_content(&cart);
    assert_eq!(c.products.len(), 1);
    assert_eq!(c.totals.total_price, 60.0);
    assert_eq!(h.cart.total_items(), 3);
}

#[tokio::test]
async fn test_decrease_above_one_keeps_line() {
    let h = Harness::new(FakeCatalog::standard());
    add(&h, 4, 3).await;
    let cart = CartController::new(h.cart.clone());
    cart.init().await;

    cart.decrease_quantity(ProductId::new(4)).await;

    assert_eq!(cart_content(&cart).products[0].quantity, 2);
    assert_eq!(h.store.cart_line(ProductId::new(4)).unwrap().unwrap().quantity, 2);
}

#[tokio::test]
async fn test_cart_events_before_init_are_ignored() {
    let h = Harness::new(FakeCatalog::standard());
    add(&h, 1, 1).await;
    let cart = CartController::new(h.cart.clone());

    cart.decrease_quantity(ProductId::new(1)).await;
    cart.remove(ProductId::new(1)).await;

    assert!(cart.state().is_loading());
    assert_eq!(h.store.total_items().unwrap(), 1);
}

#[tokio::test]
async fn test_increase_unknown_line_is_ignored() {
    let h = Harness::new(FakeCatalog::standard());
    let cart = CartController::new(h.cart.clone());
    cart.init().await;

    cart.increase_quantity(ProductId::new(9)).await;

    assert!(cart_content(&cart).products.is_empty());
    assert_eq!(h.store.total_items().unwrap(), 0);
}

#[tokio::test]
async fn test_checkout_shows_totals_and_proceed_empties_cart() {
    let h = Harness::new(FakeCatalog::standard());
    add(&h, 2, 1).await;
    add(&h, 6, 2).await;
    let mut badge = h.cart.subscribe_total_items();
    assert_eq!(*badge.borrow_and_update(), 3);

    let checkout = CheckoutController::new(h.cart.clone());
    checkout.init().await;
    let c = match checkout.state() {
        ViewState::Content(c) => c,
        other => panic!("expected content, got {other:?}"),
    };
    // 20 + 2 * 60 list; 18 + 2 * 54 payable.
    assert_eq!(c.totals.total_price, 140.0);
    assert_eq!(c.totals.total, 126.0);

    assert!(checkout.proceed().await);

    assert_eq!(checkout.state(), ViewState::Content(CartContent::default()));
    assert!(h.store.cart_lines().unwrap().is_empty());
    assert!(badge.has_changed().unwrap());
    assert_eq!(*badge.borrow(), 0);
}

#[tokio::test]
async fn test_decrease_after_row_deleted_elsewhere_drops_line() {
    let h = Harness::new(FakeCatalog::standard());
    add(&h, 4, 3).await;
    add(&h, 5, 1).await;
    let cart = CartController::new(h.cart.clone());
    cart.init().await;

    // Another screen empties line 4 while this one still shows it at 3.
    h.cart.remove_product(ProductId::new(4)).await.unwrap();
    cart.decrease_quantity(ProductId::new(4)).await;

    let c = cart_content(&cart);
    assert_eq!(Harness::ids(&c.products), vec![5]);
    assert_eq!(c.totals.total_price, 50.0);
    assert_eq!(h.cart.total_items(), 1);
}

#[tokio::test]
async fn test_quantity_changes_show_stored_quantity() {
    let h = Harness::new(FakeCatalog::standard());
    add(&h, 4, 1).await;
    let cart = CartController::new(h.cart.clone());
    cart.init().await;

    // Two more units land from elsewhere after the cart was loaded.
    add(&h, 4, 2).await;
    cart.increase_quantity(ProductId::new(4)).await;
    assert_eq!(cart_content(&cart).products[0].quantity, 4);

    cart.decrease_quantity(ProductId::new(4)).await;
    assert_eq!(cart_content(&cart).products[0].quantity, 3);
    assert_eq!(h.store.cart_line(ProductId::new(4)).unwrap().unwrap().quantity, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_screens_do_not_lose_increments() {
    let h = Harness::new(FakeCatalog::standard());
    let item = h.catalog.get_product_by_id(ProductId::new(7)).await.unwrap();
    let mut badge = h.cart.subscribe_total_items();

    // Detail screens and direct repository calls race on the same product id.
    let details: Vec<_> = (0..4)
        .map(|_| {
            Arc::new(ProductDetailController::new(
                ProductId::new(7),
                h.catalog.clone(),
                h.cart.clone(),
            ))
        })
        .collect();
    for detail in &details {
        detail.init().await;
    }

    let mut tasks = Vec::new();
    for detail in &details {
        let detail = Arc::clone(detail);
        tasks.push(tokio::spawn(async move {
            for _ in 0..10 {
                detail.add_to_cart().await;
            }
        }));
    }
    for _ in 0..4 {
        let cart = h.cart.clone();
        let item = item.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..10 {
                cart.increase_quantity(&item).await.unwrap();
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    let row = h.store.cart_line(ProductId::new(7)).unwrap().unwrap();
    assert_eq!(row.quantity, 80);
    assert_eq!(h.cart.total_items(), 80);
    assert_eq!(*badge.borrow_and_update(), 80);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_repositories_on_one_store_keep_every_increment() {
    let h = Harness::new(FakeCatalog::standard());
    let item = h.catalog.get_product_by_id(ProductId::new(3)).await.unwrap();
    let other = Arc::new(CartRepository::new(h.store.clone()));

    let tasks: Vec<_> = [h.cart.clone(), other.clone()]
        .into_iter()
        .map(|cart| {
            let item = item.clone();
            tokio::spawn(async move {
                for _ in 0..50 {
                    cart.increase_quantity(&item).await.unwrap();
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(h.store.cart_line(ProductId::new(3)).unwrap().unwrap().quantity, 100);
    other.init().await.unwrap();
    assert_eq!(other.total_items(), 100);
}
