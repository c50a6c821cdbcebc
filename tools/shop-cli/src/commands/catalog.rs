//! Catalog browsing commands.

use anyhow::{bail, Result};
use serde_json::json;
use shop_commerce::catalog::Category;
use shop_screens::{
    ProductDetailController, ProductListContent, ProductListController, SearchState, ViewState,
};

use super::{ProductArgs, ProductsArgs, SearchArgs};
use crate::context::Context;
use crate::output::format_price;

/// Run the products command.
pub async fn products(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let services = ctx.services().await?;
    let list = ProductListController::new(services.catalog, services.cart);

    let spinner = ctx.output.spinner("Loading products...");
    list.init().await;
    let content = loaded(list.state())?;

    let category = match args.category {
        Some(ref slug) => Some(find_category(&content, slug, ctx)),
        None => None,
    };

    if !args.sort.is_default() || category.is_some() {
        spinner.set_message("Applying filters...");
        list.select_sort(args.sort).await;
        if let Some(category) = category {
            list.select_category(category).await;
        }
        list.apply_filters().await;
    }

    for _ in 1..args.pages {
        let before = list.state();
        if before.content().map_or(true, |c| c.is_last_page) {
            break;
        }
        spinner.set_message("Loading more...");
        list.load_more().await;
        if list.state().content().is_some_and(|c| c.page_loading) {
            ctx.output.warn("Could not load the next page");
            break;
        }
    }
    spinner.finish_and_clear();

    let content = loaded(list.state())?;

    if ctx.output.is_json() {
        ctx.output.json(&content);
        return Ok(());
    }

    let filters = &content.filter_state;
    ctx.output.header(&format!(
        "Products ({}, {})",
        filters.applied_category.name,
        filters.applied_sort.display_name()
    ));
    ctx.output.products(&content.products);
    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {} of {} product(s){}",
        content.products.len(),
        content.total_products,
        if content.is_last_page { "" } else { ", use --pages for more" }
    ));

    Ok(())
}

/// Run the search command.
pub async fn search(args: SearchArgs, ctx: &Context) -> Result<()> {
    let services = ctx.services().await?;
    let list = ProductListController::new(services.catalog, services.cart);

    let spinner = ctx.output.spinner(&format!("Searching for \"{}\"...", args.query));
    list.init().await;
    loaded(list.state())?;

    list.query_change(args.query.as_str()).await;
    if let Some(message) = list.state().content().and_then(|c| c.query_error.clone()) {
        spinner.finish_and_clear();
        bail!("{}", message);
    }

    list.search().await;
    spinner.finish_and_clear();

    let content = loaded(list.state())?;
    match content.search_state {
        SearchState::Loaded(ref results) => {
            if ctx.output.is_json() {
                ctx.output.json(results);
                return Ok(());
            }
            ctx.output.header(&format!("Results for \"{}\"", args.query));
            ctx.output.products(results);
            ctx.output.info("");
            ctx.output.info(&format!("{} result(s)", results.len()));
        }
        SearchState::NoResult => {
            if ctx.output.is_json() {
                ctx.output.json(&json!([]));
                return Ok(());
            }
            ctx.output.info(&format!("No products match \"{}\"", args.query));
        }
        SearchState::Empty | SearchState::Loading => bail!("Search failed"),
    }

    Ok(())
}

/// Run the categories command.
pub async fn categories(ctx: &Context) -> Result<()> {
    let services = ctx.services().await?;

    let spinner = ctx.output.spinner("Loading categories...");
    let result = services.catalog.get_categories().await;
    spinner.finish_and_clear();
    let categories = result?;

    if ctx.output.is_json() {
        ctx.output.json(&categories);
        return Ok(());
    }

    ctx.output.header("Categories");
    ctx.output.table_row(&["SLUG", "NAME"], &[24, 30]);
    for category in &categories {
        ctx.output
            .table_row(&[&category.value, &category.name], &[24, 30]);
    }

    Ok(())
}

/// Run the show command.
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let services = ctx.services().await?;
    let detail = ProductDetailController::new(args.id, services.catalog, services.cart);

    let spinner = ctx.output.spinner(&format!("Loading product {}...", args.id));
    detail.init().await;
    spinner.finish_and_clear();

    let content = match detail.state() {
        ViewState::Content(content) => content,
        ViewState::Error(message) => bail!("Product {}: {}", args.id, message),
        ViewState::Loading => bail!("Product {} did not load", args.id),
    };

    if ctx.output.is_json() {
        ctx.output.json(&content);
        return Ok(());
    }

    let product = &content.product;
    ctx.output.header(&product.title);
    if !product.description.is_empty() {
        ctx.output.info(&product.description);
    }
    ctx.output.kv("id", &product.id.to_string());
    if !product.brand.is_empty() {
        ctx.output.kv("brand", &product.brand);
    }
    ctx.output.kv("category", &product.category);
    ctx.output.kv("price", &format_price(product.price));
    if product.is_discounted() {
        ctx.output.kv(
            "discounted",
            &format!(
                "{} (-{}%)",
                format_price(product.discounted_price as f64),
                product.discount_percentage
            ),
        );
    }
    ctx.output.kv("rating", &format!("{:.2}", product.rating));
    ctx.output.kv("stock", &product.stock.to_string());
    ctx.output.kv("in cart", &product.quantity.to_string());
    ctx.output
        .kv("favorite", if product.is_favorite { "yes" } else { "no" });
    if !product.image().is_empty() {
        ctx.output.kv("image", product.image());
    }

    Ok(())
}

fn loaded(state: ViewState<ProductListContent>) -> Result<ProductListContent> {
    match state {
        ViewState::Content(content) => Ok(content),
        ViewState::Error(message) => bail!("Could not load products: {}", message),
        ViewState::Loading => bail!("Product list did not load"),
    }
}

/// Match `slug` against the fetched categories, falling back to a bare
/// slug when the category list is unavailable.
fn find_category(content: &ProductListContent, slug: &str, ctx: &Context) -> Category {
    if let Some(category) = content
        .filter_state
        .categories
        .iter()
        .find(|c| c.value.eq_ignore_ascii_case(slug))
    {
        return category.clone();
    }

    if !content.filter_state.categories.is_empty() {
        ctx.output.warn(&format!("Unknown category '{}'", slug));
    }
    if slug.eq_ignore_ascii_case(shop_commerce::catalog::ALL_CATEGORY) {
        Category::all()
    } else {
        Category::from_slug(slug)
    }
}
