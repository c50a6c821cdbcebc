//! Cart commands.

use std::sync::Arc;

use anyhow::{bail, Result};
use shop_commerce::repository::CartRepository;
use shop_commerce::ProductId;
use shop_screens::{CartContent, CartController, ProductDetailController, ViewState};

use super::{CartArgs, CartCommand};
use crate::context::{Context, Services};

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let services = ctx.services().await?;

    match args.command {
        Some(CartCommand::Show) | None => show_cart(services.cart, ctx).await,
        Some(CartCommand::Add { id }) => add(id, services, ctx).await,
        Some(CartCommand::Decrease { id }) => decrease(id, services, ctx).await,
        Some(CartCommand::Remove { id }) => remove(id, services, ctx).await,
    }
}

async fn show_cart(cart: Arc<CartRepository>, ctx: &Context) -> Result<()> {
    let cart = CartController::new(cart);
    cart.init().await;
    let content = loaded(cart.state())?;
    print_cart(&content, ctx);
    Ok(())
}

async fn add(id: ProductId, services: Services, ctx: &Context) -> Result<()> {
    let detail = ProductDetailController::new(id, services.catalog, services.cart.clone());

    let spinner = ctx.output.spinner(&format!("Loading product {}...", id));
    detail.init().await;
    spinner.finish_and_clear();

    let Some(before) = detail.state().content().map(|c| c.product.quantity) else {
        bail!("Product {} could not be loaded", id);
    };

    detail.add_to_cart().await;

    let Some(product) = detail.state().content().map(|c| c.product.clone()) else {
        bail!("Product {} could not be loaded", id);
    };
    if product.quantity == before {
        bail!("Could not add '{}' to the cart", product.title);
    }

    ctx.output.success(&format!(
        "Added '{}' ({} in cart, {} item(s) total)",
        product.title,
        product.quantity,
        services.cart.total_items()
    ));
    show_cart(services.cart, ctx).await
}

async fn decrease(id: ProductId, services: Services, ctx: &Context) -> Result<()> {
    let cart = CartController::new(services.cart);
    cart.init().await;
    let before = loaded(cart.state())?;
    let Some(line) = before.products.iter().find(|p| p.id == id) else {
        bail!("Product {} is not in the cart", id);
    };

    cart.decrease_quantity(id).await;
    let after = loaded(cart.state())?;
    if after == before {
        bail!("Could not update '{}'", line.title);
    }

    match after.products.iter().find(|p| p.id == id) {
        Some(p) => ctx.output.success(&format!("'{}' now at {}", p.title, p.quantity)),
        None => ctx.output.success(&format!("Removed '{}'", line.title)),
    }
    print_cart(&after, ctx);
    Ok(())
}

async fn remove(id: ProductId, services: Services, ctx: &Context) -> Result<()> {
    let cart = CartController::new(services.cart);
    cart.init().await;
    let before = loaded(cart.state())?;
    let Some(line) = before.products.iter().find(|p| p.id == id) else {
        bail!("Product {} is not in the cart", id);
    };

    cart.remove(id).await;
    let after = loaded(cart.state())?;
    if after.products.iter().any(|p| p.id == id) {
        bail!("Could not remove '{}'", line.title);
    }

    ctx.output.success(&format!("Removed '{}'", line.title));
    print_cart(&after, ctx);
    Ok(())
}

pub(crate) fn loaded(state: ViewState<CartContent>) -> Result<CartContent> {
    match state {
        ViewState::Content(content) => Ok(content),
        ViewState::Error(message) => bail!("Could not load cart: {}", message),
        ViewState::Loading => bail!("Cart did not load"),
    }
}

fn print_cart(content: &CartContent, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(content);
        return;
    }

    if content.products.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    ctx.output.header("Cart");
    ctx.output.products(&content.products);
    ctx.output.info("");
    ctx.output.totals(&content.totals);
}
