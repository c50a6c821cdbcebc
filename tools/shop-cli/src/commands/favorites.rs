//! Favorite commands.

use anyhow::{bail, Result};
use shop_screens::{FavoritesController, ProductDetailController, ViewState};

use super::ProductArgs;
use crate::context::Context;

/// Run the favorite command: flip the favorite flag of one product.
pub async fn toggle(args: ProductArgs, ctx: &Context) -> Result<()> {
    let services = ctx.services().await?;
    let detail = ProductDetailController::new(args.id, services.catalog, services.cart);

    let spinner = ctx.output.spinner(&format!("Loading product {}...", args.id));
    detail.init().await;

    let before = match detail.state() {
        ViewState::Content(content) => content.product.is_favorite,
        ViewState::Error(message) => {
            spinner.finish_and_clear();
            bail!("Product {}: {}", args.id, message)
        }
        ViewState::Loading => {
            spinner.finish_and_clear();
            bail!("Product {} did not load", args.id)
        }
    };

    detail.toggle_favorite().await;
    spinner.finish_and_clear();

    let Some(content) = detail.state().content().cloned() else {
        bail!("Product {} did not load", args.id);
    };
    let product = &content.product;
    if product.is_favorite == before {
        bail!("Could not update favorite for '{}'", product.title);
    }

    if ctx.output.is_json() {
        ctx.output.json(&content);
    } else if product.is_favorite {
        ctx.output.success(&format!("Added '{}' to favorites", product.title));
    } else {
        ctx.output
            .success(&format!("Removed '{}' from favorites", product.title));
    }

    Ok(())
}

/// Run the favorites command.
pub async fn list(ctx: &Context) -> Result<()> {
    let services = ctx.services().await?;
    let favorites = FavoritesController::new(services.catalog, services.cart);

    favorites.init().await;
    let content = match favorites.state() {
        ViewState::Content(content) => content,
        ViewState::Error(message) => bail!("Could not load favorites: {}", message),
        ViewState::Loading => bail!("Favorites did not load"),
    };

    if ctx.output.is_json() {
        ctx.output.json(&content);
        return Ok(());
    }

    if content.products.is_empty() {
        ctx.output.info("No favorites yet.");
        ctx.output.info("Run `shop favorite <id>` to add one.");
        return Ok(());
    }

    ctx.output.header("Favorites");
    ctx.output.products(&content.products);

    Ok(())
}
