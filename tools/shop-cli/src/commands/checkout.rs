//! Checkout command.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use serde_json::json;
use shop_commerce::cart::CartTotals;
use shop_screens::CheckoutController;

use super::cart::loaded;
use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let services = ctx.services().await?;
    let checkout = CheckoutController::new(services.cart.clone());

    checkout.init().await;
    let content = loaded(checkout.state())?;

    if content.products.is_empty() {
        if ctx.output.is_json() {
            ctx.output.json(&json!({ "completed": false, "reason": "empty cart" }));
        }
        ctx.output.info("Your cart is empty, nothing to check out.");
        return Ok(());
    }

    let items = CartTotals::item_count(&content.products);
    ctx.output.header("Checkout");
    ctx.output.kv("items", &items.to_string());
    ctx.output.totals(&content.totals);

    if !args.yes {
        if ctx.output.is_json() {
            bail!("Confirmation required: pass --yes with --json");
        }

        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt("Place the order?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let completed = checkout.proceed().await;
    spinner.finish_and_clear();

    if !completed {
        bail!("Could not complete checkout");
    }

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "completed": true,
            "items": items,
            "totals": content.totals,
            "cart_items": services.cart.total_items(),
        }));
        return Ok(());
    }

    ctx.output.success("Order placed, your cart is now empty");

    Ok(())
}
