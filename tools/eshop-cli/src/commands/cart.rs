//! Cart commands.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use dialoguer::Confirm;
use eshop_commerce::cart::{Cart, CartSummary};
use eshop_core::{MemorySurface, Storefront};
use serde::Serialize;

use super::{CartArgs, CartCommand};
use crate::context::Context;
use crate::output::stock_badge;

#[derive(Serialize)]
struct CartView<'a> {
    lines: &'a Cart,
    summary: &'a CartSummary,
}

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront(Arc::new(MemorySurface::new()))?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show_cart(&shop, ctx),
        CartCommand::Add { id, quantity } => {
            let spinner = ctx.output.spinner(&format!("Fetching product {}...", id));
            let product = shop.catalog().require_product(id).await;
            spinner.finish_and_clear();
            let product = product.with_context(|| format!("Cannot add product {}", id))?;

            shop.add_to_cart(id, quantity).await?;
            ctx.output.success(&format!(
                "Added {} x {} ({})",
                quantity,
                product.title,
                stock_badge(product.stock_status(), product.stock)
            ));
            show_cart(&shop, ctx)
        }
        CartCommand::Remove { id } => {
            if shop.remove_from_cart(id)? {
                ctx.output.success(&format!("Removed product {}", id));
            } else {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
            show_cart(&shop, ctx)
        }
        CartCommand::Set { id, quantity } => {
            if shop.set_quantity(id, quantity)? {
                ctx.output.success(&format!("Product {} updated", id));
            } else {
                ctx.output.warn(&format!("Product {} is not in the cart", id));
            }
            show_cart(&shop, ctx)
        }
        CartCommand::Clear { yes } => {
            if !confirm(yes, "Empty the cart?")? {
                ctx.output.warn("Cart left unchanged");
                return Ok(());
            }
            shop.clear_cart()?;
            ctx.output.success("Cart emptied");
            Ok(())
        }
        CartCommand::Checkout { yes } => checkout(&shop, yes, ctx),
    }
}

fn show_cart(shop: &Storefront, ctx: &Context) -> Result<()> {
    let cart = shop.cart_snapshot();
    let summary = shop.cart_summary()?;

    if ctx.output.is_json() {
        ctx.output.json(&CartView {
            lines: &cart,
            summary: &summary,
        });
        return Ok(());
    }

    ctx.output.header("Cart");
    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let widths = [8, 32, 6, 16];
    ctx.output.table_row(&["ID", "PRODUCT", "QTY", "LINE TOTAL"], &widths);
    for line in cart.lines() {
        let id = line.product_id.to_string();
        let quantity = line.quantity.to_string();
        let total = line.line_total()?.to_string();
        ctx.output
            .table_row(&[id.as_str(), line.title.as_str(), quantity.as_str(), total.as_str()], &widths);
    }

    ctx.output.plain("");
    ctx.output.kv("items", &summary.item_count.to_string());
    ctx.output.kv("subtotal", &summary.subtotal.to_string());
    let shipping = if summary.has_free_shipping() {
        "Free".to_string()
    } else {
        summary.shipping.to_string()
    };
    ctx.output.kv("shipping", &shipping);
    ctx.output.kv("total", &summary.total.to_string());
    Ok(())
}

fn checkout(shop: &Storefront, yes: bool, ctx: &Context) -> Result<()> {
    let summary = shop.cart_summary()?;
    if summary.is_empty {
        ctx.output.warn("Your cart is empty.");
        return Ok(());
    }

    if !confirm(yes, &format!("Place order for {}?", summary.total))? {
        ctx.output.warn("Checkout cancelled");
        return Ok(());
    }

    let order = shop.checkout()?;
    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }
    ctx.output.success(&format!(
        "Order placed: {} item(s), {} total",
        order.summary.item_count, order.summary.total
    ));
    ctx.output.kv("placed at", &order.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string());
    Ok(())
}

fn confirm(yes: bool, prompt: &str) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
