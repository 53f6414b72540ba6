//! List catalog categories.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use eshop_core::MemorySurface;
use serde::Serialize;

use super::CategoriesArgs;
use crate::context::Context;

#[derive(Serialize)]
struct CategoryInfo {
    slug: String,
    label: String,
    token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    products: Option<usize>,
}

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let shop = ctx.storefront(Arc::new(MemorySurface::new()))?;

    let spinner = ctx.output.spinner("Fetching categories...");
    let categories = shop.catalog().list_categories().await;
    spinner.finish_and_clear();
    let categories = categories.context("Failed to fetch categories")?;

    let mut infos = Vec::with_capacity(categories.len());
    for category in &categories {
        let products = if args.counts {
            Some(shop.catalog().list_by_category(category.slug()).await?.len())
        } else {
            None
        };
        infos.push(CategoryInfo {
            slug: category.slug().to_string(),
            label: category.label(),
            token: eshop_router::Route::Category(category.slug().to_string()).token(),
            products,
        });
    }

    if ctx.output.is_json() {
        ctx.output.json(&infos);
        return Ok(());
    }

    ctx.output.header(&format!("Categories ({})", infos.len()));
    if infos.is_empty() {
        ctx.output.info("The catalog has no categories.");
        return Ok(());
    }
    for info in &infos {
        match info.products {
            Some(n) => ctx.output.list_item(&format!("{} ({} products)  {}", info.label, n, info.token)),
            None => ctx.output.list_item(&format!("{}  {}", info.label, info.token)),
        }
    }
    Ok(())
}
