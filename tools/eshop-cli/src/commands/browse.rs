//! Render a single page.

use std::sync::Arc;

use anyhow::{bail, Result};
use eshop_core::Outcome;

use super::BrowseArgs;
use crate::context::Context;
use crate::terminal::TerminalSurface;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let surface = TerminalSurface::new(ctx.output.clone()).with_html(args.html);
    let shop = ctx.storefront(Arc::new(surface))?;

    ctx.output.debug(&format!("Opening {}", args.token));
    match shop.navigate(&args.token).await {
        Outcome::Failed { route, error } => bail!("Could not load {}: {}", route, error),
        outcome => {
            ctx.output.debug(&format!("{} done", outcome.route()));
            Ok(())
        }
    }
}
