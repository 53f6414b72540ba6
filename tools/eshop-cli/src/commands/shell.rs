//! Interactive storefront shell.

use std::sync::Arc;

use anyhow::Result;
use eshop_commerce::ProductId;
use eshop_core::{Outcome, Storefront, UiAction};
use eshop_router::Route;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::ShellArgs;
use crate::context::Context;
use crate::terminal::TerminalSurface;

/// One line typed into the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Empty,
    Help,
    Quit,
    /// Navigate to a token.
    Go(String),
    /// Press a page button.
    Action(UiAction),
    /// Could not be understood; the message says why.
    Invalid(String),
}

impl ShellInput {
    pub fn parse(line: &str) -> ShellInput {
        let line = line.trim();
        if line.is_empty() {
            return ShellInput::Empty;
        }
        if line.starts_with('/') || line.starts_with('#') {
            return ShellInput::Go(line.to_string());
        }

        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "help" | "?" => ShellInput::Help,
            "quit" | "exit" | "q" => ShellInput::Quit,
            "home" => ShellInput::Go(Route::Home.token()),
            "cart" => ShellInput::Go(Route::Cart.token()),
            "search" | "category" | "cat" if rest.is_empty() => {
                ShellInput::Invalid(format!("usage: {} <text>", command))
            }
            "search" => ShellInput::Go(Route::Search(rest.to_string()).token()),
            "category" | "cat" => ShellInput::Go(Route::Category(rest.to_string()).token()),
            "product" | "open" => match rest.parse::<ProductId>() {
                Ok(id) => ShellInput::Go(Route::Product(id).token()),
                Err(_) => ShellInput::Invalid(format!("not a product id: {:?}", rest)),
            },
            _ => parse_action(command, rest),
        }
    }
}

fn parse_action(command: &str, rest: &str) -> ShellInput {
    let action = match command {
        "add" => "add-to-cart",
        "buy" => "buy-now",
        "inc" | "+" => "increase",
        "dec" | "-" => "decrease",
        "rm" => "remove",
        other => other,
    };
    let product_id = if rest.is_empty() {
        None
    } else {
        match rest.parse::<ProductId>() {
            Ok(id) => Some(id),
            Err(_) => return ShellInput::Invalid(format!("not a product id: {:?}", rest)),
        }
    };

    match UiAction::from_data_action(action, product_id) {
        Some(action) => ShellInput::Action(action),
        None if product_id.is_none() && is_product_action(action) => {
            ShellInput::Invalid(format!("usage: {} <product id>", command))
        }
        None => ShellInput::Invalid(format!("unknown command: {} (type `help`)", command)),
    }
}

fn is_product_action(action: &str) -> bool {
    UiAction::from_data_action(action, Some(ProductId::new(0))).is_some()
}

const HELP: &[(&str, &str)] = &[
    ("/<path>, #/<path>", "open a navigation token"),
    ("home, cart", "open the front page or the cart"),
    ("search <text>", "search the catalog"),
    ("category <slug>", "list a category"),
    ("product <id>", "open a product"),
    ("add <id>, buy <id>", "add to cart, or add and open the cart"),
    ("inc <id>, dec <id>, rm <id>", "change a cart line"),
    ("checkout", "place the order"),
    ("retry", "reload the current page"),
    ("quit", "leave the shell"),
];

/// Run the shell command.
pub async fn run(args: ShellArgs, ctx: &Context) -> Result<()> {
    let surface = TerminalSurface::new(ctx.output.clone());
    let shop = Arc::new(ctx.storefront(Arc::new(surface))?);
    let badge = shop.watch_cart_badge();

    ctx.output.info("Type `help` for commands.");
    navigate(&shop, args.start);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match ShellInput::parse(&line) {
            ShellInput::Empty => {}
            ShellInput::Quit => break,
            ShellInput::Help => {
                ctx.output.header("Commands");
                for (usage, what) in HELP {
                    ctx.output.table_row(&[*usage, *what], &[28, 40]);
                }
            }
            // Not awaited: a newer token supersedes a pending one.
            ShellInput::Go(token) => navigate(&shop, token),
            ShellInput::Action(action) => match shop.dispatch(action).await {
                Ok(Some(_)) => {}
                Ok(None) => ctx.output.success(&format!("Cart: {} item(s)", shop.cart_count())),
                Err(e) => ctx.output.error(&e.to_string()),
            },
            ShellInput::Invalid(message) => ctx.output.warn(&message),
        }
    }

    badge.abort();
    Ok(())
}

fn navigate(shop: &Arc<Storefront>, token: String) {
    let shop = Arc::clone(shop);
    tokio::spawn(async move {
        if let Outcome::Failed { route, error } = shop.navigate(&token).await {
            tracing::debug!(route = %route, error = %error, "navigation failed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_navigate() {
        assert_eq!(ShellInput::parse("  #/cart "), ShellInput::Go("#/cart".into()));
        assert_eq!(ShellInput::parse("/product/3"), ShellInput::Go("/product/3".into()));
        assert_eq!(ShellInput::parse("home"), ShellInput::Go("/".into()));
    }

    #[test]
    fn test_named_pages() {
        assert_eq!(
            ShellInput::parse("search red shoes"),
            ShellInput::Go("/search/red%20shoes".into())
        );
        assert_eq!(ShellInput::parse("cat laptops"), ShellInput::Go("/category/laptops".into()));
        assert_eq!(ShellInput::parse("product 12"), ShellInput::Go("/product/12".into()));
        assert!(matches!(ShellInput::parse("search"), ShellInput::Invalid(_)));
        assert!(matches!(ShellInput::parse("product twelve"), ShellInput::Invalid(_)));
    }

    #[test]
    fn test_actions() {
        let id = ProductId::new(4);
        assert_eq!(ShellInput::parse("add 4"), ShellInput::Action(UiAction::AddToCart(id)));
        assert_eq!(ShellInput::parse("buy 4"), ShellInput::Action(UiAction::BuyNow(id)));
        assert_eq!(ShellInput::parse("+ 4"), ShellInput::Action(UiAction::Increase(id)));
        assert_eq!(ShellInput::parse("dec 4"), ShellInput::Action(UiAction::Decrease(id)));
        assert_eq!(ShellInput::parse("rm 4"), ShellInput::Action(UiAction::Remove(id)));
        assert_eq!(ShellInput::parse("checkout"), ShellInput::Action(UiAction::Checkout));
        assert_eq!(ShellInput::parse("retry"), ShellInput::Action(UiAction::Retry));
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(ShellInput::parse(""), ShellInput::Empty);
        assert_eq!(ShellInput::parse("quit"), ShellInput::Quit);
        assert!(matches!(ShellInput::parse("add"), ShellInput::Invalid(m) if m.contains("usage")));
        assert!(matches!(ShellInput::parse("add -1"), ShellInput::Invalid(_)));
        assert!(matches!(ShellInput::parse("dance"), ShellInput::Invalid(m) if m.contains("unknown")));
    }
}
