//! CLI command implementations.

pub mod browse;
pub mod cart;
pub mod categories;
pub mod config;
pub mod shell;

use clap::{Args, Subcommand};
use eshop_commerce::ProductId;

/// Arguments for the browse command.
#[derive(Args)]
pub struct BrowseArgs {
    /// Navigation token, e.g. `/category/laptops` or `#/product/3`.
    #[arg(default_value = "/")]
    pub token: String,

    /// Print the page as HTML.
    #[arg(long)]
    pub html: bool,
}

/// Arguments for the shell command.
#[derive(Args)]
pub struct ShellArgs {
    /// Token to open first.
    #[arg(default_value = "/")]
    pub start: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart and its totals.
    Show,
    /// Add a product to the cart.
    Add {
        /// Product id.
        id: ProductId,
        /// Number of units.
        #[arg(default_value = "1")]
        quantity: i64,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product id.
        id: ProductId,
    },
    /// Set the quantity of a cart line; 0 removes it.
    Set {
        /// Product id.
        id: ProductId,
        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Place the order.
    Checkout {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Also show how many products each category has.
    #[arg(long)]
    pub counts: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
