//! eshop - browse the catalog and manage a cart from the terminal.
//!
//! Commands:
//! - `eshop browse <token>` - Render one page
//! - `eshop shell` - Navigate interactively
//! - `eshop cart` - Show and change the cart, check out
//! - `eshop categories` - List catalog categories
//! - `eshop config` - Manage configuration

mod commands;
mod context;
mod output;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use eshop_observability::{init_logging, LogLevel};

use commands::{BrowseArgs, CartArgs, CategoriesArgs, ConfigArgs, ShellArgs};

/// eshop - a terminal storefront
#[derive(Parser)]
#[command(name = "eshop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page for a navigation token
    Browse(BrowseArgs),

    /// Navigate the store interactively
    Shell(ShellArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// List catalog categories
    Categories(CategoriesArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = match context::Context::load(config_path, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let mut logging = ctx.config.logging;
    if cli.verbose {
        logging.level = LogLevel::Debug;
    }
    if let Err(e) = init_logging(&logging) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
        Commands::Shell(args) => commands::shell::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
