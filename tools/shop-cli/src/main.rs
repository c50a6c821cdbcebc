//! Shop CLI - Browse the catalog and manage the cart from the terminal.
//!
//! Commands:
//! - `shop products` - List products, sorted or filtered
//! - `shop search` - Search the catalog
//! - `shop categories` - List categories
//! - `shop show` - Show one product
//! - `shop favorite` - Toggle a favorite
//! - `shop favorites` - List favorites
//! - `shop cart` - Show or change the cart
//! - `shop checkout` - Place the order
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CartArgs, CheckoutArgs, ConfigArgs, ProductArgs, ProductsArgs, SearchArgs};
use config::{LogFormat, ShopConfig};

/// Shop CLI - Browse products, keep favorites and check out a cart
#[derive(Parser)]
#[command(name = "shop")]
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
    /// List products
    Products(ProductsArgs),

    /// Search products by text
    Search(SearchArgs),

    /// List product categories
    Categories,

    /// Show product details
    Show(ProductArgs),

    /// Add or remove a product from favorites
    Favorite(ProductArgs),

    /// List favorite products
    Favorites,

    /// Show or change the cart
    Cart(CartArgs),

    /// Review the cart totals and place the order
    Checkout(CheckoutArgs),

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

    init_tracing(&ctx.config, cli.verbose, cli.json);

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::catalog::products(args, &ctx).await,
        Commands::Search(args) => commands::catalog::search(args, &ctx).await,
        Commands::Categories => commands::catalog::categories(&ctx).await,
        Commands::Show(args) => commands::catalog::show(args, &ctx).await,
        Commands::Favorite(args) => commands::favorites::toggle(args, &ctx).await,
        Commands::Favorites => commands::favorites::list(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Install the log subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(config: &ShopConfig, verbose: bool, json: bool) {
    let level = match config.logging.level {
        Some(ref level) => level.as_str(),
        None if verbose => "debug",
        None => "warn",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = if json || config.logging.format == LogFormat::Json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        eprintln!("failed to install log subscriber: {}", e);
    }
}
