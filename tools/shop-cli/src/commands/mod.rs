//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod favorites;

use clap::{Args, Subcommand};
use shop_commerce::search::SortOption;
use shop_commerce::ProductId;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Sort order: default, name-asc, name-desc, price-asc, price-desc.
    #[arg(short, long, value_parser = parse_sort, default_value = "default")]
    pub sort: SortOption,

    /// Category slug (e.g. smartphones).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Number of pages to load.
    #[arg(short, long, default_value_t = 1)]
    pub pages: u32,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Search text (at least 3 characters).
    pub query: String,
}

/// Arguments for commands that act on one product.
#[derive(Args)]
pub struct ProductArgs {
    /// Product ID.
    pub id: ProductId,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List the cart with totals.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product ID.
        id: ProductId,
    },
    /// Take one unit of a product out.
    Decrease {
        /// Product ID.
        id: ProductId,
    },
    /// Remove a product line entirely.
    Remove {
        /// Product ID.
        id: ProductId,
    },
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
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
    /// Write a shop.toml in the current directory.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}

fn parse_sort(s: &str) -> Result<SortOption, String> {
    SortOption::from_str(s).ok_or_else(|| {
        let names: Vec<&str> = SortOption::ALL.iter().map(|o| o.as_str()).collect();
        format!("unknown sort '{}', expected one of: {}", s, names.join(", "))
    })
}
