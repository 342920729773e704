//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod run;
pub mod search;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// List the "Shop Now" promotions instead of regular products.
    #[arg(short, long)]
    pub promotions: bool,

    /// Only show one category (dresses, tops, accessories, uncategorized).
    #[arg(short, long)]
    pub category: Option<String>,

    /// Sort order (default, price-asc, price-desc).
    #[arg(short, long, default_value = "default")]
    pub sort: String,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Text matched against product names.
    pub query: String,

    /// Minimum price, in major units.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price, in major units.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Minimum rating (0-5).
    #[arg(long)]
    pub min_rating: Option<f32>,

    /// Sort order (default, price-asc, price-desc).
    #[arg(short, long, default_value = "default")]
    pub sort: String,
}

/// Arguments for the run command.
#[derive(Args)]
pub struct RunArgs {
    /// Path to the session script (TOML or JSON).
    pub script: String,

    /// Skip confirmation prompts.
    #[arg(short, long)]
    pub yes: bool,

    /// Report failing steps and continue with the next one.
    #[arg(long)]
    pub keep_going: bool,
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
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the config file.
    Validate,
}
