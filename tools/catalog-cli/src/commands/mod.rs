//! CLI command implementations.

pub mod categories;
pub mod collection;
pub mod config;
pub mod product;
pub mod search;
pub mod serve;
pub mod suggest;

use clap::{Args, Subcommand};

/// Arguments for the serve command.
#[derive(Args)]
pub struct ServeArgs {
    /// Listen address (overrides `server.bind`).
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Disable the query cache.
    #[arg(long)]
    pub no_cache: bool,

    /// Query cache TTL in seconds.
    #[arg(long)]
    pub cache_ttl: Option<u64>,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text search over name, description and tags.
    pub text: Option<String>,

    /// Category id (exact match).
    #[arg(long)]
    pub category: Option<String>,

    /// Minimum price.
    #[arg(long)]
    pub min_price: Option<u64>,

    /// Maximum price.
    #[arg(long)]
    pub max_price: Option<u64>,

    /// Only products that are in stock.
    #[arg(long)]
    pub in_stock: bool,

    /// Minimum rating.
    #[arg(short, long)]
    pub rating: Option<f64>,

    /// Match any of these tags, comma separated.
    #[arg(short, long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Sort key: newest, oldest, price_asc, price_desc, rating_desc, name_asc, name_desc.
    #[arg(short, long, default_value = "newest")]
    pub sort: String,

    /// Page number (1-indexed).
    #[arg(short, long, default_value_t = 1)]
    pub page: i64,

    /// Items per page (default: `query.default_limit`).
    #[arg(short, long)]
    pub limit: Option<i64>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id.
    pub id: String,

    /// Number of related products to show.
    #[arg(long, default_value_t = catalog_core::merchandising::DEFAULT_RELATED_LIMIT)]
    pub related: usize,

    /// Show stock availability only.
    #[arg(long)]
    pub stock: bool,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    /// Category slug; lists its products when given.
    pub slug: Option<String>,

    /// Maximum number of products to list.
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for the collection command.
#[derive(Args)]
pub struct CollectionArgs {
    /// Collection name: featured, new or sale.
    pub name: String,

    /// Maximum number of products.
    #[arg(short, long, default_value_t = catalog_core::merchandising::DEFAULT_COLLECTION_LIMIT)]
    pub limit: usize,
}

/// Arguments for the suggest command.
#[derive(Args)]
pub struct SuggestArgs {
    /// Partial search text.
    pub query: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,

    /// Write a default catalog.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration.
    Validate,
}
