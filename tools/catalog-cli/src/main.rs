//! Catalog CLI - command line tool for the storefront catalog service.
//!
//! Commands:
//! - `catalog serve` - Run the HTTP API
//! - `catalog search` - Filter, sort and page products
//! - `catalog product` - Show a product, its related products or stock
//! - `catalog categories` - Browse the category tree
//! - `catalog collection` - Featured, new and sale listings
//! - `catalog suggest` - Search-box completions
//! - `catalog config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use catalog_observability::{init_tracing, LogLevel};
use clap::{Parser, Subcommand};

use commands::{
    CategoriesArgs, CollectionArgs, ConfigArgs, ProductArgs, SearchArgs, ServeArgs, SuggestArgs,
};

/// Catalog CLI - Serve and query the storefront product catalog
#[derive(Parser)]
#[command(name = "catalog")]
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

    /// Catalog data directory (overrides `data.dir`)
    #[arg(short, long, global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the catalog HTTP API
    Serve(ServeArgs),

    /// Search products
    Search(SearchArgs),

    /// Show a product
    Product(ProductArgs),

    /// List categories, or the products in one
    Categories(CategoriesArgs),

    /// Show a merchandising collection
    Collection(CollectionArgs),

    /// Suggest completions for partial search text
    Suggest(SuggestArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let mut ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };
    if let Some(dir) = cli.data_dir {
        ctx.config.data.dir = ctx.resolve_path(&dir).display().to_string();
    }

    let mut logging = ctx.config.logging.clone();
    if ctx.output.is_verbose() {
        logging.level = logging.level.min(LogLevel::Debug);
    }
    if let Err(e) = init_tracing(&logging) {
        ctx.output.warn(&e.to_string());
    }
    tracing::debug!(
        config = ?ctx.config_path,
        data_dir = %ctx.data_dir().display(),
        "configuration resolved"
    );

    // Execute command
    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run(args, &ctx).await,
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Collection(args) => commands::collection::run(args, &ctx).await,
        Commands::Suggest(args) => commands::suggest::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
