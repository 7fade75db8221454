//! Run the HTTP API.

use anyhow::{Context as _, Result};

use super::ServeArgs;
use crate::context::Context;

/// Run the serve command.
pub async fn run(args: ServeArgs, ctx: &Context) -> Result<()> {
    let mut config = ctx.config.server_config();
    if let Some(bind) = args.bind {
        config = config.with_bind(bind);
    }
    if args.no_cache {
        config.cache.enabled = false;
    }
    if let Some(ttl) = args.cache_ttl {
        config.cache.ttl_secs = ttl;
    }

    let snapshot = ctx.load_snapshot()?;

    ctx.output.success(&format!(
        "Loaded {} products in {} categories",
        snapshot.products().len(),
        snapshot.categories().len()
    ));
    ctx.output.kv("bind", &config.bind);
    ctx.output.kv(
        "cache",
        &if config.cache.enabled {
            format!("{}s ttl, {} entries", config.cache.ttl_secs, config.cache.max_entries)
        } else {
            "disabled".to_string()
        },
    );

    catalog_server::serve(snapshot, config)
        .await
        .context("Catalog server failed")
}
