//! Merchandising collections.

use anyhow::Result;
use catalog_core::merchandising::Collection;

use super::search::print_products;
use super::CollectionArgs;
use crate::context::Context;

/// Run the collection command.
pub async fn run(args: CollectionArgs, ctx: &Context) -> Result<()> {
    let collection: Collection = args.name.parse()?;
    let snapshot = ctx.load_snapshot()?;
    let products = snapshot.collection(collection, args.limit);

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output
        .header(&format!("{} ({} products)", collection, products.len()));
    if products.is_empty() {
        ctx.output.info("Nothing in this collection.");
        return Ok(());
    }
    print_products(ctx, products, ctx.config.currency());

    Ok(())
}
