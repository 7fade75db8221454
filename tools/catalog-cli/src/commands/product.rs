//! Show a single product.

use anyhow::Result;
use serde_json::json;

use super::search::print_products;
use super::ProductArgs;
use crate::context::Context;
use crate::output::{format_rating, stock_badge};

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;

    if args.stock {
        let stock = snapshot.stock_info(&args.id)?;
        if ctx.output.is_json() {
            ctx.output.json(&stock);
            return Ok(());
        }
        ctx.output.header(&format!("Stock for {}", stock.product_id));
        ctx.output.kv("status", &stock_badge(stock.in_stock));
        ctx.output.kv("on hand", &stock.stock_count.to_string());
        ctx.output.kv("reserved", &stock.reserved_count.to_string());
        ctx.output.kv("available", &stock.available().to_string());
        return Ok(());
    }

    let product = snapshot.product(&args.id)?;
    let related = snapshot.related(&args.id, args.related);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product": product,
            "relatedProducts": related,
        }));
        return Ok(());
    }

    let currency = ctx.config.currency();
    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("category", product.category_id.as_str());
    let mut price = product.display_price(currency);
    if let Some(original) = product.original_price.filter(|_| product.is_on_sale()) {
        price = format!(
            "{} (was {}, -{}%)",
            price,
            catalog_core::format_price(original, currency),
            product.discount_percentage()
        );
    }
    ctx.output.kv("price", &price);
    ctx.output.kv(
        "rating",
        &format!("{} ({} reviews)", format_rating(product.rating), product.review_count),
    );
    ctx.output.kv("stock", &stock_badge(product.in_stock));
    if !product.tags.is_empty() {
        ctx.output.kv("tags", &product.tags.join(", "));
    }
    if !product.description.is_empty() {
        ctx.output.info("");
        ctx.output.info(&product.description);
    }

    if !product.features.is_empty() {
        ctx.output.header("Features");
        for feature in &product.features {
            ctx.output.list_item(feature);
        }
    }

    if !product.specifications.is_empty() {
        ctx.output.header("Specifications");
        for (key, value) in &product.specifications {
            ctx.output.kv(key, value);
        }
    }

    if !related.is_empty() {
        ctx.output.header("Related products");
        print_products(ctx, related, currency);
    }

    Ok(())
}
