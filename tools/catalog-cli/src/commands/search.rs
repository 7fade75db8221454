//! Query the catalog from the command line.

use anyhow::Result;
use catalog_core::search::{ProductFilter, SearchQuery, SortOption};
use catalog_core::{Currency, Product};

use super::SearchArgs;
use crate::context::Context;
use crate::output::{format_rating, stock_badge, truncate, ProductTable};

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let query = build_query(args, ctx.config.query.default_limit)?;
    ctx.output.debug(&format!("query: {:?}", query));

    let snapshot = ctx.load_snapshot()?;
    let result = snapshot.search(&query)?;

    if ctx.output.is_json() {
        ctx.output.json(&result);
        return Ok(());
    }

    let p = &result.pagination;
    ctx.output.header(&format!(
        "Products ({} total, sorted by {})",
        p.total,
        query.sort.display_name()
    ));

    if result.is_empty() {
        ctx.output.info("No products match.");
        return Ok(());
    }

    print_products(ctx, result.products.iter(), ctx.config.currency());

    ctx.output.info("");
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {} of {})",
        p.start_item(),
        p.end_item(),
        p.total,
        p.page,
        p.total_pages
    ));

    Ok(())
}

fn build_query(args: SearchArgs, default_limit: i64) -> Result<SearchQuery> {
    let mut filter = ProductFilter::new().with_price_range(args.min_price, args.max_price);
    if let Some(category) = args.category {
        filter = filter.with_category(category);
    }
    if args.in_stock {
        filter = filter.with_in_stock(true);
    }
    if let Some(rating) = args.rating {
        filter = filter.with_min_rating(rating);
    }
    if !args.tags.is_empty() {
        filter = filter.with_tags(args.tags);
    }
    if let Some(text) = args.text {
        filter = filter.with_search(text);
    }

    let sort: SortOption = args.sort.parse()?;
    let query = SearchQuery::new()
        .with_filter(filter)
        .with_sort(sort)
        .with_pagination(args.page, args.limit.unwrap_or(default_limit));
    query.validate()?;
    Ok(query)
}

/// Print products as a table.
pub(crate) fn print_products<'a>(
    ctx: &Context,
    products: impl IntoIterator<Item = &'a Product>,
    currency: Currency,
) {
    let mut table = ProductTable::new(["ID", "NAME", "PRICE", "RATING", "STOCK"]);
    for product in products {
        let mut price = product.display_price(currency);
        if product.is_on_sale() {
            price.push_str(&format!(" -{}%", product.discount_percentage()));
        }
        table.push(vec![
            product.id.to_string(),
            truncate(&product.name, 32),
            price,
            format_rating(product.rating),
            stock_badge(product.in_stock),
        ]);
    }
    ctx.output.table(&table);
}
