//! Browse the category tree.

use anyhow::Result;
use catalog_core::Category;
use serde_json::json;

use super::search::print_products;
use super::CategoriesArgs;
use crate::context::Context;

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let snapshot = ctx.load_snapshot()?;

    let Some(slug) = args.slug else {
        let tree = snapshot.categories();
        if ctx.output.is_json() {
            ctx.output.json(&tree.roots());
            return Ok(());
        }
        ctx.output.header(&format!("Categories ({})", tree.len()));
        for root in tree.roots() {
            print_tree(ctx, root);
        }
        return Ok(());
    };

    let category = snapshot.category(&slug)?;
    let products = snapshot.products_in_category(category.id.as_str(), args.limit);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "category": category,
            "products": products,
        }));
        return Ok(());
    }

    ctx.output.header(&category.name);
    ctx.output.kv("id", category.id.as_str());
    ctx.output.kv("slug", &category.slug);
    if !category.description.is_empty() {
        ctx.output.kv("description", &category.description);
    }
    if !category.children.is_empty() {
        let children: Vec<&str> = category.children.iter().map(|c| c.slug.as_str()).collect();
        ctx.output.kv("subcategories", &children.join(", "));
    }

    ctx.output.info("");
    if products.is_empty() {
        ctx.output.info("No products filed directly under this category.");
    } else {
        print_products(ctx, products, ctx.config.currency());
    }

    Ok(())
}

fn print_tree(ctx: &Context, root: &Category) {
    let mut stack = vec![(root, 0usize)];
    while let Some((category, depth)) = stack.pop() {
        ctx.output.list_item(&format!(
            "{}{} ({}, {} products)",
            "  ".repeat(depth),
            category.name,
            category.slug,
            category.product_count
        ));
        stack.extend(category.children.iter().rev().map(|c| (c, depth + 1)));
    }
}
