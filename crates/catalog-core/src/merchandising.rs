//! Curated product listings: related, featured, new arrivals, on sale.
//!
//! Each listing filters, stable-sorts and truncates; ties keep collection
//! order. A limit of 0 yields an empty listing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogSnapshot, Product};
use crate::error::{CatalogError, CatalogResult};
use crate::ids::ProductId;
use crate::timestamp::Timestamp;

/// Related products shown on a product page.
pub const DEFAULT_RELATED_LIMIT: usize = 4;
/// Items in a home-page collection.
pub const DEFAULT_COLLECTION_LIMIT: usize = 8;

/// Share of on-hand stock assumed to be held for pending orders.
const RESERVED_STOCK_DIVISOR: u64 = 10;

/// Products in the same category, best rated first.
pub fn get_related<'a>(product: &Product, all: &'a [Product], limit: usize) -> Vec<&'a Product> {
    let mut related: Vec<&Product> = all
        .iter()
        .filter(|p| p.id != product.id && p.category_id == product.category_id)
        .collect();
    related.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    related.truncate(limit);
    related
}

/// In-stock products ranked by `rating * reviewCount`.
pub fn get_featured(all: &[Product], limit: usize) -> Vec<&Product> {
    let mut featured: Vec<&Product> = all.iter().filter(|p| p.in_stock).collect();
    featured.sort_by(|a, b| b.popularity().total_cmp(&a.popularity()));
    featured.truncate(limit);
    featured
}

/// In-stock products, newest first.
pub fn get_new(all: &[Product], limit: usize) -> Vec<&Product> {
    let mut fresh: Vec<&Product> = all.iter().filter(|p| p.in_stock).collect();
    fresh.sort_by(|a, b| b.created_at.instant().cmp(&a.created_at.instant()));
    fresh.truncate(limit);
    fresh
}

/// In-stock discounted products, deepest discount first.
pub fn get_on_sale(all: &[Product], limit: usize) -> Vec<&Product> {
    let mut sale: Vec<&Product> = all
        .iter()
        .filter(|p| p.in_stock && p.is_on_sale())
        .collect();
    sale.sort_by(|a, b| b.discount_fraction().total_cmp(&a.discount_fraction()));
    sale.truncate(limit);
    sale
}

/// Products in a category, in collection order.
pub fn products_by_category<'a>(
    category_id: &str,
    all: &'a [Product],
    limit: Option<usize>,
) -> Vec<&'a Product> {
    all.iter()
        .filter(|p| p.category_id == category_id)
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// A named home-page collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Featured,
    New,
    Sale,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Featured => "featured",
            Collection::New => "new",
            Collection::Sale => "sale",
        }
    }

    /// Select this collection's products.
    pub fn select<'a>(&self, all: &'a [Product], limit: usize) -> Vec<&'a Product> {
        match self {
            Collection::Featured => get_featured(all, limit),
            Collection::New => get_new(all, limit),
            Collection::Sale => get_on_sale(all, limit),
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Collection {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" => Ok(Collection::Featured),
            "new" => Ok(Collection::New),
            "sale" => Ok(Collection::Sale),
            other => Err(CatalogError::InvalidArgument(format!(
                "unknown collection: {}",
                other
            ))),
        }
    }
}

/// Stock availability for a product page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StockInfo {
    pub product_id: ProductId,
    pub in_stock: bool,
    pub stock_count: u64,
    /// Units held for pending orders, a tenth of stock rounded down.
    pub reserved_count: u64,
    pub last_updated: Timestamp,
}

impl StockInfo {
    pub fn for_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            in_stock: product.in_stock,
            stock_count: product.stock_count,
            reserved_count: product.stock_count / RESERVED_STOCK_DIVISOR,
            last_updated: Timestamp::now(),
        }
    }

    /// Units that can still be sold.
    pub fn available(&self) -> u64 {
        self.stock_count.saturating_sub(self.reserved_count)
    }
}

impl CatalogSnapshot {
    /// Related products for a product id; empty when the id is unknown.
    pub fn related(&self, id: &str, limit: usize) -> Vec<&Product> {
        match self.product(id) {
            Ok(product) => get_related(product, self.products(), limit),
            Err(_) => Vec::new(),
        }
    }

    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        get_featured(self.products(), limit)
    }

    pub fn new_arrivals(&self, limit: usize) -> Vec<&Product> {
        get_new(self.products(), limit)
    }

    pub fn on_sale(&self, limit: usize) -> Vec<&Product> {
        get_on_sale(self.products(), limit)
    }

    pub fn collection(&self, collection: Collection, limit: usize) -> Vec<&Product> {
        collection.select(self.products(), limit)
    }

    pub fn products_in_category(&self, category_id: &str, limit: Option<usize>) -> Vec<&Product> {
        products_by_category(category_id, self.products(), limit)
    }

    /// Stock availability for a product.
    pub fn stock_info(&self, id: &str) -> CatalogResult<StockInfo> {
        self.product(id).map(StockInfo::for_product)
    }
}
