//! Search results, pagination and facets.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::{CategoryTree, Product};

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page.
    pub limit: i64,
    /// Total number of matching items.
    pub total: i64,
    /// `ceil(total / limit)`; 0 when nothing matched.
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    /// Create pagination info. `limit` must be positive.
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = total / limit + i64::from(total % limit != 0);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// Get start item number (1-indexed), 0 when the page is empty.
    pub fn start_item(&self) -> i64 {
        if self.page > self.total_pages {
            0
        } else {
            (self.page - 1) * self.limit + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> i64 {
        if self.page > self.total_pages {
            0
        } else {
            (self.page * self.limit).min(self.total)
        }
    }
}

/// Inclusive bounds of all product prices.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

/// Facet metadata describing the whole catalog, independent of the filter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SearchFacets {
    /// Full category tree.
    pub categories: CategoryTree,
    /// `{0, 0}` for an empty catalog.
    pub price_range: PriceRange,
    /// Deduplicated, sorted union of all tags.
    pub available_tags: Vec<String>,
}

/// One page of matching products plus facets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub products: Vec<Product>,
    pub pagination: Pagination,
    /// Shared with the snapshot; never copied per query.
    pub filters: Arc<SearchFacets>,
}

impl SearchResult {
    /// Check if this page holds no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Get number of items in this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }
}
