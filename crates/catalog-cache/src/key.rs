//! Cache key composition.

use catalog_core::search::{ProductFilter, SearchQuery};
use serde::{Deserialize, Serialize};

use crate::error::CacheResult;

/// A cache key identifying one search query.
///
/// Two queries that select the same page of the same products produce the
/// same key: blank fields are dropped and tags are sorted before encoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheKey {
    key: String,
    /// Components that make up the key (for debugging).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    components: Vec<String>,
}

impl CacheKey {
    /// Create a cache key from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            components: Vec::new(),
        }
    }

    /// Build the canonical key for a search query.
    pub fn for_query(query: &SearchQuery) -> CacheResult<Self> {
        let filter = serde_json::to_string(&canonical_filter(&query.filter))?;
        let components = vec![
            format!("filter={}", filter),
            format!("sort={}", query.sort),
            format!("page={}", query.page),
            format!("limit={}", query.limit),
        ];
        Ok(Self {
            key: format!("products:{}", components.join("|")),
            components,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn components(&self) -> &[String] {
        &self.components
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.key)
    }
}

fn canonical_filter(filter: &ProductFilter) -> ProductFilter {
    let mut tags: Vec<String> = filter
        .tags
        .iter()
        .flatten()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    tags.sort();
    tags.dedup();

    ProductFilter {
        category: filter.category.clone().filter(|c| !c.is_empty()),
        price_min: filter.price_min,
        price_max: filter.price_max,
        in_stock: filter.in_stock,
        rating: filter.rating,
        tags: (!tags.is_empty()).then_some(tags),
        search: filter
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty()),
    }
}
