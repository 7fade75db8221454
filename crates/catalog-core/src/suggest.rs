//! Search-box suggestions.

use std::collections::HashSet;

use crate::catalog::{CatalogSnapshot, CategoryTree, Product};

/// Queries shorter than this (in characters) get no suggestions.
pub const MIN_QUERY_CHARS: usize = 2;
/// Upper bound on returned suggestions.
pub const MAX_SUGGESTIONS: usize = 8;

/// Suggest product names, category names and tags containing `query`.
///
/// Matching is case-insensitive. Product names come first, then categories
/// (whole tree, depth first), then tags; duplicates keep their first position.
pub fn suggestions(query: &str, products: &[Product], categories: &CategoryTree) -> Vec<String> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    let names = products.iter().map(|p| p.name.as_str());
    let category_names = categories.walk().map(|c| c.name.as_str());
    let tags = products.iter().flat_map(|p| p.tags.iter().map(String::as_str));

    let mut seen = HashSet::new();
    names
        .chain(category_names)
        .chain(tags)
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .filter(|candidate| seen.insert(*candidate))
        .take(MAX_SUGGESTIONS)
        .map(String::from)
        .collect()
}

impl CatalogSnapshot {
    pub fn suggestions(&self, query: &str) -> Vec<String> {
        suggestions(query, self.products(), self.categories())
    }
}
