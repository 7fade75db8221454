//! Search filter types.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::CategoryId;

/// A single product predicate.
///
/// A query's predicates are combined with AND.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Exact category match.
    Category(CategoryId),
    /// Inclusive price bounds.
    PriceRange { min: Option<u64>, max: Option<u64> },
    /// Stock availability equals the given flag.
    InStock(bool),
    /// Rating at or above a threshold.
    Rating { min: f64 },
    /// Product carries at least one of the tags.
    Tags(Vec<String>),
    /// Case-insensitive substring over name, description and tags.
    Text(String),
}

impl Filter {
    /// Create a category filter.
    pub fn category(id: impl Into<CategoryId>) -> Self {
        Filter::Category(id.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Option<u64>, max: Option<u64>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a text search filter. The needle is stored lowercased.
    pub fn text(query: impl AsRef<str>) -> Self {
        Filter::Text(query.as_ref().to_lowercase())
    }

    /// Whether `product` satisfies this predicate.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(id) => &product.category_id == id,
            Filter::PriceRange { min, max } => {
                min.map_or(true, |min| product.price >= min)
                    && max.map_or(true, |max| product.price <= max)
            }
            Filter::InStock(flag) => product.in_stock == *flag,
            Filter::Rating { min } => product.rating >= *min,
            Filter::Tags(tags) => tags.iter().any(|t| product.has_tag(t)),
            Filter::Text(needle) => product.matches_text(needle),
        }
    }
}

/// The filter specification of a product query.
///
/// Every field is optional; absence means no constraint. Empty strings and
/// empty tag lists are treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_min: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_max: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub in_stock: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl ProductFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_price_range(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Compile the specification into predicates.
    ///
    /// Text search is one more conjunct; it never overrides the other fields.
    pub fn to_filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();

        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            filters.push(Filter::category(category));
        }
        if self.price_min.is_some() || self.price_max.is_some() {
            filters.push(Filter::price_range(self.price_min, self.price_max));
        }
        if let Some(in_stock) = self.in_stock {
            filters.push(Filter::InStock(in_stock));
        }
        if let Some(min) = self.rating {
            filters.push(Filter::Rating { min });
        }
        if let Some(tags) = &self.tags {
            let tags: Vec<String> = tags
                .iter()
                .map(|t| t.trim())
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
            if !tags.is_empty() {
                filters.push(Filter::Tags(tags));
            }
        }
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            filters.push(Filter::text(search));
        }

        filters
    }

    /// Whether no field constrains the result.
    pub fn is_empty(&self) -> bool {
        self.to_filters().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::fixtures::product;

    #[test]
    fn test_price_range_inclusive() {
        let p = product("a", "c", 1000, "2024-01-01");
        assert!(Filter::price_range(Some(1000), Some(1000)).matches(&p));
        assert!(!Filter::price_range(None, Some(999)).matches(&p));
        assert!(!Filter::price_range(Some(1001), None).matches(&p));
    }

    #[test]
    fn test_rating_threshold_inclusive() {
        let mut p = product("a", "c", 1000, "2024-01-01");
        p.rating = 4.0;
        assert!(Filter::Rating { min: 4.0 }.matches(&p));
        assert!(!Filter::Rating { min: 4.1 }.matches(&p));
    }

    #[test]
    fn test_tags_match_any() {
        let mut p = product("a", "c", 1000, "2024-01-01");
        p.tags = vec!["wireless".into(), "audio".into()];
        assert!(Filter::Tags(vec!["gaming".into(), "audio".into()]).matches(&p));
        assert!(!Filter::Tags(vec!["gaming".into()]).matches(&p));
    }

    #[test]
    fn test_empty_fields_are_no_constraint() {
        let filter = ProductFilter::new()
            .with_category("")
            .with_search("   ")
            .with_tags(Vec::<String>::new());
        assert!(filter.is_empty());
    }

    #[test]
    fn test_search_is_combined_with_other_fields() {
        let filters = ProductFilter::new()
            .with_category("audio")
            .with_in_stock(true)
            .with_search("Phone")
            .to_filters();

        assert_eq!(filters.len(), 3);
        assert!(filters.contains(&Filter::Text("phone".into())));
        assert!(filters.contains(&Filter::category("audio")));
    }
}
