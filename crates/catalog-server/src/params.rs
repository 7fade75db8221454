//! Query-string parsing for catalog endpoints.
//!
//! Parameters arrive as raw strings so malformed numbers surface as
//! `INVALID_ARGUMENT` envelopes naming the offending parameter.

use catalog_core::search::{ProductFilter, SearchQuery, SortOption, DEFAULT_PAGE};
use catalog_core::{CatalogError, CatalogResult};
use serde::Deserialize;
use tracing::debug;

use crate::config::QuerySettings;

/// Raw `/api/products` query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    pub category: Option<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub in_stock: Option<String>,
    pub rating: Option<String>,
    /// Comma separated.
    pub tags: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ProductListParams {
    /// Build a validated query.
    ///
    /// Blank parameters count as absent. An unknown sort key falls back to
    /// `newest`; a limit above `settings.max_limit` is rejected.
    pub fn into_query(self, settings: &QuerySettings) -> CatalogResult<SearchQuery> {
        let mut filter = ProductFilter::new();
        if let Some(category) = present(self.category) {
            filter = filter.with_category(category);
        }
        filter = filter.with_price_range(
            parse_opt("priceMin", self.price_min)?,
            parse_opt("priceMax", self.price_max)?,
        );
        if let Some(in_stock) = present(self.in_stock) {
            filter = filter.with_in_stock(parse_bool("inStock", &in_stock)?);
        }
        if let Some(rating) = parse_opt("rating", self.rating)? {
            filter = filter.with_min_rating(rating);
        }
        if let Some(tags) = present(self.tags) {
            filter = filter.with_tags(tags.split(',').map(str::trim).filter(|t| !t.is_empty()));
        }
        if let Some(search) = present(self.search) {
            filter = filter.with_search(search);
        }

        let sort = match present(self.sort) {
            None => SortOption::default(),
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                debug!(sort = %raw, "unknown sort key, using default");
                SortOption::default()
            }),
        };

        let page = parse_opt("page", self.page)?.unwrap_or(DEFAULT_PAGE);
        let limit = parse_opt("limit", self.limit)?.unwrap_or(settings.default_limit);
        if limit > settings.max_limit {
            return Err(CatalogError::InvalidArgument(format!(
                "limit must be at most {}, got {}",
                settings.max_limit, limit
            )));
        }

        let query = SearchQuery::new()
            .with_filter(filter)
            .with_sort(sort)
            .with_pagination(page, limit);
        query.validate()?;
        Ok(query)
    }
}

/// `?limit=` on collection and category listings.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

impl LimitParams {
    /// Parse the limit, rejecting negatives and anything above `max`.
    pub fn resolve(self, max: i64) -> CatalogResult<Option<usize>> {
        match parse_opt::<i64>("limit", self.limit)? {
            None => Ok(None),
            Some(limit) if limit > max => Err(CatalogError::InvalidArgument(format!(
                "limit must be at most {}, got {}",
                max, limit
            ))),
            Some(limit) => usize::try_from(limit)
                .map(Some)
                .map_err(|_| invalid("limit", &limit.to_string())),
        }
    }
}

/// `?q=` on the suggestions endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    #[serde(default)]
    pub q: String,
}

fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_opt<T: std::str::FromStr>(name: &str, value: Option<String>) -> CatalogResult<Option<T>> {
    present(value)
        .map(|raw| raw.parse().map_err(|_| invalid(name, &raw)))
        .transpose()
}

fn parse_bool(name: &str, raw: &str) -> CatalogResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(invalid(name, raw)),
    }
}

fn invalid(name: &str, raw: &str) -> CatalogError {
    CatalogError::InvalidArgument(format!("invalid value for {}: {:?}", name, raw))
}
