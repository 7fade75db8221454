//! Search query builder.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::{CatalogError, CatalogResult};
use crate::search::ProductFilter;

/// Page requested when none is given.
pub const DEFAULT_PAGE: i64 = 1;
/// Page size used when none is given.
pub const DEFAULT_LIMIT: i64 = 12;

/// Sort options for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    /// Sort by name A-Z.
    NameAsc,
    /// Sort by name Z-A.
    NameDesc,
    /// Sort by price, low to high.
    PriceAsc,
    /// Sort by price, high to low.
    PriceDesc,
    /// Sort by highest rated.
    RatingDesc,
    /// Sort by newest first.
    #[default]
    Newest,
    /// Sort by oldest first.
    Oldest,
}

impl SortOption {
    pub const ALL: [SortOption; 7] = [
        SortOption::NameAsc,
        SortOption::NameDesc,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::RatingDesc,
        SortOption::Newest,
        SortOption::Oldest,
    ];

    /// Wire name of the sort key.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "name_asc",
            SortOption::NameDesc => "name_desc",
            SortOption::PriceAsc => "price_asc",
            SortOption::PriceDesc => "price_desc",
            SortOption::RatingDesc => "rating_desc",
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::NameAsc => "Name: A-Z",
            SortOption::NameDesc => "Name: Z-A",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::RatingDesc => "Highest Rated",
            SortOption::Newest => "Newest",
            SortOption::Oldest => "Oldest",
        }
    }

    /// Comparator for this key. Equal keys compare `Equal` so a stable sort
    /// keeps collection order.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortOption::NameAsc => a.name.cmp(&b.name),
            SortOption::NameDesc => b.name.cmp(&a.name),
            SortOption::PriceAsc => a.price.cmp(&b.price),
            SortOption::PriceDesc => b.price.cmp(&a.price),
            SortOption::RatingDesc => b.rating.total_cmp(&a.rating),
            SortOption::Newest => b.created_at.instant().cmp(&a.created_at.instant()),
            SortOption::Oldest => a.created_at.instant().cmp(&b.created_at.instant()),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == s)
            .ok_or_else(|| CatalogError::InvalidArgument(format!("unknown sort key: {}", s)))
    }
}

/// A product query: filter, sort and page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub filter: ProductFilter,
    pub sort: SortOption,
    /// Current page (1-indexed).
    pub page: i64,
    /// Items per page. Must be positive.
    pub limit: i64,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchQuery {
    /// Create a query with no constraints, newest first, first page of 12.
    pub fn new() -> Self {
        Self {
            filter: ProductFilter::default(),
            sort: SortOption::default(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_filter(mut self, filter: ProductFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination. Pages below 1 clamp to 1; the limit is checked by
    /// [`SearchQuery::validate`].
    pub fn with_pagination(mut self, page: i64, limit: i64) -> Self {
        self.page = page.max(1);
        self.limit = limit;
        self
    }

    /// Reject a non-positive page size or a rating that is not a number.
    pub fn validate(&self) -> CatalogResult<()> {
        if self.limit <= 0 {
            return Err(CatalogError::InvalidArgument(format!(
                "limit must be at least 1, got {}",
                self.limit
            )));
        }
        if let Some(rating) = self.filter.rating.filter(|r| !r.is_finite()) {
            return Err(CatalogError::InvalidArgument(format!(
                "rating must be a finite number, got {}",
                rating
            )));
        }
        Ok(())
    }

    /// The page actually served: the `page` field clamped to at least 1.
    pub fn effective_page(&self) -> i64 {
        self.page.max(1)
    }

    /// Index of the first item on the current page.
    pub fn offset(&self) -> usize {
        let offset = (self.effective_page() - 1).saturating_mul(self.limit.max(0));
        usize::try_from(offset).unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::fixtures::product;

    #[test]
    fn test_query_builder() {
        let query = SearchQuery::new()
            .with_sort(SortOption::PriceAsc)
            .with_pagination(2, 10);

        assert_eq!(query.page, 2);
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset(), 10);
        assert_eq!(query.sort, SortOption::PriceAsc);
    }

    #[test]
    fn test_page_clamps_to_one() {
        let query = SearchQuery::new().with_pagination(-3, 5);
        assert_eq!(query.page, 1);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_non_positive_limit_rejected() {
        for limit in [0, -1] {
            let err = SearchQuery::new().with_pagination(1, limit).validate().unwrap_err();
            assert!(err.is_invalid_argument());
        }
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let query = SearchQuery::new().with_pagination(i64::MAX, i64::MAX);
        assert_eq!(query.offset(), i64::MAX as usize);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!("rating_desc".parse::<SortOption>().unwrap(), SortOption::RatingDesc);
        assert!("relevance".parse::<SortOption>().is_err());
        assert_eq!(SortOption::default(), SortOption::Newest);
        for opt in SortOption::ALL {
            assert_eq!(opt.as_str().parse::<SortOption>().unwrap(), opt);
        }
    }

    #[test]
    fn test_sort_serde_names() {
        assert_eq!(
            serde_json::to_string(&SortOption::PriceDesc).unwrap(),
            "\"price_desc\""
        );
    }

    #[test]
    fn test_compare_dates() {
        let old = product("a", "c", 1, "2024-01-01");
        let new = product("b", "c", 1, "2024-03-01");
        assert_eq!(SortOption::Newest.compare(&new, &old), Ordering::Less);
        assert_eq!(SortOption::Oldest.compare(&old, &new), Ordering::Less);
    }
}
