//! The catalog query engine: filter, sort, paginate, facet.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use crate::catalog::{CatalogSnapshot, CategoryTree, Product};
use crate::error::CatalogResult;
use crate::search::{Pagination, PriceRange, SearchFacets, SearchQuery, SearchResult};

/// Run a query against a product collection.
///
/// Predicates are AND'ed, the sort is stable (ties keep collection order),
/// and a page past the end yields no products but the real totals. Facets
/// always describe the unfiltered collection.
pub fn search(
    products: &[Product],
    categories: &CategoryTree,
    query: &SearchQuery,
) -> CatalogResult<SearchResult> {
    search_with_facets(products, Arc::new(facets(products, categories)), query)
}

/// Run a query, attaching facets computed ahead of time.
fn search_with_facets(
    products: &[Product],
    facets: Arc<SearchFacets>,
    query: &SearchQuery,
) -> CatalogResult<SearchResult> {
    query.validate()?;

    let predicates = query.filter.to_filters();
    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| predicates.iter().all(|f| f.matches(p)))
        .collect();

    // `sort_by` is stable.
    matched.sort_by(|a, b| query.sort.compare(a, b));

    let total = matched.len();
    let pagination = Pagination::new(query.effective_page(), query.limit, total as i64);
    let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);
    let page: Vec<Product> = matched
        .into_iter()
        .skip(query.offset())
        .take(limit)
        .cloned()
        .collect();

    debug!(
        predicates = predicates.len(),
        sort = %query.sort,
        page = pagination.page,
        limit = query.limit,
        total,
        returned = page.len(),
        "catalog search"
    );

    Ok(SearchResult {
        products: page,
        pagination,
        filters: facets,
    })
}

/// Facet metadata over the full, unfiltered collection.
pub fn facets(products: &[Product], categories: &CategoryTree) -> SearchFacets {
    facets_with_tree(products, categories.clone())
}

/// Facets taking ownership of the tree.
pub(crate) fn facets_with_tree(products: &[Product], categories: CategoryTree) -> SearchFacets {
    let price_range = match (
        products.iter().map(|p| p.price).min(),
        products.iter().map(|p| p.price).max(),
    ) {
        (Some(min), Some(max)) => PriceRange { min, max },
        _ => PriceRange::default(),
    };

    let available_tags = products
        .iter()
        .flat_map(|p| p.tags.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    SearchFacets {
        categories,
        price_range,
        available_tags,
    }
}

impl CatalogSnapshot {
    /// Run a query against this snapshot.
    pub fn search(&self, query: &SearchQuery) -> CatalogResult<SearchResult> {
        search_with_facets(self.products(), Arc::clone(self.facets()), query)
    }
}
