//! Search module.
//!
//! Filters, sort keys, pagination, facets and the query engine.

mod engine;
mod filter;
mod query;
mod results;

pub use engine::{facets, search};
pub(crate) use engine::facets_with_tree;
pub use filter::{Filter, ProductFilter};
pub use query::{SearchQuery, SortOption, DEFAULT_LIMIT, DEFAULT_PAGE};
pub use results::{Pagination, PriceRange, SearchFacets, SearchResult};
