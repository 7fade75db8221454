//! Catalog domain types and the product query engine.
//!
//! This crate provides:
//!
//! - **Catalog**: products, the category tree and the immutable snapshot
//! - **Search**: filters, sort keys, pagination and facets over the snapshot
//! - **Merchandising**: related, featured, new-arrival and on-sale listings
//! - **Suggestions**: search-box completions
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_core::prelude::*;
//!
//! let snapshot = CatalogSnapshot::load_dir("data")?;
//!
//! let query = SearchQuery::new()
//!     .with_filter(ProductFilter::new().with_in_stock(true).with_search("phone"))
//!     .with_sort(SortOption::PriceAsc)
//!     .with_pagination(1, 12);
//!
//! let result = snapshot.search(&query)?;
//! println!("{} of {} products", result.len(), result.pagination.total);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod timestamp;

pub mod catalog;
pub mod merchandising;
pub mod search;
pub mod suggest;

pub use catalog::{CatalogSnapshot, Category, CategoryTree, Product};
pub use error::{CatalogError, CatalogResult};
pub use ids::*;
pub use money::{discount_percentage, format_price, Currency, Money};
pub use timestamp::Timestamp;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, CatalogResult};
    pub use crate::ids::*;
    pub use crate::money::{discount_percentage, format_price, Currency, Money};
    pub use crate::timestamp::Timestamp;

    // Catalog
    pub use crate::catalog::{resolve_category, CatalogSnapshot, Category, CategoryTree, Product};

    // Merchandising
    pub use crate::merchandising::{
        get_featured, get_new, get_on_sale, get_related, products_by_category, Collection,
        StockInfo, DEFAULT_COLLECTION_LIMIT, DEFAULT_RELATED_LIMIT,
    };

    // Search
    pub use crate::search::{
        search, Filter, Pagination, PriceRange, ProductFilter, SearchFacets, SearchQuery,
        SearchResult, SortOption, DEFAULT_LIMIT, DEFAULT_PAGE,
    };

    pub use crate::suggest::suggestions;
}
