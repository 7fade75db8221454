//! Caching for the catalog service.
//!
//! This crate provides:
//! - `CachePolicy` - `Cache-Control` values for each kind of response
//! - `CacheKey` - canonical keys for search queries
//! - `QueryCache` - a bounded, TTL-expiring in-process result cache
//! - `CacheStatus` - HIT / MISS / BYPASS reporting
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use catalog_cache::{CacheKey, CachePolicy, QueryCache};
//!
//! let cache = QueryCache::new(Duration::from_secs(60), 1024);
//! let key = CacheKey::for_query(&query)?;
//! let (result, status) = cache.get_or_try_insert_with(key, || snapshot.search(&query))?;
//!
//! let header = CachePolicy::product_list().cache_control_header();
//! assert_eq!(header, "public, s-maxage=3600, stale-while-revalidate=86400");
//! ```

mod error;
mod key;
mod policy;
mod status;
mod store;

pub use error::{CacheError, CacheResult};
pub use key::CacheKey;
pub use policy::{CachePolicy, CacheScope};
pub use status::{header_names, CacheStatus};
pub use store::{CacheStats, QueryCache};
