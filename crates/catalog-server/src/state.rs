//! Shared handler state.

use std::sync::Arc;

use catalog_cache::QueryCache;
use catalog_core::prelude::*;

use crate::config::ServerConfig;

/// Cached `/api/products` results.
pub type SearchCache = QueryCache<Arc<SearchResult>>;

/// Application state shared across handlers.
///
/// The snapshot is immutable after load, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<CatalogSnapshot>,
    pub cache: Arc<SearchCache>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(snapshot: CatalogSnapshot, config: ServerConfig) -> Self {
        let cache = if config.cache.enabled {
            QueryCache::new(config.cache.ttl(), config.cache.max_entries)
        } else {
            QueryCache::disabled()
        };
        Self {
            snapshot: Arc::new(snapshot),
            cache: Arc::new(cache),
            config: Arc::new(config),
        }
    }
}
