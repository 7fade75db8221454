//! Server settings.

use std::time::Duration;

use catalog_core::search::DEFAULT_LIMIT;
use serde::{Deserialize, Serialize};

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
/// Largest page size a client may request.
pub const DEFAULT_MAX_LIMIT: i64 = 100;

/// Query defaults and limits applied to `/api/products`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Page size when the request has no `limit`.
    pub default_limit: i64,
    /// Requests above this page size are rejected.
    pub max_limit: i64,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
        }
    }
}

/// In-process query cache settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl_secs: u64,
    pub max_entries: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: 60,
            max_entries: 1024,
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Everything the HTTP layer needs besides the catalog itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    pub query: QuerySettings,
    pub cache: CacheSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            query: QuerySettings::default(),
            cache: CacheSettings::default(),
        }
    }
}

impl ServerConfig {
    pub fn with_bind(mut self, bind: impl Into<String>) -> Self {
        self.bind = bind.into();
        self
    }

    pub fn with_cache(mut self, cache: CacheSettings) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_query(mut self, query: QuerySettings) -> Self {
        self.query = query;
        self
    }
}
