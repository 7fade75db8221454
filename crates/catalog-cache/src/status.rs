//! Cache lookup status and response header names.

use serde::{Deserialize, Serialize};

/// Header names shared by the catalog service.
pub mod header_names {
    /// Query cache status (HIT, MISS, BYPASS).
    pub const X_CACHE_STATUS: &str = "x-cache-status";
    /// Request ID for tracing.
    pub const X_REQUEST_ID: &str = "x-request-id";
}

/// Outcome of a query cache lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Served from the cache.
    Hit,
    /// Computed and stored.
    Miss,
    /// Caching disabled.
    Bypass,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "HIT",
            Self::Miss => "MISS",
            Self::Bypass => "BYPASS",
        }
    }
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
