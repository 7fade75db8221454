//! `Cache-Control` policies for catalog responses.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Who may cache a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheScope {
    /// CDN and browser.
    Public,
    /// Browser only.
    Private,
    /// Nobody.
    #[default]
    None,
}

impl CacheScope {
    /// The `Cache-Control` directive for this scope.
    pub fn cache_control_directive(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::None => "no-store",
        }
    }

    pub fn allows_caching(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Response cache policy.
///
/// Catalog responses are cached by the CDN (`s-maxage`) rather than the
/// browser, and may be served stale while the edge revalidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachePolicy {
    pub scope: CacheScope,
    /// Browser TTL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<Duration>,
    /// Shared cache TTL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s_maxage: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stale_while_revalidate: Option<Duration>,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::no_store()
    }
}

impl CachePolicy {
    /// A response that must never be stored.
    pub fn no_store() -> Self {
        Self {
            scope: CacheScope::None,
            max_age: None,
            s_maxage: None,
            stale_while_revalidate: None,
        }
    }

    /// A CDN-cacheable response.
    pub fn shared(s_maxage: Duration) -> Self {
        Self {
            scope: CacheScope::Public,
            max_age: None,
            s_maxage: Some(s_maxage),
            stale_while_revalidate: None,
        }
    }

    /// Set the stale-while-revalidate window.
    pub fn with_swr(mut self, duration: Duration) -> Self {
        self.stale_while_revalidate = Some(duration);
        self
    }

    /// Product listings, category listings and collections.
    pub fn product_list() -> Self {
        Self::shared(Duration::from_secs(3600)).with_swr(Duration::from_secs(86_400))
    }

    /// A single product page.
    pub fn product_detail() -> Self {
        Self::shared(Duration::from_secs(60)).with_swr(Duration::from_secs(3600))
    }

    /// Generate the `Cache-Control` header value.
    pub fn cache_control_header(&self) -> String {
        if !self.scope.allows_caching() {
            return "no-store".to_string();
        }

        let mut parts = vec![self.scope.cache_control_directive().to_string()];

        if let Some(max_age) = self.max_age {
            parts.push(format!("max-age={}", max_age.as_secs()));
        }
        // Shared caches only honour s-maxage on public responses.
        if let Some(s_maxage) = self.s_maxage.filter(|_| self.scope == CacheScope::Public) {
            parts.push(format!("s-maxage={}", s_maxage.as_secs()));
        }
        if let Some(swr) = self.stale_while_revalidate {
            parts.push(format!("stale-while-revalidate={}", swr.as_secs()));
        }

        parts.join(", ")
    }
}
