//! Cache error types.

use thiserror::Error;

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Errors raised while building cache keys.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The query could not be encoded into a key.
    #[error("failed to encode cache key: {0}")]
    KeyEncoding(#[from] serde_json::Error),
}
