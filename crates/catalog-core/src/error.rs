//! Catalog error types.

use thiserror::Error;

/// Result alias used throughout the catalog crates.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while loading or querying the catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A caller-supplied argument is out of range (page size, sort key, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Category not found.
    #[error("Category not found: {0}")]
    CategoryNotFound(String),

    /// Two products share an id.
    #[error("Duplicate product id: {0}")]
    DuplicateId(String),

    /// Two categories share a slug.
    #[error("Duplicate category slug: {0}")]
    DuplicateSlug(String),

    /// A timestamp field could not be parsed as ISO-8601.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Snapshot data violates a catalog invariant.
    #[error("Invalid catalog data: {0}")]
    InvalidData(String),

    /// Failed to read a data file.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CatalogError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::InvalidArgument(_) => "INVALID_ARGUMENT",
            CatalogError::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            CatalogError::CategoryNotFound(_) => "CATEGORY_NOT_FOUND",
            CatalogError::DuplicateId(_)
            | CatalogError::DuplicateSlug(_)
            | CatalogError::InvalidTimestamp(_)
            | CatalogError::InvalidData(_) => "INVALID_DATA",
            CatalogError::Io { .. } => "IO_ERROR",
            CatalogError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Whether this error means a looked-up entity does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CatalogError::ProductNotFound(_) | CatalogError::CategoryNotFound(_)
        )
    }

    /// Whether the caller supplied bad input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CatalogError::InvalidArgument(_))
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            CatalogError::InvalidArgument("limit".into()).code(),
            "INVALID_ARGUMENT"
        );
        assert_eq!(
            CatalogError::ProductNotFound("p".into()).code(),
            "PRODUCT_NOT_FOUND"
        );
        assert_eq!(CatalogError::DuplicateSlug("s".into()).code(), "INVALID_DATA");
    }

    #[test]
    fn test_classification() {
        assert!(CatalogError::CategoryNotFound("x".into()).is_not_found());
        assert!(!CatalogError::InvalidArgument("x".into()).is_not_found());
        assert!(CatalogError::InvalidArgument("x".into()).is_invalid_argument());
    }
}
