//! The immutable catalog snapshot.
//!
//! Loaded once at startup and shared by reference; every query is a pure
//! function over it.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{Category, CategoryTree, Product};
use crate::error::{CatalogError, CatalogResult};
use crate::ids::ProductId;
use crate::search::{facets_with_tree, SearchFacets};

/// File holding the product array inside a data directory.
pub const PRODUCTS_FILE: &str = "products.json";
/// File holding the category array inside a data directory.
pub const CATEGORIES_FILE: &str = "categories.json";

/// Products and categories, validated and indexed.
///
/// The category tree lives inside the precomputed facets, which every
/// search result shares.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    products: Vec<Product>,
    facets: Arc<SearchFacets>,
    by_id: HashMap<ProductId, usize>,
}

impl CatalogSnapshot {
    /// Build a snapshot from already-parsed data.
    ///
    /// Fails on duplicate product ids, duplicate category slugs, category
    /// cycles and ratings outside `[0, 5]`.
    pub fn new(products: Vec<Product>, categories: Vec<Category>) -> CatalogResult<Self> {
        let categories = CategoryTree::build(categories)?;

        let mut by_id = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            if !(0.0..=5.0).contains(&product.rating) {
                return Err(CatalogError::InvalidData(format!(
                    "rating {} out of range for product {}",
                    product.rating, product.id
                )));
            }
            if by_id.insert(product.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicateId(product.id.to_string()));
            }
        }

        debug!(
            products = products.len(),
            categories = categories.len(),
            "catalog snapshot built"
        );

        let facets = Arc::new(facets_with_tree(&products, categories));

        Ok(Self {
            products,
            facets,
            by_id,
        })
    }

    /// Parse a snapshot from JSON documents.
    pub fn from_json(products_json: &str, categories_json: &str) -> CatalogResult<Self> {
        let products: Vec<Product> = serde_json::from_str(products_json)?;
        let categories: Vec<Category> = serde_json::from_str(categories_json)?;
        Self::new(products, categories)
    }

    /// Load `products.json` and `categories.json` from a directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> CatalogResult<Self> {
        let dir = dir.as_ref();
        let products = read_file(&dir.join(PRODUCTS_FILE))?;
        let categories = read_file(&dir.join(CATEGORIES_FILE))?;
        let snapshot = Self::from_json(&products, &categories)?;

        info!(
            dir = %dir.display(),
            products = snapshot.products.len(),
            categories = snapshot.categories().len(),
            "catalog loaded"
        );
        Ok(snapshot)
    }

    /// All products in load order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The category tree.
    pub fn categories(&self) -> &CategoryTree {
        &self.facets.categories
    }

    /// Facets over the whole catalog.
    pub fn facets(&self) -> &Arc<SearchFacets> {
        &self.facets
    }

    /// Look up a product by id.
    pub fn product(&self, id: &str) -> CatalogResult<&Product> {
        self.by_id
            .get(&ProductId::new(id))
            .map(|&i| &self.products[i])
            .ok_or_else(|| CatalogError::ProductNotFound(id.to_string()))
    }

    /// Look up a category by slug.
    pub fn category(&self, slug: &str) -> CatalogResult<&Category> {
        crate::catalog::resolve_category(slug, self.categories())
    }
}

fn read_file(path: &Path) -> CatalogResult<String> {
    std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::product::fixtures::product;

    const CATEGORIES: &str = r#"[
        {"id": "electronics", "name": "Electronics", "slug": "electronics",
         "children": [{"id": "audio", "name": "Audio", "slug": "audio"}]},
        {"id": "books", "name": "Books", "slug": "books"}
    ]"#;

    #[test]
    fn test_lookup_product() {
        let snapshot = CatalogSnapshot::new(
            vec![product("a", "audio", 100, "2024-01-01")],
            Vec::new(),
        )
        .unwrap();

        assert_eq!(snapshot.product("a").unwrap().price, 100);
        assert!(matches!(
            snapshot.product("zzz"),
            Err(CatalogError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_product_rejected() {
        let err = CatalogSnapshot::new(
            vec![
                product("a", "audio", 100, "2024-01-01"),
                product("a", "audio", 200, "2024-01-02"),
            ],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "a"));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let mut p = product("a", "audio", 100, "2024-01-01");
        p.rating = 7.5;
        assert!(CatalogSnapshot::new(vec![p], Vec::new()).is_err());
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PRODUCTS_FILE),
            r#"[{"id": "p1", "name": "Speaker", "price": 9800, "categoryId": "audio",
                 "inStock": true, "createdAt": "2024-01-05"}]"#,
        )
        .unwrap();
        std::fs::write(dir.path().join(CATEGORIES_FILE), CATEGORIES).unwrap();

        let snapshot = CatalogSnapshot::load_dir(dir.path()).unwrap();
        assert_eq!(snapshot.products().len(), 1);
        assert_eq!(snapshot.categories().len(), 3);
        assert_eq!(snapshot.category("audio").unwrap().name, "Audio");
    }

    #[test]
    fn test_load_dir_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogSnapshot::load_dir(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }

    #[test]
    fn test_bad_timestamp_fails_load() {
        let err = CatalogSnapshot::from_json(
            r#"[{"id": "p1", "name": "X", "price": 1, "categoryId": "c",
                 "inStock": true, "createdAt": "last tuesday"}]"#,
            "[]",
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::Serialization(_)));
    }
}
