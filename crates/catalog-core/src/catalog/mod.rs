//! Product catalog module.
//!
//! Contains products, the category tree and the snapshot that owns them.

mod category;
pub(crate) mod product;
mod snapshot;

pub use category::{resolve_category, Category, CategoryTree, CategoryWalk};
pub use product::Product;
pub use snapshot::{CatalogSnapshot, CATEGORIES_FILE, PRODUCTS_FILE};
