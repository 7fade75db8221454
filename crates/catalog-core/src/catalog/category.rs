//! Category types for product organization.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::{CatalogError, CatalogResult};
use crate::ids::CategoryId;

/// A product category in the catalog hierarchy.
///
/// `Clone`, `PartialEq`, `Debug`, `Drop` and `Serialize` walk the subtree
/// with an explicit stack, so a category chain of any depth is safe to hold,
/// compare and render.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// URL-friendly slug, unique across the tree.
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    /// Parent category ID (None for root categories).
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Child categories, resolved when the tree is built.
    #[serde(default)]
    pub children: Vec<Category>,
    #[serde(default)]
    pub product_count: u64,
    /// Sort position within the parent.
    #[serde(default)]
    pub order: i32,
}

impl Category {
    /// Depth-first walk of this category and everything below it.
    pub fn walk(&self) -> CategoryWalk<'_> {
        CategoryWalk { stack: vec![self] }
    }

    /// Copy of this node without its children.
    fn detached(&self) -> Self {
        Self {
            id: self.id.clone(),
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            parent_id: self.parent_id.clone(),
            children: Vec::new(),
            product_count: self.product_count,
            order: self.order,
        }
    }

    fn same_fields(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.slug == other.slug
            && self.description == other.description
            && self.image == other.image
            && self.parent_id == other.parent_id
            && self.product_count == other.product_count
            && self.order == other.order
    }
}

impl Clone for Category {
    fn clone(&self) -> Self {
        // Preorder copies with parent positions, reassembled bottom-up.
        let mut copies: Vec<Option<Category>> = Vec::new();
        let mut parents: Vec<usize> = Vec::new();
        let mut stack: Vec<(&Category, usize)> = vec![(self, 0)];
        while let Some((node, parent)) = stack.pop() {
            let at = copies.len();
            copies.push(Some(node.detached()));
            parents.push(parent);
            stack.extend(node.children.iter().rev().map(|c| (c, at)));
        }

        // Descendants sit after their ancestor, so walking backwards always
        // moves finished subtrees. Siblings arrive last-first.
        for i in (1..copies.len()).rev() {
            if let Some(mut node) = copies[i].take() {
                node.children.reverse();
                if let Some(parent) = copies[parents[i]].as_mut() {
                    parent.children.push(node);
                }
            }
        }

        let mut root = copies
            .first_mut()
            .and_then(Option::take)
            .unwrap_or_else(|| self.detached());
        root.children.reverse();
        root
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            if !a.same_fields(b) || a.children.len() != b.children.len() {
                return false;
            }
            stack.extend(a.children.iter().zip(&b.children));
        }
        true
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Category")
            .field("id", &self.id)
            .field("slug", &self.slug)
            .field("parent_id", &self.parent_id)
            .field("children", &self.children.len())
            .finish_non_exhaustive()
    }
}

impl Drop for Category {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// The fields of one category, without its children.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryFields<'a> {
    id: &'a CategoryId,
    name: &'a str,
    slug: &'a str,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<&'a CategoryId>,
    product_count: u64,
    order: i32,
}

impl<'a> From<&'a Category> for CategoryFields<'a> {
    fn from(c: &'a Category) -> Self {
        Self {
            id: &c.id,
            name: &c.name,
            slug: &c.slug,
            description: &c.description,
            image: c.image.as_deref(),
            parent_id: c.parent_id.as_ref(),
            product_count: c.product_count,
            order: c.order,
        }
    }
}

impl Category {
    /// Render this subtree as JSON; `children` is omitted when empty.
    pub fn to_json(&self) -> serde_json::Result<String> {
        enum Step<'a> {
            Node(&'a Category),
            Text(&'static str),
        }

        let mut out = String::new();
        let mut stack = vec![Step::Node(self)];
        while let Some(step) = stack.pop() {
            let node = match step {
                Step::Text(text) => {
                    out.push_str(text);
                    continue;
                }
                Step::Node(node) => node,
            };

            let fields = serde_json::to_string(&CategoryFields::from(node))?;
            if node.children.is_empty() {
                out.push_str(&fields);
                continue;
            }
            // Reopen the object to append the children array.
            out.push_str(fields.strip_suffix('}').unwrap_or(&fields));
            out.push_str(",\"children\":[");
            stack.push(Step::Text("]}"));
            for (i, child) in node.children.iter().enumerate().rev() {
                stack.push(Step::Node(child));
                if i > 0 {
                    stack.push(Step::Text(","));
                }
            }
        }
        Ok(out)
    }
}

impl Serialize for Category {
    /// Emits pre-rendered JSON, so nesting depth never reaches the serializer.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let json = self.to_json().map_err(S::Error::custom)?;
        RawValue::from_string(json)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// The category hierarchy, rooted at a list of top-level categories.
///
/// Built once from either a flat list linked by `parentId` or an already
/// nested list. Every traversal is iterative, so depth is unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct CategoryTree {
    roots: Vec<Category>,
}

impl CategoryTree {
    /// Build a tree from flat and/or nested category nodes.
    ///
    /// Inline children inherit their container as parent when they carry no
    /// `parentId`. Nodes whose parent is unknown become roots. Sibling order
    /// follows input order.
    pub fn build(nodes: Vec<Category>) -> CatalogResult<Self> {
        let flat = flatten(nodes);

        let mut index: HashMap<CategoryId, usize> = HashMap::with_capacity(flat.len());
        let mut slugs: HashSet<&str> = HashSet::with_capacity(flat.len());
        for (i, node) in flat.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(CatalogError::InvalidData(format!(
                    "duplicate category id: {}",
                    node.id
                )));
            }
            if !slugs.insert(node.slug.as_str()) {
                return Err(CatalogError::DuplicateSlug(node.slug.clone()));
            }
        }

        let n = flat.len();
        let mut child_idx: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut root_idx = Vec::new();
        for (i, node) in flat.iter().enumerate() {
            match node.parent_id.as_ref().and_then(|p| index.get(p)) {
                Some(&parent) if parent != i => child_idx[parent].push(i),
                _ => root_idx.push(i),
            }
        }

        // Preorder over everything reachable from the roots.
        let mut preorder = Vec::with_capacity(n);
        let mut stack: Vec<usize> = root_idx.iter().rev().copied().collect();
        let mut seen = vec![false; n];
        while let Some(i) = stack.pop() {
            if seen[i] {
                continue;
            }
            seen[i] = true;
            preorder.push(i);
            stack.extend(child_idx[i].iter().rev());
        }
        if let Some(orphan) = seen.iter().position(|s| !s) {
            return Err(CatalogError::InvalidData(format!(
                "category cycle involving {}",
                flat[orphan].id
            )));
        }

        // Children come after their parent in preorder, so building in
        // reverse preorder always finds them finished.
        let mut pending: Vec<Option<Category>> = flat.into_iter().map(Some).collect();
        let mut built: Vec<Option<Category>> = (0..n).map(|_| None).collect();
        for &i in preorder.iter().rev() {
            let Some(mut node) = pending[i].take() else {
                continue;
            };
            node.children = child_idx[i]
                .iter()
                .filter_map(|&c| built[c].take())
                .collect();
            built[i] = Some(node);
        }

        let roots = root_idx
            .iter()
            .filter_map(|&i| built[i].take())
            .collect();

        Ok(Self { roots })
    }

    /// Top-level categories.
    pub fn roots(&self) -> &[Category] {
        &self.roots
    }

    /// Depth-first walk over every category in the tree.
    pub fn walk(&self) -> CategoryWalk<'_> {
        CategoryWalk {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Number of categories at any depth.
    pub fn len(&self) -> usize {
        self.walk().count()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find a category by slug at any depth.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Category> {
        self.walk().find(|c| c.slug == slug)
    }

    /// Find a category by id at any depth.
    pub fn find_by_id(&self, id: &CategoryId) -> Option<&Category> {
        self.walk().find(|c| &c.id == id)
    }
}

/// Preorder depth-first iterator over categories.
pub struct CategoryWalk<'a> {
    stack: Vec<&'a Category>,
}

impl<'a> Iterator for CategoryWalk<'a> {
    type Item = &'a Category;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Resolve a category by slug, failing with `CategoryNotFound`.
pub fn resolve_category<'a>(slug: &str, tree: &'a CategoryTree) -> CatalogResult<&'a Category> {
    tree.find_by_slug(slug)
        .ok_or_else(|| CatalogError::CategoryNotFound(slug.to_string()))
}

/// Detach inline children into a flat preorder list.
fn flatten(nodes: Vec<Category>) -> Vec<Category> {
    let mut flat = Vec::with_capacity(nodes.len());
    let mut stack: Vec<Category> = nodes.into_iter().rev().collect();
    while let Some(mut node) = stack.pop() {
        let children = std::mem::take(&mut node.children);
        for mut child in children.into_iter().rev() {
            if child.parent_id.is_none() {
                child.parent_id = Some(node.id.clone());
            }
            stack.push(child);
        }
        flat.push(node);
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: &str, parent: Option<&str>) -> Category {
        Category {
            id: CategoryId::new(id),
            name: id.to_uppercase(),
            slug: format!("{}-slug", id),
            description: String::new(),
            image: None,
            parent_id: parent.map(CategoryId::new),
            children: Vec::new(),
            product_count: 0,
            order: 0,
        }
    }

    fn slugs(tree: &CategoryTree) -> Vec<&str> {
        tree.walk().map(|c| c.slug.as_str()).collect()
    }

    #[test]
    fn test_build_from_flat_list() {
        let tree = CategoryTree::build(vec![
            cat("phones", Some("electronics")),
            cat("electronics", None),
            cat("books", None),
            cat("android", Some("phones")),
        ])
        .unwrap();

        assert_eq!(tree.roots().len(), 2);
        assert_eq!(tree.roots()[0].id, "electronics");
        assert_eq!(tree.len(), 4);
        assert_eq!(
            slugs(&tree),
            vec!["electronics-slug", "phones-slug", "android-slug", "books-slug"]
        );
    }

    #[test]
    fn test_build_from_nested_list() {
        let mut electronics = cat("electronics", None);
        let mut phones = cat("phones", None);
        phones.children.push(cat("android", None));
        electronics.children.push(phones);

        let tree = CategoryTree::build(vec![electronics]).unwrap();
        let android = tree.find_by_slug("android-slug").unwrap();
        assert_eq!(android.parent_id.as_ref().unwrap(), "phones");
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_unknown_parent_becomes_root() {
        let tree = CategoryTree::build(vec![cat("a", Some("missing"))]).unwrap();
        assert_eq!(tree.roots().len(), 1);
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let mut b = cat("b", None);
        b.slug = "a-slug".to_string();
        let err = CategoryTree::build(vec![cat("a", None), b]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSlug(_)));
    }

    #[test]
    fn test_cycle_rejected() {
        let err = CategoryTree::build(vec![cat("a", Some("b")), cat("b", Some("a"))]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidData(_)));
    }

    #[test]
    fn test_resolve_deep_category() {
        let depth = 200;
        let tree = CategoryTree::build(chain(depth)).unwrap();

        let deepest = resolve_category("c199-slug", &tree).unwrap();
        assert_eq!(deepest.id, "c199");
        assert_eq!(tree.len(), depth);
    }

    fn chain(depth: usize) -> Vec<Category> {
        let mut nodes = vec![cat("c0", None)];
        for i in 1..depth {
            nodes.push(cat(&format!("c{}", i), Some(&format!("c{}", i - 1))));
        }
        nodes
    }

    #[test]
    fn test_search_over_very_deep_tree() {
        use crate::catalog::product::fixtures::product;
        use crate::catalog::CatalogSnapshot;
        use crate::search::SearchQuery;

        let depth = 20_000;
        let deepest = format!("c{}", depth - 1);
        let snapshot = CatalogSnapshot::new(
            vec![
                product("top", "c0", 100, "2024-01-01"),
                product("bottom", &deepest, 200, "2024-02-01"),
            ],
            chain(depth),
        )
        .unwrap();

        for _ in 0..3 {
            let result = snapshot.search(&SearchQuery::new()).unwrap();
            assert_eq!(result.len(), 2);
            assert_eq!(result.filters.categories.len(), depth);

            let json = serde_json::to_string(&result).unwrap();
            assert_eq!(json.matches("\"children\":[").count(), depth - 1);
        }

        let leaf = snapshot.category(&format!("{}-slug", deepest)).unwrap();
        assert_eq!(leaf.id, deepest.as_str());
        assert_eq!(snapshot.products_in_category(&deepest, None).len(), 1);

        let copy = snapshot.categories().clone();
        assert_eq!(&copy, snapshot.categories());
        drop(copy);
        drop(snapshot);
    }

    #[test]
    fn test_clone_and_eq_keep_sibling_order() {
        let tree = CategoryTree::build(vec![
            cat("a", None),
            cat("a1", Some("a")),
            cat("a2", Some("a")),
            cat("a2x", Some("a2")),
            cat("b", None),
        ])
        .unwrap();

        let copy = tree.clone();
        assert_eq!(copy, tree);
        assert_eq!(slugs(&copy), slugs(&tree));

        let mut changed = tree.clone();
        changed.roots[0].children[1].children[0].name = "renamed".to_string();
        assert_ne!(changed, tree);
    }

    #[test]
    fn test_serialized_shape() {
        let mut audio = cat("audio", None);
        audio.image = Some("/audio.png".to_string());
        let mut electronics = cat("electronics", None);
        electronics.children.push(audio);
        let tree = CategoryTree::build(vec![electronics, cat("books", None)]).unwrap();

        let value = serde_json::to_value(&tree).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {
                    "id": "electronics", "name": "ELECTRONICS", "slug": "electronics-slug",
                    "description": "", "productCount": 0, "order": 0,
                    "children": [{
                        "id": "audio", "name": "AUDIO", "slug": "audio-slug",
                        "description": "", "image": "/audio.png", "parentId": "electronics",
                        "productCount": 0, "order": 0
                    }]
                },
                {
                    "id": "books", "name": "BOOKS", "slug": "books-slug",
                    "description": "", "productCount": 0, "order": 0
                }
            ])
        );

        let back: Vec<Category> = serde_json::from_value(value).unwrap();
        assert_eq!(CategoryTree::build(back).unwrap(), tree);
    }

    #[test]
    fn test_resolve_missing_slug() {
        let tree = CategoryTree::build(vec![cat("a", None)]).unwrap();
        let err = resolve_category("nope", &tree).unwrap_err();
        assert!(matches!(err, CatalogError::CategoryNotFound(ref s) if s == "nope"));
    }
}
