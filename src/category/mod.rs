//! Static category taxonomy
//!
//! Two hierarchical code tables drive the search filters: the National
//! Heritage Service designation/region/palace codes and the VisitKorea area
//! codes. Both are embedded at build time and deserialized once; the trees
//! are read-only for the process lifetime and safe to share across
//! concurrent searches.

use crate::error::SearchError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One node of a category tree. Identity is `code`; a node without child
/// items is a leaf selectable as a final filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub item: Vec<Category>,
}

impl Category {
    /// Create a leaf node.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            item: Vec::new(),
        }
    }

    /// Create a node with children.
    pub fn with_items(
        code: impl Into<String>,
        name: impl Into<String>,
        item: Vec<Category>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            item,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.item.is_empty()
    }

    /// Find the immediate child group with the given code. A missing group
    /// is a filter-construction bug and fails explicitly instead of
    /// degenerating into an empty cross-product.
    pub fn child_group(&self, code: &str) -> Result<&Category, SearchError> {
        self.item
            .iter()
            .find(|cat| cat.code == code)
            .ok_or_else(|| SearchError::CategoryNotFound(code.to_string()))
    }

    /// Walk a code path from this node. Pure lookup, no side effects.
    pub fn resolve(&self, path: &[&str]) -> Option<&Category> {
        let mut node = self;
        for code in path {
            node = node.item.iter().find(|cat| cat.code == *code)?;
        }
        Some(node)
    }
}

/// Resolve a code path against a forest of root categories.
pub fn resolve_in<'a>(roots: &'a [Category], path: &[&str]) -> Option<&'a Category> {
    let (first, rest) = path.split_first()?;
    roots
        .iter()
        .find(|cat| cat.code == *first)
        .and_then(|root| root.resolve(rest))
}

static HERITAGE: Lazy<Vec<Category>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/khs_categories.json"))
        .expect("embedded heritage category data is valid")
});

static TOURISM: Lazy<Vec<Category>> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../data/visitkorea_area_codes.json"))
        .expect("embedded tourism area data is valid")
});

/// Heritage designation/region/palace code taxonomy.
pub fn heritage_categories() -> &'static [Category] {
    &HERITAGE
}

/// VisitKorea area code taxonomy.
pub fn tourism_area_codes() -> &'static [Category] {
    &TOURISM
}
