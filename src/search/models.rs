//! Search query model

use crate::category::Category;
use serde::{Deserialize, Serialize};

/// A single search request: the keyword plus the filter node for each
/// source the caller wants queried. Filter nodes arrive already narrowed by
/// the caller to the selected leaf codes. Built per search and discarded
/// after the aggregators consume it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Keyword, empty for a pure category browse
    pub keyword: String,
    /// Heritage filter node carrying the ccbaKdcd/ccbaCtcd/ccbaPcd1 groups
    pub heritage_filter: Option<Category>,
    /// Tourism filter node whose children are location-code groupings
    pub tourism_filter: Option<Category>,
}

impl SearchQuery {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Default::default()
        }
    }

    pub fn with_heritage(mut self, filter: Category) -> Self {
        self.heritage_filter = Some(filter);
        self
    }

    pub fn with_tourism(mut self, filter: Category) -> Self {
        self.tourism_filter = Some(filter);
        self
    }

    /// A query that selects no source produces no requests.
    pub fn is_empty(&self) -> bool {
        self.heritage_filter.is_none() && self.tourism_filter.is_none()
    }
}
