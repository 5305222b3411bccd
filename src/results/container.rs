//! Aggregation helpers for the join step
//!
//! Each fetch task returns its own partial list; a single-threaded join
//! concatenates them and runs these helpers. Nothing here is shared across
//! tasks, so no synchronization is involved.

use super::types::{SearchedItem, Source};
use std::collections::HashSet;
use std::hash::Hash;

/// Drop later duplicates of the same key, keeping first-occurrence order.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}

/// Keep items whose name contains the keyword, case-insensitively. An empty
/// keyword keeps everything. Idempotent for a fixed keyword.
pub fn filter_by_name<T, F>(items: Vec<T>, keyword: &str, name: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    if keyword.is_empty() {
        return items;
    }
    let needle = keyword.to_lowercase();
    items
        .into_iter()
        .filter(|item| name(item).to_lowercase().contains(&needle))
        .collect()
}

/// A source that degraded or dropped out of a combined search.
#[derive(Debug, Clone)]
pub struct SourceFailure {
    pub source: Source,
    pub detail: String,
}

/// Outcome of a combined search: the merged item list plus records of
/// sources that failed entirely. A partially failed search is returned
/// silently degraded; the failure records let the caller report it if it
/// wants to.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub items: Vec<SearchedItem>,
    pub failures: Vec<SourceFailure>,
}

impl SearchOutcome {
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}
