//! Hansearch: a metasearch aggregator for Korean heritage and tourism open APIs
//!
//! Fans a category-and-keyword search out to the National Heritage Service
//! registry (XML) and the VisitKorea tourism service (JSON), normalizes both
//! response shapes into one result type, deduplicates, and returns a merged
//! list. Per-request failures degrade the result silently; only total
//! upstream unavailability is surfaced as an error.

pub mod category;
pub mod config;
pub mod error;
pub mod network;
pub mod results;
pub mod search;
pub mod sources;

pub use config::Settings;
pub use error::SearchError;
pub use results::{SearchOutcome, SearchedItem};
pub use search::{Search, SearchQuery};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout for upstream requests in seconds
pub const DEFAULT_TIMEOUT: u64 = 5;

/// Maximum timeout that can be set
pub const MAX_TIMEOUT: u64 = 30;
