//! Result types and merge helpers
//!
//! Defines the common output shape both sources converge to, plus the
//! order-preserving deduplication and keyword filtering applied in the
//! single-threaded join step.

mod container;
mod types;

pub use container::{dedup_by_key, filter_by_name, SearchOutcome, SourceFailure};
pub use types::*;
