//! Search orchestration module
//!
//! Expands a category selection into upstream request batches, dispatches
//! them concurrently, and joins the partial results into one merged list.

mod executor;
mod models;

pub use executor::Search;
pub use models::SearchQuery;
