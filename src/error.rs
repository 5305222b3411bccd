//! Error taxonomy for search aggregation
//!
//! Per-request failures (`Transport`, `HttpStatus`, `MalformedResponse`) are
//! caught inside the aggregators and contribute zero items; only
//! `CategoryNotFound` (a caller bug) and `UpstreamUnavailable` (every
//! sub-request failed at the transport level) reach the caller.

use thiserror::Error;

/// Errors produced by the search core.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Network-level failure for a single upstream call.
    #[error("transport error: {0}")]
    Transport(String),

    /// Upstream answered with a non-success HTTP status.
    #[error("upstream returned HTTP {0}")]
    HttpStatus(u16),

    /// Response body did not match the expected wire shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// An expected category sub-group is missing from the filter node.
    #[error("category group '{0}' not found")]
    CategoryNotFound(String),

    /// Every sub-request of a search failed with a transport fault.
    #[error("all upstream requests failed")]
    UpstreamUnavailable,
}

impl SearchError {
    /// Whether this error is a transport-level fault. Only transport faults
    /// count towards `UpstreamUnavailable`.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus(_))
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}
