//! HTTP networking module
//!
//! Provides the HTTP client used for all upstream API requests.

mod client;

pub use client::{ApiRequest, ApiResponse, HttpClient};
