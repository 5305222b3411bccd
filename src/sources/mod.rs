//! Upstream API sources
//!
//! One module per upstream service: request builders plus a parser for that
//! service's wire format. The search executor drives them.

pub mod heritage;
pub mod tourism;
