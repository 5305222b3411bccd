//! Configuration module
//!
//! Handles loading settings from YAML files and environment variables.
//! Settings are passed explicitly to the components that need them; there is
//! no process-wide mutable configuration state.

mod settings;

pub use settings::*;
