//! Command implementations.

pub mod completions;
pub mod config;
pub mod schema;
pub mod serve;
pub mod version;
