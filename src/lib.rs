//! `issue_board`: a per-project issue tracker served over HTTP.
//!
//! Issues live in memory, grouped by project name. Clients create, list
//! (with equality filters), update and delete them through
//! `/api/issues/:project`.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod storage;
pub mod util;

pub use error::{BoardError, ErrorPayload, Result, StructuredError, TrackerError};
