//! Shared utilities for `issue_board`.

pub mod time;
