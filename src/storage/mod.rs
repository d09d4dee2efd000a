//! Issue storage.

mod filter;
mod memory;

pub use filter::IssueFilter;
pub use memory::{Acknowledgement, FieldMap, IssueStore};
