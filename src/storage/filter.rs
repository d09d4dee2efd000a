//! List filters derived from query parameters.

use crate::model::{Issue, IssueField};
use std::collections::BTreeMap;

/// Equality constraints on issue fields.
///
/// Every criterion must hold for an issue to match; an empty filter matches
/// everything. Values are compared against `Issue::field_text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    criteria: BTreeMap<IssueField, String>,
}

impl IssueFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw query pairs.
    ///
    /// Unrecognized keys are dropped. A repeated key keeps its last value.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut filter = Self::new();
        for (key, value) in pairs {
            if let Ok(field) = key.as_ref().parse::<IssueField>() {
                filter.criteria.insert(field, value.into());
            }
        }
        filter
    }

    /// Add or replace the criterion for `field`.
    #[must_use]
    pub fn with(mut self, field: IssueField, value: impl Into<String>) -> Self {
        self.criteria.insert(field, value.into());
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    #[must_use]
    pub fn matches(&self, issue: &Issue) -> bool {
        self.criteria
            .iter()
            .all(|(field, expected)| issue.field_text(*field) == *expected)
    }

    /// Matching issues, in insertion order.
    #[must_use]
    pub fn apply(&self, issues: &[Issue]) -> Vec<Issue> {
        issues
            .iter()
            .filter(|issue| self.matches(issue))
            .cloned()
            .collect()
    }
}
