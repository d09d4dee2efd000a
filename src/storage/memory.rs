//! In-memory issue store.
//!
//! Projects map to insertion-ordered issue lists behind one `RwLock`.
//! Lists take the read lock (upgrading only to register an unseen project);
//! create, update and delete take the write lock, so mutations never
//! interleave. Identifiers come from a single process-wide counter that is
//! only advanced under the write lock, after a create has validated.
//!
//! Nothing is durable: state lives as long as the store.

use crate::error::TrackerError;
use crate::model::{Issue, IssueField, id_key};
use crate::storage::IssueFilter;
use crate::util::time::now_millis;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Decoded request body: field name to loosely typed value.
pub type FieldMap = Map<String, Value>;

const ID_KEY: &str = "_id";

/// Success acknowledgement for update and delete.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Acknowledgement {
    pub result: &'static str,
    #[serde(rename = "_id")]
    pub id: Value,
}

impl Acknowledgement {
    #[must_use]
    pub const fn updated(id: Value) -> Self {
        Self {
            result: "successfully updated",
            id,
        }
    }

    #[must_use]
    pub const fn deleted(id: Value) -> Self {
        Self {
            result: "successfully deleted",
            id,
        }
    }
}

/// Owned project → issues mapping.
#[derive(Debug)]
pub struct IssueStore {
    projects: RwLock<HashMap<String, Vec<Issue>>>,
    next_id: AtomicU64,
}

impl Default for IssueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IssueStore {
    /// Create an empty store whose first identifier is `"1"`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            projects: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Issues of `project` matching `filter`, in insertion order.
    ///
    /// An unseen project is registered and yields an empty list.
    pub async fn list(&self, project: &str, filter: &IssueFilter) -> Vec<Issue> {
        {
            let projects = self.projects.read().await;
            if let Some(issues) = projects.get(project) {
                let matched = filter.apply(issues);
                debug!(project, criteria = filter.len(), matched = matched.len(), "Listed issues");
                return matched;
            }
        }

        let mut projects = self.projects.write().await;
        let issues = projects.entry(project.to_string()).or_default();
        debug!(project, "Registered project on first list");
        filter.apply(issues)
    }

    /// Create an issue from a request body.
    ///
    /// Client-supplied `_id`, `created_on` and `updated_on` are ignored.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::RequiredFieldsMissing` if `issue_title`,
    /// `issue_text` or `created_by` is absent. Nothing is stored and no
    /// identifier is consumed in that case.
    pub async fn create(&self, project: &str, body: &FieldMap) -> Result<Issue, TrackerError> {
        let mut projects = self.projects.write().await;
        let issues = projects.entry(project.to_string()).or_default();

        let missing: Vec<&'static str> = IssueField::REQUIRED
            .iter()
            .filter(|field| present(body, field.as_str()).is_none())
            .map(IssueField::as_str)
            .collect();
        if !missing.is_empty() {
            debug!(project, ?missing, "Rejected create");
            return Err(TrackerError::RequiredFieldsMissing { missing });
        }

        let now = now_millis();
        let mut issue = Issue {
            assigned_to: String::new(),
            status_text: String::new(),
            open: true,
            id: self.next_id.fetch_add(1, Ordering::SeqCst).to_string(),
            issue_title: String::new(),
            issue_text: String::new(),
            created_by: String::new(),
            created_on: now,
            updated_on: now,
        };
        for field in IssueField::WRITABLE {
            if let Some(value) = present(body, field.as_str()) {
                issue.set_field(field, field.coerce(value));
            }
        }

        debug!(project, id = %issue.id, "Created issue");
        issues.push(issue.clone());
        Ok(issue)
    }

    /// Apply a partial update.
    ///
    /// A supplied value is written only when it differs from the field's
    /// schema default as sent, so `""` never clears `assigned_to` or
    /// `status_text` and JSON `true` never reopens an issue. The string
    /// `"true"` (as sent by forms) does reopen it. `updated_on` is always
    /// refreshed.
    ///
    /// # Errors
    ///
    /// - `MissingId` if the body has no `_id`
    /// - `NoUpdateFields` if `_id` is the only key
    /// - `UpdateFailed` if no issue in `project` has that identifier
    pub async fn update(
        &self,
        project: &str,
        body: &FieldMap,
    ) -> Result<Acknowledgement, TrackerError> {
        let mut projects = self.projects.write().await;
        let issues = projects.entry(project.to_string()).or_default();

        let id = present(body, ID_KEY).cloned().ok_or(TrackerError::MissingId)?;
        if body.len() == 1 {
            return Err(TrackerError::NoUpdateFields { id });
        }
        let Some(issue) = find_position(issues, &id).and_then(|pos| issues.get_mut(pos)) else {
            debug!(project, %id, "Update target not found");
            return Err(TrackerError::UpdateFailed { id });
        };

        let mut changed = Vec::new();
        for field in IssueField::WRITABLE {
            let Some(raw) = present(body, field.as_str()) else {
                continue;
            };
            if *raw == field.default_value() {
                continue;
            }
            issue.set_field(field, field.coerce(raw));
            changed.push(field.as_str());
        }
        issue.updated_on = issue.updated_on.max(now_millis());

        debug!(project, id = %issue.id, ?changed, "Updated issue");
        Ok(Acknowledgement::updated(id))
    }

    /// Remove an issue, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// - `MissingId` if the body has no `_id`
    /// - `DeleteFailed` if no issue in `project` has that identifier
    pub async fn delete(
        &self,
        project: &str,
        body: &FieldMap,
    ) -> Result<Acknowledgement, TrackerError> {
        let mut projects = self.projects.write().await;
        let issues = projects.entry(project.to_string()).or_default();

        let id = present(body, ID_KEY).cloned().ok_or(TrackerError::MissingId)?;
        let Some(pos) = find_position(issues, &id) else {
            debug!(project, %id, "Delete target not found");
            return Err(TrackerError::DeleteFailed { id });
        };

        let removed = issues.remove(pos);
        debug!(project, id = %removed.id, "Deleted issue");
        Ok(Acknowledgement::deleted(id))
    }

}

/// A body value that counts as supplied (`null` counts as absent).
fn present<'a>(body: &'a FieldMap, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|value| !value.is_null())
}

fn find_position(issues: &[Issue], id: &Value) -> Option<usize> {
    let key = id_key(id)?;
    issues.iter().position(|issue| issue.id == key)
}
