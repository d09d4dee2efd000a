//! Core data types for `issue_board`.
//!
//! This module defines:
//! - `Issue` - The tracked record, serialized with its wire field names
//! - `IssueField` - The closed set of recognized field names
//! - Coercion of loosely typed request values into issue fields

use crate::error::BoardError;
use crate::util::time::{format_timestamp, wire_format};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// A recognized issue field.
///
/// Request keys outside this set are ignored everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IssueField {
    AssignedTo,
    StatusText,
    Open,
    Id,
    IssueTitle,
    IssueText,
    CreatedBy,
    CreatedOn,
    UpdatedOn,
}

impl IssueField {
    /// Every recognized field, in wire order.
    pub const ALL: [Self; 9] = [
        Self::AssignedTo,
        Self::StatusText,
        Self::Open,
        Self::Id,
        Self::IssueTitle,
        Self::IssueText,
        Self::CreatedBy,
        Self::CreatedOn,
        Self::UpdatedOn,
    ];

    /// Fields that must be present when creating an issue.
    pub const REQUIRED: [Self; 3] = [Self::IssueTitle, Self::IssueText, Self::CreatedBy];

    /// Fields a client may write through create or update.
    pub const WRITABLE: [Self; 6] = [
        Self::AssignedTo,
        Self::StatusText,
        Self::Open,
        Self::IssueTitle,
        Self::IssueText,
        Self::CreatedBy,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AssignedTo => "assigned_to",
            Self::StatusText => "status_text",
            Self::Open => "open",
            Self::Id => "_id",
            Self::IssueTitle => "issue_title",
            Self::IssueText => "issue_text",
            Self::CreatedBy => "created_by",
            Self::CreatedOn => "created_on",
            Self::UpdatedOn => "updated_on",
        }
    }

    /// The schema placeholder value for this field, as request JSON.
    ///
    /// Updates skip a supplied value identical to this placeholder. The
    /// comparison is on the raw value, so the form string `"true"` is not
    /// the placeholder of `open` and still reopens an issue.
    #[must_use]
    pub fn default_value(&self) -> Value {
        match self {
            Self::Open => Value::Bool(true),
            _ => Value::String(String::new()),
        }
    }

    /// Coerce a request value into this field's type.
    #[must_use]
    pub fn coerce(&self, value: &Value) -> FieldValue {
        match self {
            Self::Open => FieldValue::Flag(coerce_flag(value)),
            _ => FieldValue::Text(coerce_text(value)),
        }
    }
}

impl fmt::Display for IssueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IssueField {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| BoardError::UnknownField {
                name: s.to_string(),
            })
    }
}

/// A typed field value after coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Render a request value as field text.
///
/// Strings are taken verbatim; everything else uses its compact JSON text.
#[must_use]
pub fn coerce_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Interpret a request value as the `open` flag.
///
/// Only `false` (boolean or string) closes an issue.
#[must_use]
pub fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.trim().eq_ignore_ascii_case("false"),
        _ => true,
    }
}

/// Render a request `_id` as a lookup key.
///
/// Strings and numbers can address an issue; other JSON types cannot.
/// Integral floats address the same issue as the integer (`1.0` is `"1"`).
#[must_use]
pub fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(match number.as_f64() {
            Some(float) if number.is_f64() && float.is_finite() && float.fract() == 0.0 => {
                format!("{float:.0}")
            }
            _ => number.to_string(),
        }),
        _ => None,
    }
}

/// A tracked issue within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Issue {
    /// Assignee (empty when unassigned).
    pub assigned_to: String,

    /// Free-form status line.
    pub status_text: String,

    /// Whether the issue is still open.
    pub open: bool,

    /// Process-unique identifier.
    #[serde(rename = "_id")]
    pub id: String,

    pub issue_title: String,

    pub issue_text: String,

    pub created_by: String,

    /// Creation timestamp, never modified.
    #[serde(with = "wire_format")]
    #[schemars(with = "String")]
    pub created_on: DateTime<Utc>,

    /// Last update timestamp.
    #[serde(with = "wire_format")]
    #[schemars(with = "String")]
    pub updated_on: DateTime<Utc>,
}

impl Issue {
    /// Canonical text of a field, as compared by list filters.
    #[must_use]
    pub fn field_text(&self, field: IssueField) -> String {
        match field {
            IssueField::AssignedTo => self.assigned_to.clone(),
            IssueField::StatusText => self.status_text.clone(),
            IssueField::Open => self.open.to_string(),
            IssueField::Id => self.id.clone(),
            IssueField::IssueTitle => self.issue_title.clone(),
            IssueField::IssueText => self.issue_text.clone(),
            IssueField::CreatedBy => self.created_by.clone(),
            IssueField::CreatedOn => format_timestamp(&self.created_on),
            IssueField::UpdatedOn => format_timestamp(&self.updated_on),
        }
    }

    /// Overwrite a writable field.
    ///
    /// Identifier and timestamps are owned by the store and are left untouched.
    pub fn set_field(&mut self, field: IssueField, value: FieldValue) {
        match (field, value) {
            (IssueField::Open, FieldValue::Flag(flag)) => self.open = flag,
            (IssueField::AssignedTo, FieldValue::Text(text)) => self.assigned_to = text,
            (IssueField::StatusText, FieldValue::Text(text)) => self.status_text = text,
            (IssueField::IssueTitle, FieldValue::Text(text)) => self.issue_title = text,
            (IssueField::IssueText, FieldValue::Text(text)) => self.issue_text = text,
            (IssueField::CreatedBy, FieldValue::Text(text)) => self.created_by = text,
            _ => {}
        }
    }
}
