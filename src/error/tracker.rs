//! Logical failures of issue requests.
//!
//! Every variant is reported to the client with HTTP 200 and a JSON body
//! of the form `{"error": <message>}`, plus `"_id"` echoing the request
//! identifier where one was supplied.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A request-level failure from the issue store.
///
/// The `Display` text is the exact wire message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// Create was missing one or more required fields.
    #[error("required field(s) missing")]
    RequiredFieldsMissing { missing: Vec<&'static str> },

    /// Update or delete without an identifier.
    #[error("missing _id")]
    MissingId,

    /// Update carrying nothing but the identifier.
    #[error("no update field(s) sent")]
    NoUpdateFields { id: Value },

    /// Update target does not exist in the project.
    #[error("could not update")]
    UpdateFailed { id: Value },

    /// Delete target does not exist in the project.
    #[error("could not delete")]
    DeleteFailed { id: Value },
}

impl TrackerError {
    /// The request identifier echoed back to the client, if any.
    #[must_use]
    pub const fn echoed_id(&self) -> Option<&Value> {
        match self {
            Self::NoUpdateFields { id } | Self::UpdateFailed { id } | Self::DeleteFailed { id } => {
                Some(id)
            }
            Self::RequiredFieldsMissing { .. } | Self::MissingId => None,
        }
    }

    #[must_use]
    pub fn payload(&self) -> ErrorPayload {
        ErrorPayload {
            error: self.to_string(),
            id: self.echoed_id().cloned(),
        }
    }
}

/// Wire shape of a failed request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPayload {
    pub error: String,
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_fields_payload_has_no_id() {
        let err = TrackerError::RequiredFieldsMissing {
            missing: vec!["created_by"],
        };
        let payload = serde_json::to_value(err.payload()).unwrap();
        assert_eq!(payload, json!({"error": "required field(s) missing"}));
    }

    #[test]
    fn test_missing_id_payload() {
        let payload = serde_json::to_value(TrackerError::MissingId.payload()).unwrap();
        assert_eq!(payload, json!({"error": "missing _id"}));
    }

    #[test]
    fn test_echoing_variants() {
        let cases = [
            (
                TrackerError::NoUpdateFields { id: json!("4") },
                "no update field(s) sent",
            ),
            (
                TrackerError::UpdateFailed { id: json!("4") },
                "could not update",
            ),
            (
                TrackerError::DeleteFailed { id: json!("4") },
                "could not delete",
            ),
        ];
        for (err, message) in cases {
            let payload = serde_json::to_value(err.payload()).unwrap();
            assert_eq!(payload, json!({"error": message, "_id": "4"}));
        }
    }

    #[test]
    fn test_echo_preserves_request_type() {
        let err = TrackerError::DeleteFailed { id: json!(12) };
        assert_eq!(err.echoed_id(), Some(&json!(12)));
    }
}
