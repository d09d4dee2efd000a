//! Lenient request decoding.
//!
//! Issue requests never fail at the transport level: a body or query that
//! cannot be decoded is treated as empty and the store reports the logical
//! error (for example `missing _id`).

use crate::storage::{FieldMap, IssueFilter};
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{Form, FromRequest, Query, Request};
use axum::http::Uri;
use axum::http::header::CONTENT_TYPE;
use serde_json::Value;
use std::collections::HashMap;
use std::convert::Infallible;
use tracing::warn;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Request body decoded as a field map.
///
/// URL-encoded forms become string values; any other non-empty body is
/// parsed as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestFields(pub FieldMap);

#[async_trait]
impl<S> FromRequest<S> for RequestFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_form(&req) {
            return Ok(match Form::<Vec<(String, String)>>::from_request(req, state).await {
                Ok(Form(pairs)) => Self::from_pairs(pairs),
                Err(err) => {
                    warn!(error = %err, "Ignoring undecodable form body");
                    Self::default()
                }
            });
        }

        let bytes = match Bytes::from_request(req, state).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable request body");
                return Ok(Self::default());
            }
        };
        Ok(Self::from_json_bytes(&bytes))
    }
}

impl RequestFields {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        )
    }

    fn from_json_bytes(bytes: &[u8]) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }
        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Self(map),
            Ok(other) => {
                warn!(kind = json_kind(&other), "Ignoring non-object JSON body");
                Self::default()
            }
            Err(err) => {
                warn!(error = %err, "Ignoring malformed JSON body");
                Self::default()
            }
        }
    }
}

fn is_form(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with(FORM_CONTENT_TYPE))
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// List filter from the request query string.
///
/// An unparseable query string yields an empty filter.
#[must_use]
pub fn query_filter(uri: &Uri) -> IssueFilter {
    match Query::<HashMap<String, String>>::try_from_uri(uri) {
        Ok(Query(params)) => IssueFilter::from_pairs(params),
        Err(err) => {
            warn!(error = %err, "Ignoring undecodable query string");
            IssueFilter::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IssueField;
    use axum::body::Body;
    use serde_json::json;

    async fn decode(content_type: Option<&str>, body: &'static str) -> FieldMap {
        let mut builder = Request::builder().method("POST").uri("/api/issues/p");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        let req = builder.body(Body::from(body)).unwrap();
        let Ok(RequestFields(map)) = RequestFields::from_request(req, &()).await;
        map
    }

    #[tokio::test]
    async fn test_json_body() {
        let map = decode(Some("application/json"), r#"{"_id":"3","open":false}"#).await;
        assert_eq!(map.get("_id"), Some(&json!("3")));
        assert_eq!(map.get("open"), Some(&json!(false)));
    }

    #[tokio::test]
    async fn test_json_without_content_type() {
        let map = decode(None, r#"{"_id":"3"}"#).await;
        assert_eq!(map.get("_id"), Some(&json!("3")));
    }

    #[tokio::test]
    async fn test_form_body() {
        let map = decode(
            Some("application/x-www-form-urlencoded"),
            "issue_title=Hello+world&open=false",
        )
        .await;
        assert_eq!(map.get("issue_title"), Some(&json!("Hello world")));
        assert_eq!(map.get("open"), Some(&json!("false")));
    }

    #[tokio::test]
    async fn test_empty_and_malformed_bodies_are_empty() {
        assert!(decode(None, "").await.is_empty());
        assert!(decode(Some("application/json"), "  ").await.is_empty());
        assert!(decode(Some("application/json"), "{not json").await.is_empty());
        assert!(decode(Some("application/json"), "[1,2]").await.is_empty());
    }

    #[test]
    fn test_query_filter_drops_unknown_keys() {
        let uri: Uri = "/api/issues/p?issue_text=2&page=3".parse().unwrap();
        let filter = query_filter(&uri);
        assert_eq!(filter, IssueFilter::new().with(IssueField::IssueText, "2"));
    }

    #[test]
    fn test_query_filter_without_query() {
        let uri: Uri = "/api/issues/p".parse().unwrap();
        assert!(query_filter(&uri).is_empty());
    }
}
