//! Structured error output for the command line.
//!
//! Provides machine-parseable error information with:
//! - Error codes for categorization
//! - Hints for self-correction
//! - Context for debugging

use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Machine-readable error codes.
///
/// These codes are stable. Format: `SCREAMING_SNAKE_CASE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Configuration value rejected
    ConfigError,
    /// Config file not found
    ConfigNotFound,
    /// Config file could not be parsed
    ConfigParseError,
    /// Unknown issue field name
    UnknownField,
    /// Listener could not bind
    BindError,
    /// File or socket I/O error
    IoError,
    /// JSON serialization error
    JsonError,
    /// Unexpected internal error
    InternalError,
}

impl ErrorCode {
    /// Get the string representation for JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ConfigError => "CONFIG_ERROR",
            Self::ConfigNotFound => "CONFIG_NOT_FOUND",
            Self::ConfigParseError => "CONFIG_PARSE_ERROR",
            Self::UnknownField => "UNKNOWN_FIELD",
            Self::BindError => "BIND_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

/// Structured error for machine-parseable output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional hint for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Additional context data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
}

impl StructuredError {
    /// Create a new structured error from a `BoardError`.
    #[must_use]
    pub fn from_error(err: &BoardError) -> Self {
        let (code, context) = match err {
            BoardError::Config(_) | BoardError::Logging(_) => (ErrorCode::ConfigError, None),
            BoardError::ConfigNotFound { path } => (
                ErrorCode::ConfigNotFound,
                Some(json!({"path": path.display().to_string()})),
            ),
            BoardError::Yaml(_) => (ErrorCode::ConfigParseError, None),
            BoardError::UnknownField { name } => {
                (ErrorCode::UnknownField, Some(json!({"field": name})))
            }
            BoardError::Bind { addr, .. } => (
                ErrorCode::BindError,
                Some(json!({"addr": addr.to_string()})),
            ),
            BoardError::Io(_) => (ErrorCode::IoError, None),
            BoardError::Json(_) => (ErrorCode::JsonError, None),
            BoardError::Other(_) => (ErrorCode::InternalError, None),
        };

        Self {
            code,
            message: err.to_string(),
            hint: err.suggestion().map(str::to_string),
            context,
        }
    }

    /// Format as JSON for structured output.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "error": {
                "code": self.code.as_str(),
                "message": self.message,
                "hint": self.hint,
                "context": self.context,
            }
        })
    }

    /// Format for human-readable output.
    #[must_use]
    pub fn to_human(&self, color: bool) -> String {
        let mut output = String::new();

        if color {
            output.push_str("\x1b[31mError:\x1b[0m ");
        } else {
            output.push_str("Error: ");
        }
        output.push_str(&self.message);

        if let Some(hint) = &self.hint {
            output.push('\n');
            if color {
                output.push_str("\x1b[33mHint:\x1b[0m ");
            } else {
                output.push_str("Hint: ");
            }
            output.push_str(hint);
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_config_not_found_has_path_context() {
        let err = BoardError::ConfigNotFound {
            path: PathBuf::from("/tmp/board.yaml"),
        };
        let structured = StructuredError::from_error(&err);
        assert_eq!(structured.code, ErrorCode::ConfigNotFound);
        let json = structured.to_json();
        assert_eq!(json["error"]["code"], "CONFIG_NOT_FOUND");
        assert_eq!(json["error"]["context"]["path"], "/tmp/board.yaml");
        assert!(json["error"]["hint"].is_string());
    }

    #[test]
    fn test_human_output_without_color() {
        let err = BoardError::config("bad value");
        let text = StructuredError::from_error(&err).to_human(false);
        assert!(text.starts_with("Error: Configuration error: bad value"));
        assert!(text.contains("\nHint: "));
    }

    #[test]
    fn test_internal_error_has_no_hint() {
        let err = BoardError::Other(anyhow::anyhow!("boom"));
        let structured = StructuredError::from_error(&err);
        assert_eq!(structured.code, ErrorCode::InternalError);
        assert!(structured.hint.is_none());
        assert_eq!(structured.to_human(false), "Error: boom");
    }
}
