//! Error types and handling for `issue_board`.
//!
//! Two layers of errors live here:
//!
//! - `BoardError`: process-level failures (configuration, I/O, binding the
//!   listener). These end the current command.
//! - `TrackerError`: logical failures of an issue request. These never end
//!   the process; they are reported to the client as a JSON payload.

mod structured;
mod tracker;

pub use structured::{ErrorCode, StructuredError};
pub use tracker::{ErrorPayload, TrackerError};

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for `issue_board` operations.
#[derive(Error, Debug)]
pub enum BoardError {
    // === Configuration Errors ===
    /// Configuration value could not be used.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Config file named on the command line or in the environment is missing.
    #[error("Config file not found: '{path}'")]
    ConfigNotFound { path: PathBuf },

    // === Request Model Errors ===
    /// Name is not one of the recognized issue fields.
    #[error("Unknown issue field: {name}")]
    UnknownField { name: String },

    // === Server Errors ===
    /// Could not bind the HTTP listener.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Tracing subscriber could not be installed.
    #[error("Logging initialization failed: {0}")]
    Logging(String),

    // === I/O Errors ===
    /// File system or socket I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Wrapped anyhow error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BoardError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Human-friendly suggestion for fixing this error.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ConfigNotFound { .. } => Some("Check --config or ISSUE_BOARD_CONFIG"),
            Self::Bind { .. } => Some("Choose another address with --bind or ISSUE_BOARD_BIND"),
            Self::Yaml(_) => Some("Fix the YAML syntax in the config file"),
            Self::Config(_) => Some("Run: issue-board config to inspect the resolved settings"),
            _ => None,
        }
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

/// Result type using `BoardError`.
pub type Result<T> = std::result::Result<T, BoardError>;
