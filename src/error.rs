use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid capture: {0}")]
    Capture(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl DteError {
    pub fn capture(message: impl Into<String>) -> Self {
        DteError::Capture(message.into())
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            DteError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions.",
            ),
            DteError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Capture,
                e.to_string(),
                "Verify the capture is valid JSON with a top-level `samples` array.",
            ),
            DteError::Capture(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("not found") {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Verify the capture file exists; use an absolute path or run from the working directory.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Capture,
                        msg.to_string(),
                        "Inspect the capture document; run with --verbose for details.",
                    )
                }
            }
            DteError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("analyzer") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use --analyzers with a comma-separated subset of: color, typography, spacing.",
                    )
                } else if lower.contains("toml") || lower.contains("failed to read config") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Fix the config file syntax (TOML) or remove it to use built-in defaults.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check flags/paths and config values (thresholds must be positive).",
                    )
                }
            }
            DteError::Unknown(msg) => ErrorPayload::new(
                ErrorCategory::Unknown,
                msg.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, DteError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Capture,
    Io,
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
