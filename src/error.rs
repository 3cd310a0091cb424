use std::fmt;

use thiserror::Error;

use crate::config::API_KEY_ENV_VAR;

/// Failures the bridge can surface for a single trip request.
///
/// The HTTP contract flattens every variant into a 500 with a message, but the
/// variant is kept around so callers can log and test which stage gave up.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Configuration(String),

    #[error("AI API error{}", status_suffix(.status))]
    Upstream {
        status: Option<u16>,
        #[source]
        source: Option<reqwest::Error>,
    },

    #[error("No content generated by the AI")]
    EmptyContent,

    #[error("Failed to parse travel plan: {0}")]
    Parse(String),

    #[error("Travel plan generation was cancelled")]
    Cancelled,

    #[error("{0}")]
    Unexpected(String),
}

/// Stable, payload-free tag for a [`BridgeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Configuration,
    Upstream,
    EmptyContent,
    Parse,
    Cancelled,
    Unexpected,
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Validation(_) => ErrorKind::Validation,
            BridgeError::Configuration(_) => ErrorKind::Configuration,
            BridgeError::Upstream { .. } => ErrorKind::Upstream,
            BridgeError::EmptyContent => ErrorKind::EmptyContent,
            BridgeError::Parse(_) => ErrorKind::Parse,
            BridgeError::Cancelled => ErrorKind::Cancelled,
            BridgeError::Unexpected(_) => ErrorKind::Unexpected,
        }
    }

    pub fn upstream_status(status: u16) -> Self {
        BridgeError::Upstream {
            status: Some(status),
            source: None,
        }
    }

    pub fn transport(source: reqwest::Error) -> Self {
        BridgeError::Upstream {
            status: None,
            source: Some(source),
        }
    }

    pub fn missing_api_key() -> Self {
        BridgeError::Configuration(format!(
            "Gemini API key is not configured. Set {API_KEY_ENV_VAR} or run `trip-planner config --api-key <KEY>`"
        ))
    }

    /// Whether a fresh attempt at the provider call could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            BridgeError::Upstream { status: None, .. } => true,
            BridgeError::Upstream {
                status: Some(status),
                ..
            } => is_retryable_status(*status),
            _ => false,
        }
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|status| format!(" (status {status})"))
        .unwrap_or_default()
}

pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Configuration => "configuration",
            ErrorKind::Upstream => "upstream",
            ErrorKind::EmptyContent => "empty_content",
            ErrorKind::Parse => "parse",
            ErrorKind::Cancelled => "cancelled",
            ErrorKind::Unexpected => "unexpected",
        };
        write!(f, "{label}")
    }
}
