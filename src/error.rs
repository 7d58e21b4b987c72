use std::path::PathBuf;

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CardKingdomError {
    #[error("invalid source {source_id:?}: {error}")]
    InvalidSource {
        source_id: String,
        #[source]
        error: url::ParseError,
    },

    #[error("HTTP client error: {0}")]
    Client(#[source] reqwest::Error),

    #[error("GET {target}: {error}")]
    Transport {
        target: String,
        #[source]
        error: reqwest::Error,
    },

    #[error("GET {target}: {status}: {body}")]
    Status {
        target: String,
        status: StatusCode,
        body: String,
    },

    #[error("open {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("decode {source_id}: {error}")]
    Decode {
        source_id: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("{target}: operation cancelled")]
    Cancelled { target: String },

    #[error("{target}: deadline exceeded")]
    DeadlineExceeded { target: String },

    #[error("invalid created_at timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    #[error("runtime error: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("task error: {0}")]
    Task(String),
}

impl CardKingdomError {
    /// True for an explicit cancellation or an expired deadline.
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            CardKingdomError::Cancelled { .. } | CardKingdomError::DeadlineExceeded { .. }
        )
    }

    /// HTTP status of a non-OK response, if that is what failed.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CardKingdomError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, CardKingdomError>;
