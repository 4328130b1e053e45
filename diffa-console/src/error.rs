//! Error kinds for the console.
//!
//! Planner and renderer fail fast with a specific kind instead of letting an
//! arithmetic fault through; transport and decoding failures are surfaced
//! unchanged, with no local retry.

use chrono::{DateTime, Utc};

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("display width {width} leaves no room for data after the {label_width}-character label column")]
    InvalidWidth { width: usize, label_width: usize },
    #[error("invalid time range: {start} .. {end} (end must be after start and span at least one second per column)")]
    InvalidRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("invalid timestamp '{input}' (expected YYYYMMDDTHHMMSSZ): {source}")]
    InvalidTimestamp {
        input: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("invalid agent URL: {0}")]
    InvalidUrl(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },
    #[error("malformed agent response: {0}")]
    MalformedResponse(String),
    #[error("failed to decode agent response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;

impl ConsoleError {
    /// True for failures that happened talking to the agent rather than
    /// validating local input.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            ConsoleError::Transport(_)
                | ConsoleError::Status { .. }
                | ConsoleError::MalformedResponse(_)
                | ConsoleError::Decode(_)
        )
    }
}
