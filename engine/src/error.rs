use std::time::Duration;
use thiserror::Error;

/// Failure taxonomy for the analysis pipeline.
///
/// Only `InvalidInput` escapes the orchestrator; every other variant is
/// transient and absorbed into the heuristic fallback path.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid match input: {0}")]
    InvalidInput(String),

    #[error("completion endpoint returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("completion request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),

    #[error("stats source failure: {0}")]
    Stats(String),
}

impl PredictError {
    /// True for errors the orchestrator converts into a fallback prediction.
    pub fn is_transient(&self) -> bool {
        !matches!(self, PredictError::InvalidInput(_))
    }
}

/// Cap a payload echoed into an error message at `max` bytes, backing off
/// to the previous char boundary so multibyte text never splits mid-char.
pub fn truncate_for_log(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
