//! Error types for console policy updates.

/// Errors produced while applying control updates or decoding inbound payloads.
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("invalid search pattern {pattern:?}: {source}")]
    InvalidSearch {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("page size must be greater than zero")]
    InvalidPageSize,

    #[error("JSON error: {0}")]
    Payload(#[from] serde_json::Error),
}
