//! Typed failure reasons for enrichment fetches.

use thiserror::Error;

/// Why a fetch produced no data. Callers downgrade this to an absent
/// enrichment at the orchestration boundary; it never propagates further.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No credential configured; detected before any network I/O.
    #[error("missing API credential")]
    MissingCredential,

    /// The upstream answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// Connect, TLS, or timeout failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The body did not match the expected shape.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
}

impl FetchError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => Self::Status(status.as_u16()),
            None => Self::Transport(err.to_string()),
        }
    }
}
