//! momentum-fetch: best-effort external enrichment (weather, dog image)
//!
//! Every fetch returns a typed success/failure result; failures carry a
//! reason code and never escape as panics or unhandled transport faults.

pub mod dog;
pub mod error;
pub mod weather;

pub use dog::{breed_from_url, fetch_dog};
pub use error::FetchError;
pub use weather::fetch_weather;

use std::time::Duration;

/// Request ceiling for the enrichment fetches.
pub const ENRICHMENT_TIMEOUT_SECS: u64 = 10;

/// Client for the two enrichment endpoints, with the shared timeout.
pub fn enrichment_client() -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(ENRICHMENT_TIMEOUT_SECS))
        .build()
        .map_err(|e| FetchError::Transport(e.to_string()))
}

/// Downgrade a fetch outcome to an optional enrichment, logging the reason.
pub fn optional<T>(label: &str, outcome: Result<T, FetchError>) -> Option<T> {
    match outcome {
        Ok(v) => Some(v),
        Err(err) => {
            tracing::warn!(fetch = label, %err, "enrichment unavailable");
            None
        }
    }
}
