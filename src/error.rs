//! Error types for the data-fetch pipeline.
//!
//! Geometry problems are deliberately absent from this taxonomy: a malformed
//! boundary payload is absorbed by the normalizer (logged and rendered as "no
//! boundary"), never surfaced as an error value.

use thiserror::Error;

/// Failure modes of a single fetch against the geo-data service.
///
/// There are no retries anywhere in the pipeline; every failure is surfaced to
/// the caller immediately and the cascade controller decides how to degrade.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced an HTTP response (DNS, connect, timeout...).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("HTTP status {status}")]
    Http {
        /// The numeric status code.
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("malformed JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered 2xx but its envelope carried `success: false`.
    #[error("service reported failure")]
    Service,
}

impl FetchError {
    /// Classifies a `reqwest::Error` into the taxonomy.
    ///
    /// Errors that carry a status code map to [`FetchError::Http`]; everything
    /// else (connect, timeout, body read) is a transport failure.
    pub(crate) fn from_reqwest(error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => FetchError::Http {
                status: status.as_u16(),
            },
            None => FetchError::Transport(error),
        }
    }
}
