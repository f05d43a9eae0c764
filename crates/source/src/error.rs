//! Source client error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("unable to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP client setup failed: {0}")]
    Client(#[source] reqwest::Error),
}

impl SourceError {
    /// `true` when the endpoint answered but the body was not an identifier array.
    ///
    /// Everything else (connect, timeout, non-2xx) is a transport failure.
    pub fn is_decode(&self) -> bool {
        matches!(self, SourceError::Decode { .. })
    }
}
