//! HTTP-backed identifier source.

use std::time::Duration;

use async_trait::async_trait;
use idwatch_core::IdentifierList;
use reqwest::header::ACCEPT;
use tracing::debug;

use crate::client::IdSource;
use crate::error::SourceError;

/// Reads the identifier list with a GET request.
///
/// The response body must be a JSON array of non-negative integers and
/// nothing else, e.g. `[1,2,3,7]`.
#[derive(Debug, Clone)]
pub struct HttpIdSource {
    url: String,
    client: reqwest::Client,
}

impl HttpIdSource {
    /// Create a source for `url`. Every request is bounded by `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    fn transport(&self, source: reqwest::Error) -> SourceError {
        SourceError::Transport {
            url: self.url.clone(),
            source,
        }
    }
}

#[async_trait]
impl IdSource for HttpIdSource {
    async fn fetch(&self) -> Result<IdentifierList, SourceError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| self.transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response.bytes().await.map_err(|e| self.transport(e))?;
        let ids: IdentifierList =
            serde_json::from_slice(&body).map_err(|source| SourceError::Decode {
                url: self.url.clone(),
                source,
            })?;

        debug!(url = %self.url, count = ids.len(), "fetched ids");
        Ok(ids)
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
