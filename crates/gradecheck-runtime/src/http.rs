//! HTTP schema source backed by reqwest.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::source::{SchemaFetch, SchemaSource, SourceError};

/// Default per-endpoint retrieval timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches grader schemas over HTTP.
///
/// Every request carries a bounded timeout so a non-responsive endpoint
/// cannot stall the run; a timeout is a fatal retrieval failure, never
/// treated as not-found.
#[derive(Debug, Clone)]
pub struct HttpSchemaSource {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpSchemaSource {
    /// Create a source with the default timeout.
    pub fn new() -> Result<Self, SourceError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a source with a custom per-request timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Client(e.to_string()))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl SchemaSource for HttpSchemaSource {
    async fn fetch(&self, endpoint: &str) -> Result<SchemaFetch, SourceError> {
        tracing::debug!(endpoint, "fetching grader schema");

        let response = self.client.get(endpoint).send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout)
            } else {
                SourceError::Connect(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(SchemaFetch::NotFound);
        }
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
            });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        Ok(SchemaFetch::Found(payload))
    }
}
