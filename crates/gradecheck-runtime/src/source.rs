//! The schema-retrieval abstraction.
//!
//! Swapping the source out is how tests run without a network; the
//! asymmetric failure policy lives one level up in
//! [`fetch`](crate::fetch): not-found downgrades to non-configurable,
//! every other failure is fatal.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors from a schema source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The underlying client could not be constructed.
    #[error("HTTP client construction failed: {0}")]
    Client(String),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Connect(String),

    /// The endpoint did not answer within the configured bound.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The endpoint answered with a non-success status other than 404.
    #[error("endpoint answered with status {status}")]
    Status {
        /// The HTTP status code.
        status: u16,
    },

    /// The response body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Parse(String),
}

/// A successful fetch: either a schema payload or a definitive "this
/// endpoint has no schema".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaFetch {
    /// The endpoint served a schema payload (not yet decoded).
    Found(Value),

    /// The endpoint is known to have no schema (HTTP 404).
    NotFound,
}

/// Retrieves grader schema payloads by endpoint.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Fetch the schema payload served at `endpoint`.
    async fn fetch(&self, endpoint: &str) -> Result<SchemaFetch, SourceError>;
}
