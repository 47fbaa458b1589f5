//! In-memory schema source for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use crate::source::{SchemaFetch, SchemaSource, SourceError};

type ErrorFactory = Box<dyn Fn() -> SourceError + Send + Sync>;

enum MockResponse {
    Payload(Value),
    NotFound,
    Error(ErrorFactory),
}

/// Scripted schema source: each endpoint answers with a fixed payload,
/// not-found, or a freshly built error. Fetching an unscripted endpoint
/// panics, so tests catch unexpected retrievals.
#[derive(Default)]
pub struct MockSource {
    responses: HashMap<String, MockResponse>,
    calls: AtomicUsize,
}

impl MockSource {
    pub fn with_payload(mut self, endpoint: &str, payload: Value) -> Self {
        self.responses
            .insert(endpoint.to_string(), MockResponse::Payload(payload));
        self
    }

    pub fn with_not_found(mut self, endpoint: &str) -> Self {
        self.responses
            .insert(endpoint.to_string(), MockResponse::NotFound);
        self
    }

    pub fn with_error(
        mut self,
        endpoint: &str,
        factory: impl Fn() -> SourceError + Send + Sync + 'static,
    ) -> Self {
        self.responses
            .insert(endpoint.to_string(), MockResponse::Error(Box::new(factory)));
        self
    }

    /// Number of fetches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaSource for MockSource {
    async fn fetch(&self, endpoint: &str) -> Result<SchemaFetch, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.responses.get(endpoint) {
            Some(MockResponse::Payload(payload)) => Ok(SchemaFetch::Found(payload.clone())),
            Some(MockResponse::NotFound) => Ok(SchemaFetch::NotFound),
            Some(MockResponse::Error(factory)) => Err(factory()),
            None => panic!("unscripted fetch of {endpoint}"),
        }
    }
}
