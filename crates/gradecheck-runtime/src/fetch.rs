//! Concurrent schema collection over the registry.

use std::collections::BTreeMap;

use futures::future;

use gradecheck_core::{decode_grader_schema, GraderRegistry, GraderSchema, PipelineError};

use crate::source::{SchemaFetch, SchemaSource, SourceError};

/// Fetch and decode the schema of every registered grader.
///
/// Retrievals fan out concurrently; there is no ordering dependency between
/// distinct graders, only between "all retrievals complete" and
/// composition. A grader without an endpoint never hits the source. A
/// remote not-found downgrades to [`GraderSchema::NonConfigurable`] —
/// indistinguishable from a grader declaring itself non-configurable — but
/// any other failure fails the whole run; in-flight siblings finish and
/// their results are discarded.
pub async fn collect_schemas<S: SchemaSource + ?Sized>(
    source: &S,
    registry: &GraderRegistry,
) -> Result<BTreeMap<String, GraderSchema>, PipelineError> {
    let fetches = registry.entries().iter().map(|entry| async move {
        let schema = match &entry.endpoint {
            None => GraderSchema::NonConfigurable,
            Some(endpoint) => fetch_one(source, &entry.name, endpoint).await?,
        };
        Ok::<_, PipelineError>((entry.name.clone(), schema))
    });

    future::join_all(fetches).await.into_iter().collect()
}

async fn fetch_one<S: SchemaSource + ?Sized>(
    source: &S,
    grader: &str,
    endpoint: &str,
) -> Result<GraderSchema, PipelineError> {
    match source.fetch(endpoint).await {
        Ok(SchemaFetch::Found(payload)) => decode_grader_schema(grader, endpoint, &payload),
        Ok(SchemaFetch::NotFound) => {
            tracing::warn!(grader, endpoint, "schema endpoint not found, treating grader as non-configurable");
            Ok(GraderSchema::NonConfigurable)
        }
        Err(e) => {
            tracing::error!(grader, endpoint, error = %e, "schema retrieval failed");
            Err(retrieval_error(grader, endpoint, e))
        }
    }
}

fn retrieval_error(grader: &str, endpoint: &str, cause: SourceError) -> PipelineError {
    PipelineError::SchemaRetrieval {
        grader: grader.to_string(),
        endpoint: endpoint.to_string(),
        cause: cause.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockSource;
    use serde_json::json;
    use std::time::Duration;

    #[tokio::test]
    async fn test_endpointless_grader_skips_the_source() {
        let source = MockSource::default();
        let registry = GraderRegistry::new([("manual-grader".to_string(), None)]).unwrap();

        let schemas = collect_schemas(&source, &registry).await.unwrap();
        assert_eq!(schemas["manual-grader"], GraderSchema::NonConfigurable);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_not_found_matches_explicit_non_configurable() {
        let source = MockSource::default()
            .with_not_found("http://a/config_schema")
            .with_payload("http://b/config_schema", json!({ "parameters": 0 }));
        let registry = GraderRegistry::new([
            ("absent".to_string(), Some("http://a/config_schema".to_string())),
            ("explicit".to_string(), Some("http://b/config_schema".to_string())),
        ])
        .unwrap();

        let schemas = collect_schemas(&source, &registry).await.unwrap();
        assert_eq!(schemas["absent"], schemas["explicit"]);
    }

    #[tokio::test]
    async fn test_timeout_is_fatal_not_a_downgrade() {
        let source =
            MockSource::default().with_error("http://a/config_schema", || {
                SourceError::Timeout(Duration::from_secs(10))
            });
        let registry = GraderRegistry::new([(
            "junit-grader".to_string(),
            Some("http://a/config_schema".to_string()),
        )])
        .unwrap();

        let result = collect_schemas(&source, &registry).await;
        assert!(matches!(
            result,
            Err(PipelineError::SchemaRetrieval { grader, endpoint, cause })
                if grader == "junit-grader"
                    && endpoint == "http://a/config_schema"
                    && cause.contains("timed out")
        ));
    }

    #[tokio::test]
    async fn test_failure_status_is_fatal() {
        let source = MockSource::default()
            .with_error("http://a/config_schema", || SourceError::Status { status: 500 });
        let registry = GraderRegistry::new([(
            "junit-grader".to_string(),
            Some("http://a/config_schema".to_string()),
        )])
        .unwrap();

        let result = collect_schemas(&source, &registry).await;
        assert!(matches!(result, Err(PipelineError::SchemaRetrieval { .. })));
    }

    #[tokio::test]
    async fn test_sibling_results_discarded_on_failure() {
        // One healthy grader, one broken one: the run fails as a whole.
        let source = MockSource::default()
            .with_payload("http://ok/config_schema", json!({ "parameters": 0 }))
            .with_error("http://broken/config_schema", || SourceError::Connect("refused".into()));
        let registry = GraderRegistry::new([
            ("ok".to_string(), Some("http://ok/config_schema".to_string())),
            ("broken".to_string(), Some("http://broken/config_schema".to_string())),
        ])
        .unwrap();

        let result = collect_schemas(&source, &registry).await;
        assert!(matches!(
            result,
            Err(PipelineError::SchemaRetrieval { grader, .. }) if grader == "broken"
        ));
    }

    #[tokio::test]
    async fn test_unsupported_kind_surfaces_from_decode() {
        let source = MockSource::default().with_payload(
            "http://a/config_schema",
            json!({ "parameters": { "flags": { "type": "boolean" } } }),
        );
        let registry = GraderRegistry::new([(
            "junit-grader".to_string(),
            Some("http://a/config_schema".to_string()),
        )])
        .unwrap();

        let result = collect_schemas(&source, &registry).await;
        assert!(matches!(
            result,
            Err(PipelineError::UnsupportedParameterKind { grader, parameter, kind })
                if grader == "junit-grader" && parameter == "flags" && kind == "boolean"
        ));
    }
}
