//! # gradecheck-runtime
//!
//! The I/O edge of gradecheck: concurrent retrieval of grader schemas and
//! the end-to-end validation pipeline.
//!
//! `gradecheck-core` is pure and synchronous; this crate supplies what it
//! deliberately leaves out — fetching each registered grader's
//! configuration schema from its endpoint (fan-out, bounded per-request
//! timeout) and joining the results before composition.
//!
//! ## Failure policy
//!
//! A registry entry without an endpoint, or an endpoint answering 404, is
//! treated as a non-configurable grader. Any other retrieval failure
//! (connect error, timeout, failure status, unparseable body) aborts the
//! whole run — a default schema is never substituted.
//!
//! ## Example
//!
//! ```rust,ignore
//! use gradecheck_runtime::{run, HttpSchemaSource};
//! use gradecheck_core::{document, GraderRegistry};
//!
//! let registry = GraderRegistry::from_yaml_file("graders.yaml")?;
//! let document = document::from_yaml_file("grader-config.yml")?;
//! let source = HttpSchemaSource::new()?;
//!
//! match run(&source, &registry, &document).await?.report() {
//!     None => println!("configuration is valid"),
//!     Some(report) => eprintln!("{report}"),
//! }
//! ```

pub mod fetch;
pub mod http;
pub mod source;

#[cfg(test)]
mod testing;

pub use fetch::collect_schemas;
pub use http::{HttpSchemaSource, DEFAULT_TIMEOUT};
pub use source::{SchemaFetch, SchemaSource, SourceError};

use serde_json::Value;

use gradecheck_core::{
    build_composite_schema, validate, GraderRegistry, PipelineError, ValidationOutcome,
};

/// Run the whole pipeline: collect every grader's schema, build the
/// composite schema, and validate the parsed document against it.
///
/// Fatal errors (retrieval, unsupported parameter kinds) surface before
/// validation ever runs.
pub async fn run(
    source: &dyn SchemaSource,
    registry: &GraderRegistry,
    document: &Value,
) -> Result<ValidationOutcome, PipelineError> {
    let schemas = collect_schemas(source, registry).await?;
    tracing::info!(
        graders = registry.len(),
        "collected grader schemas, validating document"
    );

    let schema = build_composite_schema(registry, &schemas)?;
    validate(&schema, document)
}
