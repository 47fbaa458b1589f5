//! # gradecheck-core
//!
//! Deterministic composite-schema construction and validation for grader
//! configuration documents.
//!
//! A grading run is described by an ordered list of step descriptors; each
//! step names a pluggable grader and carries a `configuration` sub-object
//! whose shape only that grader knows. This crate turns the per-grader
//! parameter declarations into a single composite JSON Schema with one
//! conditional branch per grader, validates a parsed document against it,
//! and aggregates every structural violation into one report.
//!
//! ## Key guarantees
//!
//! 1. **Deterministic**: the composite schema is a pure function of the
//!    registry and the fetched grader schemas.
//! 2. **No I/O**: schema retrieval lives in `gradecheck-runtime`; this
//!    crate never touches the network or the clock.
//! 3. **Fail-complete reporting**: a failing run cites every violation
//!    found, each with its document path.
//! 4. **Fatal before misleading**: registry and retrieval problems abort
//!    the run before validation, so they can never surface as "valid".
//!
//! ## Example
//!
//! ```rust,ignore
//! use gradecheck_core::{build_composite_schema, validate, GraderRegistry};
//!
//! let registry = GraderRegistry::from_yaml_file("graders.yaml")?;
//! let schema = build_composite_schema(&registry, &schemas)?;
//! let outcome = validate(&schema, &document)?;
//! match outcome.report() {
//!     None => println!("configuration is valid"),
//!     Some(report) => eprintln!("{report}"),
//! }
//! ```

pub mod document;
pub mod error;
pub mod registry;
pub mod schema;
pub mod validate;

pub use document::DocumentError;
pub use error::PipelineError;
pub use registry::{GraderEntry, GraderRegistry, RegistryError};
pub use schema::{
    adapt, assemble, compose, decode_grader_schema, translate, CompositeSchema, ConditionalRule,
    DecodeError, GraderSchema, ParameterDescriptor,
};
pub use validate::{validate, StructuralViolation, ValidationOutcome};

use std::collections::BTreeMap;

/// Compose and assemble the composite schema for a registry and its
/// collected grader schemas.
///
/// Pure fan-in: callers fetch the schemas however they like (see
/// `gradecheck-runtime` for the HTTP edge) and join them here. Every
/// registry grader must have an entry in `schemas`.
pub fn build_composite_schema(
    registry: &GraderRegistry,
    schemas: &BTreeMap<String, GraderSchema>,
) -> Result<CompositeSchema, PipelineError> {
    let conditionals = schema::compose(registry, schemas)?;
    tracing::debug!(rules = conditionals.len(), "assembling composite schema");
    Ok(schema::assemble(registry, &conditionals))
}


#[cfg(test)]
mod determinism {
    use super::*;
    use proptest::prelude::*;

    fn arb_descriptor() -> impl Strategy<Value = ParameterDescriptor> {
        prop_oneof![
            (
                proptest::option::of(-1000i64..1000),
                proptest::option::of(-1000i64..1000),
                proptest::option::of(1i64..100),
                proptest::option::of(-1000i64..1000),
            )
                .prop_map(|(min, max, step, initial)| ParameterDescriptor::Integer {
                    min,
                    max,
                    step,
                    initial
                }),
            proptest::option::of("[a-z]{0,8}")
                .prop_map(|initial| ParameterDescriptor::Text { initial }),
            Just(ParameterDescriptor::GitReference),
        ]
    }

    fn arb_grader_schema() -> impl Strategy<Value = GraderSchema> {
        prop_oneof![
            Just(GraderSchema::NonConfigurable),
            proptest::collection::btree_map("[a-z]{1,8}", arb_descriptor(), 0..4)
                .prop_map(GraderSchema::Configurable),
        ]
    }

    proptest! {
        #[test]
        fn composite_schema_is_a_pure_function_of_its_inputs(
            schemas in proptest::collection::btree_map("[a-z-]{1,12}", arb_grader_schema(), 0..6)
        ) {
            let registry = GraderRegistry::new(
                schemas.keys().map(|name| (name.clone(), None)),
            ).unwrap();

            let first = build_composite_schema(&registry, &schemas).unwrap();
            let second = build_composite_schema(&registry, &schemas).unwrap();

            prop_assert_eq!(first.as_value(), second.as_value());
        }
    }
}
