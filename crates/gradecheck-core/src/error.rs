//! Fatal pipeline errors.
//!
//! Structural violations found while validating a document are *not* errors
//! in this taxonomy; they are collected into a
//! [`ValidationOutcome`](crate::ValidationOutcome). Everything here aborts
//! the run before a verdict is produced, so a malformed registry or a
//! failed retrieval can never masquerade as "document is valid".

use thiserror::Error;

/// Errors that abort schema construction or validation.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A grader declared a parameter type the translator does not understand.
    #[error("grader `{grader}` declared parameter `{parameter}` with unsupported type `{kind}`")]
    UnsupportedParameterKind {
        /// Grader whose schema declared the parameter.
        grader: String,
        /// Name of the offending parameter.
        parameter: String,
        /// The declared type, as received on the wire.
        kind: String,
    },

    /// Retrieving a grader's schema failed for a reason other than not-found.
    #[error("failed to retrieve configuration schema for grader `{grader}` from `{endpoint}`: {cause}")]
    SchemaRetrieval {
        /// Grader whose schema was being fetched.
        grader: String,
        /// Endpoint the fetch was issued against.
        endpoint: String,
        /// Underlying failure, rendered for the operator.
        cause: String,
    },

    /// The registry names the same grader twice.
    #[error("registry declares duplicate grader `{0}`")]
    DuplicateGrader(String),

    /// Composition was handed a registry grader with no fetched schema.
    #[error("no schema was collected for registry grader `{0}`")]
    MissingGraderSchema(String),

    /// The assembled composite schema failed to compile.
    #[error("failed to compile composite schema: {0}")]
    SchemaCompile(String),
}
