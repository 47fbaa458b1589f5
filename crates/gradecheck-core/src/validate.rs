//! Validation of a document against the composite schema, and the
//! aggregation of whatever it finds into one operator-facing report.

use serde_json::Value;

use crate::error::PipelineError;
use crate::schema::CompositeSchema;

/// One structural violation found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralViolation {
    /// JSON-Pointer path of the offending value ("/" for the document root).
    pub path: String,

    /// What was expected versus what was found, rendered for a human.
    pub message: String,
}

impl std::fmt::Display for StructuralViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "at {}: {}", self.path, self.message)
    }
}

/// The outcome of one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The document satisfies the composite schema.
    Valid,

    /// Every structural violation found, in document order.
    Invalid(Vec<StructuralViolation>),
}

impl ValidationOutcome {
    /// Whether the document passed.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Render the aggregated failure message, or `None` for a valid run.
    pub fn report(&self) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Invalid(violations) => {
                let mut report = format!(
                    "grader configuration failed validation with {} violation(s):",
                    violations.len()
                );
                for violation in violations {
                    report.push_str("\n  - ");
                    report.push_str(&violation.to_string());
                }
                Some(report)
            }
        }
    }
}

/// Validate a parsed document against the composite schema.
///
/// Collects every violation rather than stopping at the first; individual
/// violations are never fatal, while a schema that fails to compile aborts
/// the run before any verdict is produced.
pub fn validate(
    schema: &CompositeSchema,
    document: &Value,
) -> Result<ValidationOutcome, PipelineError> {
    let validator = jsonschema::options()
        .build(schema.as_value())
        .map_err(|e| PipelineError::SchemaCompile(e.to_string()))?;

    let violations: Vec<StructuralViolation> = validator
        .iter_errors(document)
        .map(|e| {
            let path = e.instance_path.to_string();
            StructuralViolation {
                path: if path.is_empty() { "/".to_string() } else { path },
                message: e.to_string(),
            }
        })
        .collect();

    if violations.is_empty() {
        tracing::debug!("document satisfied the composite schema");
        Ok(ValidationOutcome::Valid)
    } else {
        tracing::debug!(count = violations.len(), "document failed validation");
        Ok(ValidationOutcome::Invalid(violations))
    }
}
