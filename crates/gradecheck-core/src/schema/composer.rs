//! Per-grader conditional rules over the `name` discriminator.

use std::collections::BTreeMap;

use serde_json::{json, Value};

use super::adapter::adapt;
use super::wire::GraderSchema;
use crate::error::PipelineError;
use crate::registry::GraderRegistry;

/// One "if the step names this grader, then its configuration matches this
/// fragment" rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalRule {
    grader: String,
    configuration: Value,
}

impl ConditionalRule {
    /// The discriminator value this rule fires on.
    pub fn grader(&self) -> &str {
        &self.grader
    }

    /// The fragment enforced on `configuration` when the rule fires.
    pub fn configuration(&self) -> &Value {
        &self.configuration
    }

    /// Render the rule as a JSON Schema if/then conditional.
    pub fn to_value(&self) -> Value {
        json!({
            "if": {
                "properties": { "name": { "const": &self.grader } }
            },
            "then": {
                "properties": { "configuration": &self.configuration }
            }
        })
    }
}

/// Build one conditional rule per registry grader, in registry order.
///
/// Grader names are unique within a registry, so at most one rule's
/// condition matches any given step and `then` clauses can never co-apply.
/// An empty registry composes to an empty rule set.
pub fn compose(
    registry: &GraderRegistry,
    schemas: &BTreeMap<String, GraderSchema>,
) -> Result<Vec<ConditionalRule>, PipelineError> {
    let mut rules = Vec::with_capacity(registry.len());

    for entry in registry.entries() {
        let schema = schemas
            .get(&entry.name)
            .ok_or_else(|| PipelineError::MissingGraderSchema(entry.name.clone()))?;

        tracing::debug!(
            grader = %entry.name,
            parameters = schema.parameter_count(),
            "composing conditional rule"
        );

        rules.push(ConditionalRule {
            grader: entry.name.clone(),
            configuration: adapt(schema),
        });
    }

    Ok(rules)
}
