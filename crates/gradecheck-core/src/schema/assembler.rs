//! Assembly of the composite document schema.

use serde_json::{json, Value};

use super::composer::ConditionalRule;
use crate::registry::GraderRegistry;

/// The assembled composite schema: the fixed step-list envelope with one
/// conditional rule per registered grader attached.
///
/// Immutable; `assemble` returns a fresh value on every call and nothing in
/// the pipeline patches a schema after it is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeSchema {
    value: Value,
}

impl CompositeSchema {
    /// The schema as a JSON value.
    pub fn as_value(&self) -> &Value {
        &self.value
    }

    /// Consume the wrapper and take the JSON value.
    pub fn into_value(self) -> Value {
        self.value
    }
}

/// Embed the composed conditionals into the fixed top-level envelope.
///
/// The document is an array of step objects. Each step requires `name`
/// (one of the registered graders; unknown names fail here, before any
/// conditional is consulted), `weight`, `condition`, and `configuration`
/// (coarsely an object or null, refined per grader by the conditionals);
/// `context` and `depends-on` are optional and no other field is allowed.
/// `depends-on` entries are expected to name other steps, but referential
/// integrity is not a schema concern.
pub fn assemble(registry: &GraderRegistry, conditionals: &[ConditionalRule]) -> CompositeSchema {
    let names: Vec<&str> = registry.names().collect();

    let mut item = json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "enum": names },
            "weight": { "type": "integer" },
            "condition": { "type": "integer" },
            "configuration": { "type": ["object", "null"] },
            "context": { "type": "string" },
            "depends-on": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["name", "weight", "condition", "configuration"],
        "additionalProperties": false
    });

    // allOf must be non-empty; with no registered graders the conditional
    // section is vacuous and left out.
    if !conditionals.is_empty() {
        let rules: Vec<Value> = conditionals.iter().map(ConditionalRule::to_value).collect();
        item["allOf"] = Value::Array(rules);
    }

    CompositeSchema {
        value: json!({
            "type": "array",
            "items": item
        }),
    }
}
