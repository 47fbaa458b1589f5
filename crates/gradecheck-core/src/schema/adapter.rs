//! Adaptation of a whole grader schema into its `configuration` fragment.

use serde_json::{json, Map, Value};

use super::translator::translate;
use super::wire::GraderSchema;

/// Build the JSON Schema fragment for one grader's `configuration` field.
///
/// A non-configurable grader admits only null: a grader that declared no
/// parameters must never be handed a configuration object. A configurable
/// grader admits exactly its declared parameters, every one required and
/// nothing else permitted.
pub fn adapt(schema: &GraderSchema) -> Value {
    match schema {
        GraderSchema::NonConfigurable => json!({ "type": "null" }),
        GraderSchema::Configurable(parameters) => {
            // Built by folding the declared set into a fresh map, so
            // grader-supplied parameter names can never collide with a
            // previously inserted schema keyword.
            let mut properties = Map::new();
            let mut required = Vec::new();
            for (name, descriptor) in parameters {
                properties.insert(name.clone(), translate(descriptor));
                required.push(Value::String(name.clone()));
            }

            json!({
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false
            })
        }
    }
}
