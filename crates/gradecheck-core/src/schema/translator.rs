//! Translation of declared parameters into JSON Schema fragments.

use serde_json::{json, Map, Value};

use super::wire::ParameterDescriptor;

/// Convert one declared parameter into the JSON Schema fragment that
/// constrains its value inside a step's `configuration` object.
///
/// Bounds and step are enforced; `default` is attached as an annotation for
/// tooling and never enforced by validation.
pub fn translate(descriptor: &ParameterDescriptor) -> Value {
    match descriptor {
        ParameterDescriptor::Integer {
            min,
            max,
            step,
            initial,
        } => {
            let mut fragment = Map::new();
            fragment.insert("type".to_string(), json!("integer"));
            if let Some(min) = min {
                fragment.insert("minimum".to_string(), json!(min));
            }
            if let Some(max) = max {
                fragment.insert("maximum".to_string(), json!(max));
            }
            if let Some(step) = step {
                fragment.insert("multipleOf".to_string(), json!(step));
            }
            if let Some(initial) = initial {
                fragment.insert("default".to_string(), json!(initial));
            }
            Value::Object(fragment)
        }
        ParameterDescriptor::Text { initial } => {
            let mut fragment = Map::new();
            fragment.insert("type".to_string(), json!("string"));
            if let Some(initial) = initial {
                fragment.insert("default".to_string(), json!(initial));
            }
            Value::Object(fragment)
        }
        // Null means "use the current repository's checkout"; the object
        // form pins an explicit repository, branch, and commit.
        ParameterDescriptor::GitReference => json!({
            "anyOf": [
                { "type": "null" },
                {
                    "type": "object",
                    "properties": {
                        "repository": { "type": "string" },
                        "branch": { "type": "string" },
                        "sha": { "type": "string" }
                    },
                    "required": ["repository", "branch", "sha"],
                    "additionalProperties": false
                }
            ]
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_with_all_attributes() {
        let fragment = translate(&ParameterDescriptor::Integer {
            min: Some(0),
            max: Some(100),
            step: Some(5),
            initial: Some(50),
        });
        assert_eq!(
            fragment,
            json!({
                "type": "integer",
                "minimum": 0,
                "maximum": 100,
                "multipleOf": 5,
                "default": 50
            })
        );
    }

    #[test]
    fn test_integer_without_attributes() {
        let fragment = translate(&ParameterDescriptor::Integer {
            min: None,
            max: None,
            step: None,
            initial: None,
        });
        assert_eq!(fragment, json!({ "type": "integer" }));
    }

    #[test]
    fn test_string_with_default() {
        let fragment = translate(&ParameterDescriptor::Text {
            initial: Some("main".to_string()),
        });
        assert_eq!(fragment, json!({ "type": "string", "default": "main" }));
    }

    #[test]
    fn test_git_reference_accepts_null_or_full_triple() {
        let fragment = translate(&ParameterDescriptor::GitReference);

        let validator = jsonschema::options().build(&fragment).unwrap();
        assert!(validator.is_valid(&json!(null)));
        assert!(validator.is_valid(&json!({
            "repository": "git@host:course/starter.git",
            "branch": "main",
            "sha": "0123abc"
        })));

        // Partial triples and extra fields are rejected.
        assert!(!validator.is_valid(&json!({ "repository": "r", "branch": "main" })));
        assert!(!validator.is_valid(&json!({
            "repository": "r",
            "branch": "main",
            "sha": "0123abc",
            "tag": "v1"
        })));
        assert!(!validator.is_valid(&json!("main")));
    }
}
