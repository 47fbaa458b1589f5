//! Wire format for grader-supplied configuration schemas.
//!
//! A grader's `config_schema` endpoint answers with either
//! `{ "parameters": 0 }` (the grader takes no configuration) or
//! `{ "parameters": { "<name>": { "type": ..., ... } } }`. This module
//! decodes that payload into the typed [`GraderSchema`] the rest of the
//! pipeline works with; wire structs never leak past it.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::PipelineError;

/// Errors produced while decoding a schema payload.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The payload declared a parameter type outside the three built-ins.
    #[error("parameter `{parameter}` has unsupported type `{kind}`")]
    UnsupportedKind {
        /// Name of the offending parameter.
        parameter: String,
        /// The declared type string.
        kind: String,
    },

    /// The payload does not match the expected shape at all.
    #[error("malformed schema payload: {0}")]
    Malformed(String),

    /// `parameters` was a count other than the non-configurable sentinel 0.
    #[error("`parameters` must be 0 or a map of parameter declarations, got {0}")]
    BadParameterCount(u64),
}

/// One declared configuration parameter, typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterDescriptor {
    /// An integer value, optionally bounded and stepped.
    Integer {
        /// Inclusive lower bound.
        min: Option<i64>,
        /// Inclusive upper bound.
        max: Option<i64>,
        /// Divisibility constraint.
        step: Option<i64>,
        /// Suggested default, informational only.
        initial: Option<i64>,
    },
    /// A free-form string value.
    Text {
        /// Suggested default, informational only.
        initial: Option<String>,
    },
    /// A git reference: `{repository, branch, sha}`, or null for "use the
    /// current checkout". Carries no wire attributes.
    GitReference,
}

/// A grader's declared configuration schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraderSchema {
    /// The grader accepts no configuration; its `configuration` field must
    /// be null.
    NonConfigurable,
    /// The grader accepts exactly the declared parameters.
    Configurable(BTreeMap<String, ParameterDescriptor>),
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    parameters: RawParameters,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawParameters {
    Count(u64),
    Declared(BTreeMap<String, RawParameter>),
}

#[derive(Debug, Deserialize)]
struct RawParameter {
    #[serde(rename = "type")]
    kind: String,
    min: Option<i64>,
    max: Option<i64>,
    step: Option<i64>,
    initial: Option<Value>,
}

impl GraderSchema {
    /// Decode a schema payload as served by a grader's endpoint.
    pub fn from_value(payload: &Value) -> Result<Self, DecodeError> {
        let raw: RawPayload = serde_json::from_value(payload.clone())
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;

        match raw.parameters {
            RawParameters::Count(0) => Ok(Self::NonConfigurable),
            RawParameters::Count(n) => Err(DecodeError::BadParameterCount(n)),
            RawParameters::Declared(raw_params) => {
                let mut parameters = BTreeMap::new();
                for (name, raw_param) in raw_params {
                    let descriptor = decode_parameter(&name, raw_param)?;
                    parameters.insert(name, descriptor);
                }
                Ok(Self::Configurable(parameters))
            }
        }
    }

    /// Number of declared parameters (0 for non-configurable graders).
    pub fn parameter_count(&self) -> usize {
        match self {
            Self::NonConfigurable => 0,
            Self::Configurable(parameters) => parameters.len(),
        }
    }
}

fn decode_parameter(name: &str, raw: RawParameter) -> Result<ParameterDescriptor, DecodeError> {
    match raw.kind.as_str() {
        "integer" => Ok(ParameterDescriptor::Integer {
            min: raw.min,
            max: raw.max,
            step: raw.step,
            initial: match raw.initial {
                None | Some(Value::Null) => None,
                Some(Value::Number(n)) if n.is_i64() => n.as_i64(),
                Some(other) => {
                    return Err(DecodeError::Malformed(format!(
                        "parameter `{name}` declares a non-integer initial value: {other}"
                    )))
                }
            },
        }),
        "string" => Ok(ParameterDescriptor::Text {
            initial: match raw.initial {
                None | Some(Value::Null) => None,
                Some(Value::String(s)) => Some(s),
                Some(other) => {
                    return Err(DecodeError::Malformed(format!(
                        "parameter `{name}` declares a non-string initial value: {other}"
                    )))
                }
            },
        }),
        "git" => Ok(ParameterDescriptor::GitReference),
        kind => Err(DecodeError::UnsupportedKind {
            parameter: name.to_string(),
            kind: kind.to_string(),
        }),
    }
}

/// Decode a payload fetched for a named grader, mapping failures onto the
/// pipeline taxonomy: an unsupported parameter type is its own fatal error,
/// everything else counts as a failed retrieval of that grader's schema.
pub fn decode_grader_schema(
    grader: &str,
    endpoint: &str,
    payload: &Value,
) -> Result<GraderSchema, PipelineError> {
    GraderSchema::from_value(payload).map_err(|e| match e {
        DecodeError::UnsupportedKind { parameter, kind } => {
            PipelineError::UnsupportedParameterKind {
                grader: grader.to_string(),
                parameter,
                kind,
            }
        }
        other => PipelineError::SchemaRetrieval {
            grader: grader.to_string(),
            endpoint: endpoint.to_string(),
            cause: other.to_string(),
        },
    })
}
