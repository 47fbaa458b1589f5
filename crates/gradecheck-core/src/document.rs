//! Document loading from YAML/JSON.
//!
//! The validation core works on parsed `serde_json::Value` trees; this is
//! the thin edge that reads them in. YAML is a superset of JSON here, so a
//! JSON document parses through the same path.

use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when loading a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to read document file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Parse a grader-configuration document from a YAML string.
pub fn from_yaml(yaml: &str) -> Result<Value, DocumentError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Parse a grader-configuration document from a YAML file.
pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Value, DocumentError> {
    let contents = fs::read_to_string(path)?;
    from_yaml(&contents)
}
