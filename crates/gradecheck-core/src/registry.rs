//! The grader registry: which graders exist and where their schemas live.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::PipelineError;

/// Errors that can occur when loading a registry file.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Failed to read registry file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Registry entry for `{0}` must be an endpoint URL or null")]
    InvalidEndpoint(String),

    #[error("Registry key must be a string, got: {0}")]
    InvalidName(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// One registered grader.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraderEntry {
    /// Unique grader name; the discriminator value in step descriptors.
    pub name: String,

    /// Schema endpoint. `None` means the grader exposes no remote schema
    /// and is treated as non-configurable.
    pub endpoint: Option<String>,
}

/// Ordered mapping from grader name to schema endpoint.
///
/// Immutable once constructed; a validation run never mutates its registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraderRegistry {
    entries: Vec<GraderEntry>,
}

impl GraderRegistry {
    /// Build a registry from `(name, endpoint)` pairs, preserving order.
    ///
    /// Rejects duplicate grader names: each name must select exactly one
    /// conditional rule in the composite schema.
    pub fn new(
        entries: impl IntoIterator<Item = (String, Option<String>)>,
    ) -> Result<Self, PipelineError> {
        let mut seen = std::collections::HashSet::new();
        let mut collected = Vec::new();

        for (name, endpoint) in entries {
            if !seen.insert(name.clone()) {
                return Err(PipelineError::DuplicateGrader(name));
            }
            collected.push(GraderEntry { name, endpoint });
        }

        Ok(Self { entries: collected })
    }

    /// Parse a registry from a YAML mapping of grader name to endpoint.
    ///
    /// ```yaml
    /// junit-grader: "http://graders.internal:3006/config_schema"
    /// manual-grader: null
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, RegistryError> {
        let mapping: serde_yaml::Mapping = serde_yaml::from_str(yaml)?;

        let mut pairs = Vec::new();
        for (key, value) in mapping {
            let name = key
                .as_str()
                .ok_or_else(|| RegistryError::InvalidName(format!("{key:?}")))?
                .to_string();
            let endpoint = match value {
                serde_yaml::Value::Null => None,
                serde_yaml::Value::String(url) => Some(url),
                _ => return Err(RegistryError::InvalidEndpoint(name)),
            };
            pairs.push((name, endpoint));
        }

        Ok(Self::new(pairs)?)
    }

    /// Parse a registry from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Registered graders, in registration order.
    pub fn entries(&self) -> &[GraderEntry] {
        &self.entries
    }

    /// Grader names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Number of registered graders.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
