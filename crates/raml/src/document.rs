//! RAML documents loaded as a YAML tree.
//!
//! No descriptor types are built: the `types` section is kept as the raw
//! mapping and walked at synthesis time, and resources stay as the nested
//! mappings found under `/`-prefixed keys.

use crate::error::{RamlError, Result};
use serde_yaml::{Mapping, Value};

pub const DEFAULT_TITLE: &str = "API Collection";
pub const DEFAULT_BASE_URI: &str = "https://api.example.com";

/// A parsed RAML document.
#[derive(Debug, Clone, PartialEq)]
pub struct RamlDocument {
    pub title: String,
    pub base_uri: String,
    pub version: String,
    types: Mapping,
    root: Mapping,
}

impl RamlDocument {
    /// Parses RAML text. The `#%RAML 1.0` header is a YAML comment and needs
    /// no special handling.
    #[tracing::instrument(skip_all)]
    pub fn parse(source: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(source)?;
        let root = match value {
            Value::Mapping(root) => root,
            // A header-only document loads as null
            Value::Null => Mapping::new(),
            _ => return Err(RamlError::NotAMapping),
        };
        Ok(Self::from_mapping(root))
    }

    #[must_use]
    pub fn from_mapping(root: Mapping) -> Self {
        let title = root
            .get("title")
            .and_then(scalar_text)
            .unwrap_or_else(|| DEFAULT_TITLE.to_string());
        let base_uri = root
            .get("baseUri")
            .and_then(scalar_text)
            .unwrap_or_else(|| DEFAULT_BASE_URI.to_string());
        let version = root.get("version").and_then(scalar_text).unwrap_or_default();
        let types = match root.get("types") {
            Some(Value::Mapping(types)) => types.clone(),
            _ => Mapping::new(),
        };

        Self {
            title,
            base_uri,
            version,
            types,
            root,
        }
    }

    /// The `types` section, empty when absent.
    #[must_use]
    pub const fn types(&self) -> &Mapping {
        &self.types
    }

    /// `"<title> <version>"` with surrounding whitespace removed.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} {}", self.title, self.version).trim().to_string()
    }

    /// Top-level resources in document order.
    pub fn resources(&self) -> impl Iterator<Item = (&str, &Value)> {
        resource_entries(&self.root)
    }
}

/// Entries of `mapping` whose key starts with `/`, in order.
pub(crate) fn resource_entries(mapping: &Mapping) -> impl Iterator<Item = (&str, &Value)> {
    mapping.iter().filter_map(|(key, value)| {
        key.as_str()
            .filter(|key| key.starts_with('/'))
            .map(|key| (key, value))
    })
}

/// Text of a scalar value; `version: 1` reads as `"1"`.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Converts a YAML value to JSON. Non-string mapping keys are stringified
/// and tags are dropped.
#[must_use]
pub fn yaml_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(flag) => serde_json::Value::Bool(*flag),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                serde_json::Value::from(int)
            } else if let Some(uint) = number.as_u64() {
                serde_json::Value::from(uint)
            } else {
                number
                    .as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
        }
        Value::String(text) => serde_json::Value::String(text.clone()),
        Value::Sequence(items) => items.iter().map(yaml_to_json).collect(),
        Value::Mapping(mapping) => serde_json::Value::Object(
            mapping
                .iter()
                .map(|(key, value)| {
                    let key = scalar_text(key).unwrap_or_default();
                    (key, yaml_to_json(value))
                })
                .collect(),
        ),
        Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}
