use serde::{Deserialize, Serialize};

/// Top-level converter configuration.
///
/// Both sections are optional; a missing section behaves like an empty one
/// and every unset value falls back to the command line or built-in default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub graphql: GraphqlConfig,
    pub raml: RamlConfig,
}

/// Settings for `api2postman graphql`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphqlConfig {
    /// GraphQL endpoint stored in the `url` collection variable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Output file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

/// Settings for `api2postman raml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RamlConfig {
    /// Output file path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Overrides the document's `baseUri`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

impl ConverterConfig {
    /// Checks that every present value is usable.
    ///
    /// Returns a message naming the offending key on failure.
    pub fn validate(&self) -> Result<(), String> {
        let graphql = &self.graphql;
        non_blank("graphql.endpoint", graphql.endpoint.as_deref())?;
        non_blank("graphql.output", graphql.output.as_deref())?;
        non_blank("graphql.collectionName", graphql.collection_name.as_deref())?;
        absolute_url("graphql.endpoint", graphql.endpoint.as_deref())?;

        let raml = &self.raml;
        non_blank("raml.output", raml.output.as_deref())?;
        non_blank("raml.baseUri", raml.base_uri.as_deref())?;
        non_blank("raml.collectionName", raml.collection_name.as_deref())?;
        absolute_url("raml.baseUri", raml.base_uri.as_deref())?;

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn non_blank(key: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(value) if value.trim().is_empty() => Err(format!("'{key}' must not be empty")),
        _ => Ok(()),
    }
}

fn absolute_url(key: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(value) if !value.contains("://") => Err(format!(
            "'{key}' must be an absolute URL such as https://api.example.com, got '{value}'"
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r"
graphql:
  endpoint: https://api.example.com/graphql
  output: out/graphql.json
  collectionName: Shop GraphQL
raml:
  output: out/raml.json
  baseUri: https://staging.example.com
  collectionName: Shop REST
";
        let config: ConverterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config.graphql.endpoint.as_deref(),
            Some("https://api.example.com/graphql")
        );
        assert_eq!(config.graphql.collection_name.as_deref(), Some("Shop GraphQL"));
        assert_eq!(config.raml.base_uri.as_deref(), Some("https://staging.example.com"));
        assert_eq!(config.raml.output.as_deref(), Some("out/raml.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_default() {
        let config: ConverterConfig = serde_yaml::from_str("raml:\n  output: a.json\n").unwrap();
        assert_eq!(config.graphql, GraphqlConfig::default());
        assert!(!config.is_empty());
        assert!(ConverterConfig::default().is_empty());
    }

    #[test]
    fn test_blank_value_rejected() {
        let config: ConverterConfig =
            serde_json::from_str(r#"{"graphql": {"collectionName": "  "}}"#).unwrap();
        assert_eq!(
            config.validate().unwrap_err(),
            "'graphql.collectionName' must not be empty"
        );
    }

    #[test]
    fn test_relative_url_rejected() {
        let config: ConverterConfig =
            serde_json::from_str(r#"{"raml": {"baseUri": "api.example.com"}}"#).unwrap();
        let message = config.validate().unwrap_err();
        assert!(message.starts_with("'raml.baseUri' must be an absolute URL"));
    }
}
