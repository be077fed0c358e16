//! Postman Collection v2.1.0 document types.
//!
//! These types mirror the subset of the collection format the converters
//! produce and can be serialized to (and read back from) JSON using serde.

use serde::{Deserialize, Serialize};

/// Schema URL advertised in every generated collection's `info` block.
pub const SCHEMA_URL: &str =
    "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Top-level collection envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub info: Info,
    pub item: Vec<Folder>,
    pub variable: Vec<Variable>,
}

impl Collection {
    #[must_use]
    pub fn new(info: Info, folders: Vec<Folder>, variables: Vec<Variable>) -> Self {
        Self {
            info,
            item: folders,
            variable: variables,
        }
    }

    /// Total number of request items across all folders.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.item.iter().map(|folder| folder.item.len()).sum()
    }

    /// Serializes the collection as two-space indented JSON.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Collection metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    #[serde(
        rename = "_postman_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub postman_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub schema: String,
    #[serde(
        rename = "_exporter_id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub exporter_id: Option<String>,
}

impl Info {
    /// Creates metadata with the given name and the v2.1.0 schema URL.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            postman_id: None,
            name: name.into(),
            description: None,
            schema: SCHEMA_URL.to_string(),
            exporter_id: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the collection as generated rather than exported from a workspace.
    #[must_use]
    pub fn auto_generated(mut self) -> Self {
        self.postman_id = Some("auto-generated".to_string());
        self.exporter_id = Some("auto".to_string());
        self
    }
}

/// A named group of request items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub name: String,
    pub item: Vec<Item>,
}

/// One executable request with its example responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub request: Request,
    #[serde(default)]
    pub response: Vec<Response>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub method: String,
    pub header: Vec<Header>,
    pub url: Url,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Header {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            description: None,
        }
    }
}

/// Request URL, either a bare variable reference or split into parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Url {
    pub raw: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    pub host: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<Vec<QueryParam>>,
}

impl Url {
    /// A URL that consists of a single collection variable, e.g. `{{url}}`.
    #[must_use]
    pub fn variable(name: &str) -> Self {
        let raw = format!("{{{{{name}}}}}");
        Self {
            raw: raw.clone(),
            protocol: None,
            host: vec![raw],
            path: None,
            query: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

/// Request body, discriminated by Postman's `mode` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Body {
    Graphql { graphql: GraphqlBody },
    Raw { raw: String, options: RawOptions },
    Formdata { formdata: Vec<FormParam> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphqlBody {
    pub query: String,
    /// Variables as JSON text, not as a nested object.
    pub variables: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOptions {
    pub raw: RawLanguage,
}

impl RawOptions {
    #[must_use]
    pub fn language(language: impl Into<String>) -> Self {
        Self {
            raw: RawLanguage {
                language: language.into(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLanguage {
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormParam {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: FormParamKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormParamKind {
    Text,
    File,
}

/// Example response attached to a request item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub name: String,
    #[serde(rename = "originalRequest")]
    pub original_request: Request,
    pub status: String,
    pub code: u16,
    #[serde(rename = "_postman_previewlanguage")]
    pub preview_language: String,
    pub header: Vec<Header>,
    pub body: String,
}

/// Collection-level variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Variable {
    #[must_use]
    pub fn string(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            kind: "string".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_request() -> Request {
        Request {
            method: "POST".to_string(),
            header: vec![],
            url: Url::variable("url"),
            body: Some(Body::Graphql {
                graphql: GraphqlBody {
                    query: "query q { hello }".to_string(),
                    variables: "{}".to_string(),
                },
            }),
            description: None,
        }
    }

    #[test]
    fn test_variable_url() {
        let url = Url::variable("url");
        assert_eq!(url.raw, "{{url}}");
        assert_eq!(url.host, vec!["{{url}}"]);
        assert_eq!(
            serde_json::to_value(&url).unwrap(),
            json!({"raw": "{{url}}", "host": ["{{url}}"]})
        );
    }

    #[test]
    fn test_body_mode_tag() {
        let value = serde_json::to_value(sample_request().body).unwrap();
        assert_eq!(value["mode"], "graphql");
        assert_eq!(value["graphql"]["variables"], "{}");

        let raw = Body::Raw {
            raw: "{}".to_string(),
            options: RawOptions::language("json"),
        };
        assert_eq!(
            serde_json::to_value(&raw).unwrap(),
            json!({"mode": "raw", "raw": "{}", "options": {"raw": {"language": "json"}}})
        );
    }

    #[test]
    fn test_query_param_disabled_only_when_set() {
        let enabled = QueryParam {
            key: "page".to_string(),
            value: String::new(),
            description: None,
            disabled: false,
        };
        let value = serde_json::to_value(&enabled).unwrap();
        assert!(value.get("disabled").is_none());

        let disabled = QueryParam {
            disabled: true,
            ..enabled
        };
        assert_eq!(serde_json::to_value(&disabled).unwrap()["disabled"], true);
    }

    #[test]
    fn test_info_field_order() {
        let info = Info::new("API").auto_generated();
        let text = serde_json::to_string(&info).unwrap();
        assert_eq!(
            text,
            format!(
                r#"{{"_postman_id":"auto-generated","name":"API","schema":"{SCHEMA_URL}","_exporter_id":"auto"}}"#
            )
        );
    }

    #[test]
    fn test_request_count() {
        let item = Item {
            name: "hello".to_string(),
            request: sample_request(),
            response: vec![],
        };
        let collection = Collection::new(
            Info::new("API"),
            vec![
                Folder {
                    name: "queries".to_string(),
                    item: vec![item.clone(), item.clone()],
                },
                Folder {
                    name: "mutations".to_string(),
                    item: vec![item],
                },
            ],
            vec![Variable::string("url", "https://api.example.com/graphql")],
        );
        assert_eq!(collection.request_count(), 3);

        let text = collection.to_json_pretty().unwrap();
        let parsed: Collection = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, collection);
    }
}
