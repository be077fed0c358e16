//! Postman requests for RAML resource methods.

use crate::document::{scalar_text, yaml_to_json};
use crate::error::{RamlError, Result};
use crate::example::{is_truthy, ExampleSynthesizer};
use crate::url::build_url;
use postman_collection::{
    Body, FormParam, FormParamKind, Header, Item, QueryParam, RawOptions, Request, Response,
};
use serde_json::Value as Json;
use serde_yaml::{Mapping, Value};

/// Method keys recognised on a resource, matched case-insensitively.
pub const HTTP_METHODS: &[&str] = &["get", "post", "put", "delete", "patch", "head", "options"];

const FORM_DATA: &str = "multipart/form-data";

/// The lowercase HTTP method for a resource key, if it is one.
#[must_use]
pub fn http_method(key: &str) -> Option<&'static str> {
    HTTP_METHODS
        .iter()
        .find(|method| method.eq_ignore_ascii_case(key))
        .copied()
}

/// Builds request items for the methods of one resource.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    base_uri: &'a str,
    examples: ExampleSynthesizer<'a>,
}

impl<'a> RequestBuilder<'a> {
    #[must_use]
    pub const fn new(base_uri: &'a str, types: &'a Mapping) -> Self {
        Self {
            base_uri,
            examples: ExampleSynthesizer::new(types),
        }
    }

    /// Request item `"<METHOD> <path>"` with its example responses.
    ///
    /// A null method definition (`get:` with nothing under it) is treated as
    /// an empty one.
    pub fn build_item(&self, method: &str, path: &str, definition: &Value) -> Result<Item> {
        let empty = Mapping::new();
        let definition = definition.as_mapping().unwrap_or(&empty);
        let method = method.to_ascii_uppercase();

        let request = self.build_request(&method, path, definition)?;
        let response = self.build_responses(&method, path, definition, &request)?;
        tracing::debug!(%method, %path, responses = response.len(), "Built request");

        Ok(Item {
            name: format!("{method} {path}"),
            request,
            response,
        })
    }

    /// The request for `method` on the resource at `path`.
    pub fn build_request(&self, method: &str, path: &str, definition: &Mapping) -> Result<Request> {
        let mut url = build_url(self.base_uri, path);
        url.query = Some(query_parameters(definition));

        let mut header = declared_headers(definition);
        let mut body = None;
        if let Some((media_type, spec)) = first_media_type(definition.get("body")) {
            body = Some(if media_type.contains(FORM_DATA) {
                Body::Formdata {
                    formdata: form_fields(spec),
                }
            } else {
                let example = self.body_example(spec);
                Body::Raw {
                    raw: pretty_or(&example, "{}", || format!("{method} {path}"))?,
                    options: RawOptions::language(if media_type.contains("json") {
                        "json"
                    } else {
                        "text"
                    }),
                }
            });
            if !header
                .iter()
                .any(|h| h.key.eq_ignore_ascii_case("content-type"))
            {
                header.push(Header::new("Content-Type", media_type));
            }
        }

        Ok(Request {
            method: method.to_string(),
            header,
            url,
            body,
            description: definition.get("description").and_then(scalar_text),
        })
    }

    /// One example response per declared status code, in declaration order.
    fn build_responses(
        &self,
        method: &str,
        path: &str,
        definition: &Mapping,
        request: &Request,
    ) -> Result<Vec<Response>> {
        let Some(Value::Mapping(responses)) = definition.get("responses") else {
            return Ok(Vec::new());
        };

        let empty = Mapping::new();
        let mut built = Vec::with_capacity(responses.len());
        for (status, response) in responses {
            let status_text = scalar_text(status).unwrap_or_default();
            let code = status_text
                .trim()
                .parse::<u16>()
                .map_err(|_| RamlError::InvalidStatusCode {
                    path: path.to_string(),
                    method: method.to_string(),
                    code: status_text.clone(),
                })?;
            let response = response.as_mapping().unwrap_or(&empty);

            let mut header = Vec::new();
            let mut body = String::new();
            if let Some((media_type, spec)) = first_media_type(response.get("body")) {
                let example = self.body_example(spec);
                body = pretty_or(&example, "", || format!("{method} {path} {code}"))?;
                header.push(Header::new("Content-Type", media_type));
            }

            built.push(Response {
                name: format!("Response {status_text}"),
                original_request: request.clone(),
                status: response
                    .get("description")
                    .and_then(scalar_text)
                    .unwrap_or_default(),
                code,
                preview_language: "json".to_string(),
                header,
                body,
            });
        }
        Ok(built)
    }

    /// Example for a body declaration: its `type`, else its `properties`,
    /// else its literal `example`.
    fn body_example(&self, spec: &Value) -> Json {
        let Some(spec) = spec.as_mapping() else {
            return Json::Null;
        };
        if let Some(type_def) = spec.get("type") {
            return self.examples.synthesize(type_def, 0);
        }
        if let Some(properties) = spec.get("properties") {
            return self.examples.synthesize(properties, 0);
        }
        match spec.get("example") {
            // JSON written as a string literal
            Some(Value::String(text)) => {
                serde_json::from_str(text).unwrap_or_else(|_| Json::String(text.clone()))
            }
            Some(example) => yaml_to_json(example),
            None => Json::Null,
        }
    }
}

/// The first media type under a `body` key and its declaration.
fn first_media_type(body: Option<&Value>) -> Option<(String, &Value)> {
    let (media_type, spec) = body?.as_mapping()?.iter().next()?;
    Some((scalar_text(media_type)?, spec))
}

fn description_of(definition: &Value) -> String {
    definition
        .get("description")
        .and_then(scalar_text)
        .unwrap_or_default()
}

fn query_parameters(definition: &Mapping) -> Vec<QueryParam> {
    let Some(Value::Mapping(parameters)) = definition.get("queryParameters") else {
        return Vec::new();
    };
    parameters
        .iter()
        .filter_map(|(name, parameter)| {
            Some(QueryParam {
                key: scalar_text(name)?,
                value: String::new(),
                description: Some(description_of(parameter)),
                disabled: parameter.get("required") == Some(&Value::Bool(false)),
            })
        })
        .collect()
}

fn declared_headers(definition: &Mapping) -> Vec<Header> {
    let Some(Value::Mapping(headers)) = definition.get("headers") else {
        return Vec::new();
    };
    headers
        .iter()
        .filter_map(|(name, header)| {
            Some(Header {
                key: scalar_text(name)?,
                value: String::new(),
                description: Some(description_of(header)),
            })
        })
        .collect()
}

fn form_fields(spec: &Value) -> Vec<FormParam> {
    let Some(Value::Mapping(properties)) = spec.get("properties") else {
        return Vec::new();
    };
    properties
        .iter()
        .filter_map(|(name, property)| {
            let is_file = property.as_str() == Some("file")
                || property.get("type").and_then(Value::as_str) == Some("file");
            Some(FormParam {
                key: scalar_text(name)?,
                value: String::new(),
                kind: if is_file {
                    FormParamKind::File
                } else {
                    FormParamKind::Text
                },
            })
        })
        .collect()
}

/// Two-space indented JSON for a present example, `fallback` otherwise.
fn pretty_or(example: &Json, fallback: &str, context: impl FnOnce() -> String) -> Result<String> {
    if !is_truthy(example) {
        return Ok(fallback.to_string());
    }
    serde_json::to_string_pretty(example).map_err(|source| RamlError::Example {
        context: context(),
        source,
    })
}
