//! Operation documents and Postman requests for root fields.

use crate::error::RequestError;
use crate::example::{is_builtin_scalar, ExampleSynthesizer};
use crate::model::{FieldDescriptor, OperationKind, SchemaModel, TypeDefinition};
use postman_collection::{Body, GraphqlBody, Item, Request, Url};
use serde_json::{Map, Value};
use std::fmt::Write;

/// Deepest nesting level that is still expanded into a selection set.
pub const MAX_SELECTION_DEPTH: usize = 3;

/// Collection variable the generated requests point at.
pub const ENDPOINT_VARIABLE: &str = "url";

/// One field in a selection set; leaf fields have no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub children: Vec<Selection>,
}

/// Builds query documents, variables and request items for root fields.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    schema: &'a SchemaModel,
    examples: ExampleSynthesizer<'a>,
}

impl<'a> RequestBuilder<'a> {
    #[must_use]
    pub const fn new(schema: &'a SchemaModel) -> Self {
        Self {
            schema,
            examples: ExampleSynthesizer::new(schema),
        }
    }

    /// Selection set for a field returning `type_name`.
    ///
    /// Only object types expand. Scalars, enums, interfaces, unions, unknown
    /// names and anything beyond [`MAX_SELECTION_DEPTH`] yield an empty set,
    /// which renders as a leaf. A field whose own set comes back empty is
    /// still selected, bare.
    #[must_use]
    pub fn selection_set(&self, type_name: &str, depth: usize) -> Vec<Selection> {
        if depth > MAX_SELECTION_DEPTH {
            return Vec::new();
        }

        let element = element_type_name(type_name);
        if is_builtin_scalar(element) {
            return Vec::new();
        }
        let Some(descriptor) = self.schema.get(element) else {
            return Vec::new();
        };

        match &descriptor.definition {
            TypeDefinition::Object { fields, .. } => {
                fields
                    .iter()
                    .map(|field| Selection {
                        name: field.name.clone(),
                        children: if is_builtin_scalar(field.type_name()) {
                            Vec::new()
                        } else {
                            self.selection_set(field.type_name(), depth + 1)
                        },
                    })
                    .collect()
            }
            TypeDefinition::Scalar
            | TypeDefinition::Enum { .. }
            | TypeDefinition::Interface { .. }
            | TypeDefinition::Union { .. }
            | TypeDefinition::InputObject { .. } => Vec::new(),
        }
    }

    /// Operation document for a root field, e.g.
    ///
    /// ```text
    /// query query_user($id: ID!) {
    ///   user(id: $id) {
    ///     id
    ///   }
    /// }
    /// ```
    #[must_use]
    pub fn query_document(&self, field: &FieldDescriptor, kind: OperationKind) -> String {
        let mut declarations = Vec::with_capacity(field.arguments.len());
        let mut call_arguments = Vec::with_capacity(field.arguments.len());
        for arg in &field.arguments {
            let bang = if arg.required { "!" } else { "" };
            declarations.push(format!("${}: {}{bang}", arg.name, arg.type_name));
            call_arguments.push(format!("{name}: ${name}", name = arg.name));
        }

        let mut document = format!("{kind} {kind}_{}", field.name);
        if !declarations.is_empty() {
            let _ = write!(document, "({})", declarations.join(", "));
        }
        document.push_str(" {\n  ");
        document.push_str(&field.name);
        if !call_arguments.is_empty() {
            let _ = write!(document, "({})", call_arguments.join(", "));
        }

        let selections = self.selection_set(field.type_name(), 0);
        write_selection_set(&mut document, &selections, 1);
        document.push_str("\n}");
        document
    }

    /// Example variables, one entry per argument in declaration order.
    #[must_use]
    pub fn variables(&self, field: &FieldDescriptor) -> Map<String, Value> {
        field
            .arguments
            .iter()
            .map(|arg| (arg.name.clone(), self.examples.synthesize(&arg.type_name, 0)))
            .collect()
    }

    /// Postman request item for a root field.
    pub fn build_item(
        &self,
        field: &FieldDescriptor,
        kind: OperationKind,
    ) -> Result<Item, RequestError> {
        let query = self.query_document(field, kind);
        let variables = self.variables(field);
        let variables = if variables.is_empty() {
            "{}".to_string()
        } else {
            serde_json::to_string_pretty(&variables).map_err(|source| RequestError::Variables {
                operation: format!("{kind} {}", field.name),
                source,
            })?
        };

        let request = Request {
            method: "POST".to_string(),
            header: Vec::new(),
            url: Url::variable(ENDPOINT_VARIABLE),
            body: Some(Body::Graphql {
                graphql: GraphqlBody { query, variables },
            }),
            description: Some(format!("GraphQL {kind} operation: {}", field.name)),
        };

        Ok(Item {
            name: field.name.clone(),
            request,
            response: Vec::new(),
        })
    }
}

/// Strips list brackets and non-null markers from a type name.
fn element_type_name(type_name: &str) -> &str {
    type_name.trim_matches(|c| matches!(c, '[' | ']' | '!'))
}

/// Appends ` { ... }` for a non-empty selection set whose owning field sits at
/// `level` (two spaces per level).
fn write_selection_set(out: &mut String, selections: &[Selection], level: usize) {
    if selections.is_empty() {
        return;
    }
    out.push_str(" {");
    let indent = "  ".repeat(level + 1);
    for selection in selections {
        out.push('\n');
        out.push_str(&indent);
        out.push_str(&selection.name);
        write_selection_set(out, &selection.children, level + 1);
    }
    out.push('\n');
    out.push_str(&"  ".repeat(level));
    out.push('}');
}
