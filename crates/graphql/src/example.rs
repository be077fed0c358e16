//! Example values for GraphQL input types.

use crate::model::{SchemaModel, TypeDefinition};
use serde_json::{json, Map, Value};

/// Deepest nesting level that still produces a value; anything deeper is `null`.
pub const MAX_EXAMPLE_DEPTH: usize = 5;

/// Optional input fields are only filled in below this depth.
const OPTIONAL_FIELD_DEPTH: usize = 2;

/// Scalar names treated as built in, whether or not the SDL declares them.
pub const BUILTIN_SCALARS: &[&str] = &[
    "String", "Int", "Float", "Boolean", "ID", "DateTime", "Date", "Time", "JSON", "Upload",
    "BigInt", "Long", "UUID",
];

#[must_use]
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Fixed example literal for a built-in scalar.
///
/// Returns `None` for names without a literal, including `Upload`.
#[must_use]
pub fn scalar_example(name: &str) -> Option<Value> {
    let value = match name {
        "String" => json!("example string"),
        "Int" => json!(123),
        "Float" => json!(123.45),
        "Boolean" => json!(true),
        "ID" => json!("example-id-123"),
        "DateTime" => json!("2024-01-01T12:00:00Z"),
        "Date" => json!("2024-01-01"),
        "Time" => json!("12:00:00"),
        "JSON" => json!({"key": "value"}),
        "UUID" => json!("550e8400-e29b-41d4-a716-446655440000"),
        "BigInt" | "Long" => json!(i64::MAX),
        _ => return None,
    };
    Some(value)
}

fn placeholder(name: &str) -> Value {
    Value::String(format!("example_{name}"))
}

/// Produces representative values for argument and input types.
///
/// Never fails: names that resolve to nothing become `"example_<Name>"`.
#[derive(Debug, Clone, Copy)]
pub struct ExampleSynthesizer<'a> {
    schema: &'a SchemaModel,
}

impl<'a> ExampleSynthesizer<'a> {
    #[must_use]
    pub const fn new(schema: &'a SchemaModel) -> Self {
        Self { schema }
    }

    /// Example value for `type_name` at nesting level `depth`.
    #[must_use]
    pub fn synthesize(&self, type_name: &str, depth: usize) -> Value {
        if depth > MAX_EXAMPLE_DEPTH {
            return Value::Null;
        }

        if is_builtin_scalar(type_name) {
            return scalar_example(type_name).unwrap_or_else(|| placeholder(type_name));
        }

        let Some(descriptor) = self.schema.get(type_name) else {
            return placeholder(type_name);
        };

        match &descriptor.definition {
            TypeDefinition::Enum { values } => values
                .first()
                .map_or_else(|| json!("ENUM_VALUE"), |value| json!(value)),
            TypeDefinition::InputObject { fields } => {
                let mut example = Map::new();
                for field in fields {
                    if field.is_required() || depth < OPTIONAL_FIELD_DEPTH {
                        example.insert(
                            field.name.clone(),
                            self.synthesize(field.type_name(), depth + 1),
                        );
                    }
                }
                Value::Object(example)
            }
            TypeDefinition::Object { .. } => Value::String(format!("<{type_name} object>")),
            TypeDefinition::Scalar
            | TypeDefinition::Interface { .. }
            | TypeDefinition::Union { .. } => placeholder(type_name),
        }
    }
}
