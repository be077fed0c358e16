//! Example JSON bodies from RAML type declarations.

use serde_json::{json, Map, Value as Json};
use serde_yaml::{Mapping, Value};

/// Deepest nesting level that still produces a value; anything deeper is `null`.
pub const MAX_EXAMPLE_DEPTH: usize = 5;

/// Fixed example literal for a RAML primitive type name.
#[must_use]
pub fn primitive_example(name: &str) -> Option<Json> {
    let value = match name {
        "string" => json!("example string"),
        "integer" => json!(123),
        "number" => json!(123.45),
        "boolean" => json!(true),
        "datetime" => json!("2024-01-01T12:00:00Z"),
        "date" => json!("2024-01-01"),
        "array" => json!([]),
        "object" => json!({}),
        "file" => json!("file.txt"),
        _ => return None,
    };
    Some(value)
}

/// Whether a JSON value counts as present: `null`, `false`, `0`, `""`, `[]`
/// and `{}` do not.
#[must_use]
pub fn is_truthy(value: &Json) -> bool {
    match value {
        Json::Null => false,
        Json::Bool(flag) => *flag,
        Json::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Json::String(text) => !text.is_empty(),
        Json::Array(items) => !items.is_empty(),
        Json::Object(fields) => !fields.is_empty(),
    }
}

fn is_yaml_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Sequence(items) => !items.is_empty(),
        Value::Mapping(fields) => !fields.is_empty(),
        Value::Tagged(_) => true,
    }
}

/// Expands RAML type expressions into example JSON, resolving named types
/// through the document's `types` mapping.
#[derive(Debug, Clone, Copy)]
pub struct ExampleSynthesizer<'a> {
    types: &'a Mapping,
}

impl<'a> ExampleSynthesizer<'a> {
    #[must_use]
    pub const fn new(types: &'a Mapping) -> Self {
        Self { types }
    }

    /// Example for a type expression at nesting level `depth`.
    ///
    /// Strings are type names (`string`, `User`, `User[]`), mappings are
    /// property tables, and everything else, including empty values, gives
    /// `null`.
    #[must_use]
    pub fn synthesize(&self, type_def: &Value, depth: usize) -> Json {
        if depth > MAX_EXAMPLE_DEPTH || !is_yaml_truthy(type_def) {
            return Json::Null;
        }

        match type_def {
            Value::String(name) => self.synthesize_named(name, depth),
            Value::Mapping(properties) => self.synthesize_properties(properties, depth),
            Value::Tagged(tagged) => self.synthesize(&tagged.value, depth),
            _ => Json::Null,
        }
    }

    fn synthesize_named(&self, name: &str, depth: usize) -> Json {
        if let Some(declared) = self.types.get(name) {
            match declared {
                Value::Mapping(declaration) => {
                    if let Some(properties) = declaration.get("properties") {
                        return self.synthesize(properties, depth + 1);
                    }
                    if let Some(inner) = declaration.get("type") {
                        return self.synthesize(inner, depth + 1);
                    }
                }
                // `UserId: string`
                Value::String(_) => return self.synthesize(declared, depth + 1),
                _ => {}
            }
        }

        if let Some(element) = name.strip_suffix("[]") {
            let example = self.synthesize_named_at(element, depth + 1);
            return if is_truthy(&example) {
                Json::Array(vec![example])
            } else {
                Json::Array(Vec::new())
            };
        }

        primitive_example(name).unwrap_or_else(|| Json::String(format!("example_{name}")))
    }

    fn synthesize_named_at(&self, name: &str, depth: usize) -> Json {
        if depth > MAX_EXAMPLE_DEPTH || name.is_empty() {
            return Json::Null;
        }
        self.synthesize_named(name, depth)
    }

    fn synthesize_properties(&self, properties: &Mapping, depth: usize) -> Json {
        let mut example = Map::new();
        for (key, definition) in properties {
            let Some(key) = crate::document::scalar_text(key) else {
                continue;
            };
            let value = match definition {
                Value::Mapping(declaration) => match declaration.get("type") {
                    Some(inner) => self.synthesize(inner, depth + 1),
                    None => self.synthesize(definition, depth + 1),
                },
                _ => self.synthesize(definition, depth + 1),
            };
            example.insert(key, value);
        }
        Json::Object(example)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPES: &str = r"
UserId: string
Address:
  properties:
    street: string
    zip: integer
User:
  type: object
  properties:
    id: UserId
    name:
      type: string
    active: boolean
    address: Address
    tags: string[]
Admin:
  type: User
Tree:
  properties:
    children: Tree[]
Blank:
  description: no shape
";

    fn types() -> Mapping {
        serde_yaml::from_str(TYPES).unwrap()
    }

    fn name(text: &str) -> Value {
        Value::String(text.to_string())
    }

    #[test]
    fn test_primitives() {
        let types = Mapping::new();
        let examples = ExampleSynthesizer::new(&types);
        assert_eq!(examples.synthesize(&name("string"), 0), json!("example string"));
        assert_eq!(examples.synthesize(&name("integer"), 0), json!(123));
        assert_eq!(examples.synthesize(&name("number"), 0), json!(123.45));
        assert_eq!(examples.synthesize(&name("file"), 0), json!("file.txt"));
        assert_eq!(examples.synthesize(&name("object"), 0), json!({}));
        assert_eq!(examples.synthesize(&name("Widget"), 0), json!("example_Widget"));
    }

    #[test]
    fn test_named_type_expansion() {
        let types = types();
        let examples = ExampleSynthesizer::new(&types);
        assert_eq!(
            examples.synthesize(&name("User"), 0),
            json!({
                "id": "example string",
                "name": "example string",
                "active": true,
                "address": {"street": "example string", "zip": 123},
                "tags": ["example string"]
            })
        );
    }

    #[test]
    fn test_type_alias_chain() {
        let types = types();
        let examples = ExampleSynthesizer::new(&types);
        assert_eq!(examples.synthesize(&name("UserId"), 0), json!("example string"));
        assert_eq!(
            examples.synthesize(&name("Admin"), 0),
            examples.synthesize(&name("User"), 1)
        );
    }

    #[test]
    fn test_declaration_without_shape_is_a_placeholder() {
        let types = types();
        let examples = ExampleSynthesizer::new(&types);
        assert_eq!(examples.synthesize(&name("Blank"), 0), json!("example_Blank"));
    }

    #[test]
    fn test_array_of_nothing_is_empty() {
        let types: Mapping = serde_yaml::from_str("Empty:\n  properties: {}\n").unwrap();
        let examples = ExampleSynthesizer::new(&types);
        assert_eq!(examples.synthesize(&name("Empty[]"), 0), json!([]));
        assert_eq!(examples.synthesize(&name("integer[]"), 0), json!([123]));
    }

    #[test]
    fn test_self_reference_terminates() {
        let types = types();
        let examples = ExampleSynthesizer::new(&types);
        let example = examples.synthesize(&name("Tree"), 0);

        let mut depth = 0;
        let mut node = &example;
        while let Some(children) = node.get("children").and_then(Json::as_array) {
            match children.first() {
                Some(child) => node = child,
                None => break,
            }
            depth += 1;
        }
        assert!(depth <= MAX_EXAMPLE_DEPTH);
    }

    #[test]
    fn test_depth_ceiling_and_falsy_inputs() {
        let types = types();
        let examples = ExampleSynthesizer::new(&types);
        for depth in MAX_EXAMPLE_DEPTH + 1..MAX_EXAMPLE_DEPTH + 3 {
            assert_eq!(examples.synthesize(&name("string"), depth), Json::Null);
            assert_eq!(examples.synthesize(&name("User"), depth), Json::Null);
        }
        assert_eq!(examples.synthesize(&Value::Null, 0), Json::Null);
        assert_eq!(examples.synthesize(&name(""), 0), Json::Null);
        assert_eq!(examples.synthesize(&Value::Mapping(Mapping::new()), 0), Json::Null);
        assert_eq!(
            examples.synthesize(&serde_yaml::from_str("[A, B]").unwrap(), 0),
            Json::Null
        );
    }

    #[test]
    fn test_inline_properties() {
        let types = Mapping::new();
        let examples = ExampleSynthesizer::new(&types);
        let inline: Value =
            serde_yaml::from_str("title: string\ncount:\n  type: integer\nextra: {}\n").unwrap();
        assert_eq!(
            examples.synthesize(&inline, 0),
            json!({"title": "example string", "count": 123, "extra": null})
        );
    }
}
