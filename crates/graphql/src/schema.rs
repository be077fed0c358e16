//! Schema model construction from SDL text.
//!
//! The SDL is parsed with the error-tolerant `apollo-parser` CST, so a broken
//! declaration only costs that declaration: it is skipped with a diagnostic
//! and everything around it is still extracted.

use crate::error::{Result, SchemaError};
use crate::model::{
    ArgumentDescriptor, FieldDescriptor, OperationKind, SchemaModel, TypeDefinition,
    TypeDescriptor, TypeRef,
};
use apollo_parser::cst::{self, CstNode};
use postman_collection::{DiagnosticKind, Diagnostics};

/// A built schema together with the declarations that were skipped.
#[derive(Debug, Clone)]
pub struct SchemaBuild {
    pub schema: SchemaModel,
    pub diagnostics: Diagnostics,
}

/// Keywords that open a top-level declaration.
const DECLARATION_KEYWORDS: &[&str] = &[
    "type",
    "input",
    "enum",
    "interface",
    "union",
    "scalar",
    "extend",
    "schema",
    "directive",
];

/// Builds a [`SchemaModel`] from SDL text.
///
/// Object, input, enum, interface, union and scalar declarations are added to
/// the type table; a redeclared name replaces the earlier entry. Extensions
/// (`extend type Query { ... }`) count as redeclarations. Object types named
/// `Query`, `Mutation` or `Subscription` (any case) also provide the root
/// operation fields, again last-wins.
///
/// Each top-level declaration is parsed on its own, so an unterminated block
/// only loses itself and never swallows the declarations after it.
///
/// # Errors
///
/// Returns [`SchemaError::Unparseable`] when the text has syntax errors and
/// not a single declaration could be recovered from it.
#[tracing::instrument(skip(source), fields(size = source.len()))]
pub fn build_schema(source: &str) -> Result<SchemaBuild> {
    let mut builder = SchemaBuilder {
        schema: SchemaModel::new(),
        diagnostics: Diagnostics::new(),
        declarations: 0,
    };
    let mut syntax_errors = Vec::new();

    for chunk in split_declarations(source) {
        let tree = apollo_parser::Parser::new(chunk).parse();
        for error in tree.errors() {
            let message = error.message().to_string();
            builder
                .diagnostics
                .warn(DiagnosticKind::SyntaxError, "", message.clone());
            syntax_errors.push(message);
        }
        for definition in tree.document().definitions() {
            builder.add_definition(&definition);
        }
    }

    if builder.declarations == 0 && !syntax_errors.is_empty() {
        return Err(SchemaError::Unparseable {
            count: syntax_errors.len(),
            message: syntax_errors.swap_remove(0),
        });
    }

    tracing::info!(
        types = builder.schema.type_count(),
        queries = builder.schema.queries().len(),
        mutations = builder.schema.mutations().len(),
        subscriptions = builder.schema.subscriptions().len(),
        warnings = builder.diagnostics.len(),
        "Schema built"
    );

    Ok(SchemaBuild {
        schema: builder.schema,
        diagnostics: builder.diagnostics,
    })
}

/// Cuts SDL text into top-level declarations.
///
/// A declaration starts at a line whose first word is a declaration keyword
/// followed, on the same line, by a name, `@` or `{`; a description string
/// directly above it belongs to it. Strings and comments are skipped, braces
/// are not tracked.
fn split_declarations(source: &str) -> Vec<&str> {
    let bytes = source.as_bytes();
    let mut starts = vec![0];
    let mut line_start = true;
    let mut description_start: Option<usize> = None;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                line_start = true;
                i += 1;
            }
            b' ' | b'\t' | b'\r' | b',' => i += 1,
            b'#' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'"' => {
                description_start = line_start.then_some(i);
                i = skip_string(bytes, i);
                line_start = false;
            }
            _ => {
                if line_start && starts_declaration(&bytes[i..]) {
                    let start = description_start.unwrap_or(i);
                    if start > 0 {
                        starts.push(start);
                    }
                }
                description_start = None;
                line_start = false;
                i += 1;
                while i < bytes.len() && is_name_byte(bytes[i]) {
                    i += 1;
                }
            }
        }
    }

    starts.dedup();
    let mut chunks = Vec::with_capacity(starts.len());
    for (n, &start) in starts.iter().enumerate() {
        let end = starts.get(n + 1).copied().unwrap_or(source.len());
        chunks.push(&source[start..end]);
    }
    chunks
}

/// Index just past the string literal opening at `start`. A plain string
/// also ends at a line break, so an unterminated one cannot run on.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    if bytes[start..].starts_with(b"\"\"\"") {
        let mut i = start + 3;
        while i < bytes.len() {
            if bytes[i] == b'\\' && bytes[i + 1..].starts_with(b"\"\"\"") {
                i += 4;
            } else if bytes[i..].starts_with(b"\"\"\"") {
                return i + 3;
            } else {
                i += 1;
            }
        }
        return bytes.len();
    }

    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return i + 1,
            b'\n' => return i,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn starts_declaration(rest: &[u8]) -> bool {
    let word_len = rest.iter().take_while(|&&b| is_name_byte(b)).count();
    if !DECLARATION_KEYWORDS
        .iter()
        .any(|keyword| keyword.len() == word_len && rest.starts_with(keyword.as_bytes()))
    {
        return false;
    }
    let after = &rest[word_len..];
    let gap = after
        .iter()
        .take_while(|&&b| b == b' ' || b == b'\t')
        .count();
    match after.get(gap) {
        Some(b'@' | b'{') => true,
        Some(&b) => gap > 0 && (b.is_ascii_alphabetic() || b == b'_'),
        None => false,
    }
}

const fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

struct SchemaBuilder {
    schema: SchemaModel,
    diagnostics: Diagnostics,
    /// Type-system declarations seen, including skipped ones
    declarations: usize,
}

impl SchemaBuilder {
    fn add_definition(&mut self, definition: &cst::Definition) {
        let extracted = match definition {
            cst::Definition::ObjectTypeDefinition(obj) => self.extract_object_type(obj),
            cst::Definition::InterfaceTypeDefinition(iface) => self.extract_interface_type(iface),
            cst::Definition::UnionTypeDefinition(union) => extract_union_type(union),
            cst::Definition::EnumTypeDefinition(enum_def) => extract_enum_type(enum_def),
            cst::Definition::ScalarTypeDefinition(scalar) => extract_scalar_type(scalar),
            cst::Definition::InputObjectTypeDefinition(input) => {
                self.extract_input_object_type(input)
            }
            cst::Definition::ObjectTypeExtension(ext) => self.extract_object_type_extension(ext),
            cst::Definition::InterfaceTypeExtension(ext) => {
                self.extract_interface_type_extension(ext)
            }
            cst::Definition::UnionTypeExtension(ext) => extract_union_type_extension(ext),
            cst::Definition::EnumTypeExtension(ext) => extract_enum_type_extension(ext),
            cst::Definition::ScalarTypeExtension(ext) => {
                declaration_name(ext.name(), "extend scalar")
                    .map(|name| TypeDescriptor::new(name, TypeDefinition::Scalar))
            }
            cst::Definition::InputObjectTypeExtension(ext) => {
                self.extract_input_object_type_extension(ext)
            }
            cst::Definition::OperationDefinition(_) | cst::Definition::FragmentDefinition(_) => {
                self.declarations += 1;
                self.diagnostics.warn(
                    DiagnosticKind::MalformedDeclaration,
                    "",
                    "executable definitions are not part of a schema and were ignored",
                );
                return;
            }
            _ => {
                tracing::debug!("Ignoring schema definition or directive");
                return;
            }
        };

        self.declarations += 1;
        match extracted {
            Ok(descriptor) => self.insert(descriptor),
            Err(message) => {
                self.diagnostics
                    .warn(DiagnosticKind::MalformedDeclaration, "", message);
            }
        }
    }

    fn insert(&mut self, descriptor: TypeDescriptor) {
        if let TypeDefinition::Object { fields, .. } = &descriptor.definition {
            if let Some(kind) = OperationKind::from_root_type_name(&descriptor.name) {
                tracing::debug!(
                    root = %descriptor.name,
                    fields = fields.len(),
                    "Found root operation type"
                );
                self.schema.set_root_fields(kind, fields.clone());
            }
        }

        tracing::trace!(name = %descriptor.name, kind = %descriptor.kind(), "Adding type");
        if self.schema.insert(descriptor).is_some() {
            tracing::debug!("Type redeclared, later declaration wins");
        }
    }

    fn extract_object_type(
        &mut self,
        obj: &cst::ObjectTypeDefinition,
    ) -> std::result::Result<TypeDescriptor, String> {
        let name = declaration_name(obj.name(), "type")?;
        let fields = self.extract_fields(&name, obj.fields_definition());
        let interfaces = implemented_interfaces(obj.implements_interfaces());

        Ok(TypeDescriptor {
            description: description_text(obj.description()),
            definition: TypeDefinition::Object { fields, interfaces },
            name,
        })
    }

    fn extract_interface_type(
        &mut self,
        iface: &cst::InterfaceTypeDefinition,
    ) -> std::result::Result<TypeDescriptor, String> {
        let name = declaration_name(iface.name(), "interface")?;
        let fields = self.extract_fields(&name, iface.fields_definition());
        let interfaces = implemented_interfaces(iface.implements_interfaces());

        Ok(TypeDescriptor {
            description: description_text(iface.description()),
            definition: TypeDefinition::Interface { fields, interfaces },
            name,
        })
    }

    fn extract_input_object_type(
        &mut self,
        input: &cst::InputObjectTypeDefinition,
    ) -> std::result::Result<TypeDescriptor, String> {
        let name = declaration_name(input.name(), "input")?;
        let fields = self.extract_input_fields(&name, input.input_fields_definition());

        Ok(TypeDescriptor {
            description: description_text(input.description()),
            definition: TypeDefinition::InputObject { fields },
            name,
        })
    }

    fn extract_object_type_extension(
        &mut self,
        ext: &cst::ObjectTypeExtension,
    ) -> std::result::Result<TypeDescriptor, String> {
        let name = declaration_name(ext.name(), "extend type")?;
        let fields = self.extract_fields(&name, ext.fields_definition());
        let interfaces = implemented_interfaces(ext.implements_interfaces());
        Ok(TypeDescriptor::new(
            name,
            TypeDefinition::Object { fields, interfaces },
        ))
    }

    fn extract_interface_type_extension(
        &mut self,
        ext: &cst::InterfaceTypeExtension,
    ) -> std::result::Result<TypeDescriptor, String> {
        let name = declaration_name(ext.name(), "extend interface")?;
        let fields = self.extract_fields(&name, ext.fields_definition());
        let interfaces = implemented_interfaces(ext.implements_interfaces());
        Ok(TypeDescriptor::new(
            name,
            TypeDefinition::Interface { fields, interfaces },
        ))
    }

    fn extract_input_object_type_extension(
        &mut self,
        ext: &cst::InputObjectTypeExtension,
    ) -> std::result::Result<TypeDescriptor, String> {
        let name = declaration_name(ext.name(), "extend input")?;
        let fields = self.extract_input_fields(&name, ext.input_fields_definition());
        Ok(TypeDescriptor::new(name, TypeDefinition::InputObject { fields }))
    }

    fn extract_input_fields(
        &mut self,
        owner: &str,
        fields: Option<cst::InputFieldsDefinition>,
    ) -> Vec<FieldDescriptor> {
        fields
            .into_iter()
            .flat_map(|def| def.input_value_definitions())
            .filter_map(|value| self.extract_input_field(owner, &value))
            .collect()
    }

    fn extract_fields(
        &mut self,
        owner: &str,
        fields: Option<cst::FieldsDefinition>,
    ) -> Vec<FieldDescriptor> {
        fields
            .into_iter()
            .flat_map(|def| def.field_definitions())
            .filter_map(|field| self.extract_field(owner, &field))
            .collect()
    }

    fn extract_field(
        &mut self,
        owner: &str,
        field: &cst::FieldDefinition,
    ) -> Option<FieldDescriptor> {
        let Some(name) = field.name().map(|n| n.text().to_string()) else {
            self.diagnostics.warn(
                DiagnosticKind::MalformedDeclaration,
                owner,
                "field has no name",
            );
            return None;
        };
        let Some(type_ref) = field.ty().as_ref().and_then(extract_type_ref) else {
            self.diagnostics.warn(
                DiagnosticKind::MalformedDeclaration,
                format!("{owner}.{name}"),
                "field has no type",
            );
            return None;
        };

        let mut descriptor = FieldDescriptor {
            name,
            type_ref,
            arguments: Vec::new(),
            description: description_text(field.description()),
            deprecated: is_deprecated(field.directives()),
        };

        let arguments: Vec<cst::InputValueDefinition> = field
            .arguments_definition()
            .into_iter()
            .flat_map(|args| args.input_value_definitions())
            .collect();
        for arg in &arguments {
            if let Some(argument) = self.extract_argument(owner, &descriptor.name, arg) {
                descriptor.insert_argument(argument);
            }
        }

        Some(descriptor)
    }

    fn extract_input_field(
        &mut self,
        owner: &str,
        value: &cst::InputValueDefinition,
    ) -> Option<FieldDescriptor> {
        let Some(name) = value.name().map(|n| n.text().to_string()) else {
            self.diagnostics.warn(
                DiagnosticKind::MalformedDeclaration,
                owner,
                "input field has no name",
            );
            return None;
        };
        let Some(type_ref) = value.ty().as_ref().and_then(extract_type_ref) else {
            self.diagnostics.warn(
                DiagnosticKind::MalformedDeclaration,
                format!("{owner}.{name}"),
                "input field has no type",
            );
            return None;
        };

        Some(FieldDescriptor {
            name,
            type_ref,
            arguments: Vec::new(),
            description: description_text(value.description()),
            deprecated: is_deprecated(value.directives()),
        })
    }

    fn extract_argument(
        &mut self,
        owner: &str,
        field: &str,
        arg: &cst::InputValueDefinition,
    ) -> Option<ArgumentDescriptor> {
        let subject = format!("{owner}.{field}");
        let Some(name) = arg.name().map(|n| n.text().to_string()) else {
            self.diagnostics.warn(
                DiagnosticKind::MalformedDeclaration,
                subject,
                "argument has no name",
            );
            return None;
        };
        let Some(type_ref) = arg.ty().as_ref().and_then(extract_type_ref) else {
            self.diagnostics.warn(
                DiagnosticKind::MalformedDeclaration,
                format!("{subject}({name})"),
                "argument has no type",
            );
            return None;
        };

        let default_value = arg
            .default_value()
            .and_then(|v| v.value().map(|val| val.syntax().text().to_string()))
            .map(|text| text.trim().trim_end_matches(',').trim_end().to_string());

        Some(ArgumentDescriptor {
            name,
            type_name: type_ref.name,
            required: type_ref.is_required,
            default_value,
        })
    }
}

fn extract_union_type(union: &cst::UnionTypeDefinition) -> std::result::Result<TypeDescriptor, String> {
    let name = declaration_name(union.name(), "union")?;
    Ok(TypeDescriptor {
        description: description_text(union.description()),
        definition: TypeDefinition::Union {
            members: union_members(union.union_member_types()),
        },
        name,
    })
}

fn extract_union_type_extension(
    ext: &cst::UnionTypeExtension,
) -> std::result::Result<TypeDescriptor, String> {
    let name = declaration_name(ext.name(), "extend union")?;
    let members = union_members(ext.union_member_types());
    Ok(TypeDescriptor::new(name, TypeDefinition::Union { members }))
}

fn union_members(members: Option<cst::UnionMemberTypes>) -> Vec<String> {
    members
        .into_iter()
        .flat_map(|members| members.named_types())
        .filter_map(|t| t.name().map(|n| n.text().to_string()))
        .collect()
}

fn extract_enum_type(enum_def: &cst::EnumTypeDefinition) -> std::result::Result<TypeDescriptor, String> {
    let name = declaration_name(enum_def.name(), "enum")?;
    Ok(TypeDescriptor {
        description: description_text(enum_def.description()),
        definition: TypeDefinition::Enum {
            values: enum_values(enum_def.enum_values_definition()),
        },
        name,
    })
}

fn extract_enum_type_extension(
    ext: &cst::EnumTypeExtension,
) -> std::result::Result<TypeDescriptor, String> {
    let name = declaration_name(ext.name(), "extend enum")?;
    let values = enum_values(ext.enum_values_definition());
    Ok(TypeDescriptor::new(name, TypeDefinition::Enum { values }))
}

fn enum_values(values: Option<cst::EnumValuesDefinition>) -> Vec<String> {
    values
        .into_iter()
        .flat_map(|values| values.enum_value_definitions())
        .filter_map(|v| {
            v.enum_value()
                .and_then(|e| e.name())
                .map(|n| n.text().to_string())
        })
        .collect()
}

fn extract_scalar_type(scalar: &cst::ScalarTypeDefinition) -> std::result::Result<TypeDescriptor, String> {
    let name = declaration_name(scalar.name(), "scalar")?;
    Ok(TypeDescriptor {
        description: description_text(scalar.description()),
        definition: TypeDefinition::Scalar,
        name,
    })
}

fn declaration_name(name: Option<cst::Name>, keyword: &str) -> std::result::Result<String, String> {
    name.map(|n| n.text().to_string())
        .ok_or_else(|| format!("{keyword} declaration has no name and was skipped"))
}

fn implemented_interfaces(implements: Option<cst::ImplementsInterfaces>) -> Vec<String> {
    implements
        .into_iter()
        .flat_map(|impls| impls.named_types())
        .filter_map(|t| t.name().map(|n| n.text().to_string()))
        .collect()
}

fn description_text(description: Option<cst::Description>) -> Option<String> {
    description
        .map(|d| d.syntax().text().to_string())
        .map(|text| text.trim().trim_matches('"').trim().to_string())
        .filter(|text| !text.is_empty())
}

fn is_deprecated(directives: Option<cst::Directives>) -> bool {
    directives
        .into_iter()
        .flat_map(|d| d.directives())
        .any(|d| d.name().is_some_and(|n| n.text().as_str() == "deprecated"))
}

/// Flattens a CST type into a named type plus list/non-null markers.
fn extract_type_ref(ty: &cst::Type) -> Option<TypeRef> {
    let is_required = matches!(ty, cst::Type::NonNullType(_));
    let mut is_list = false;
    let name = base_type_name(ty, &mut is_list)?;
    Some(TypeRef {
        name,
        is_list,
        is_required,
    })
}

fn base_type_name(ty: &cst::Type, is_list: &mut bool) -> Option<String> {
    match ty {
        cst::Type::NamedType(named) => Some(named.name()?.text().to_string()),
        cst::Type::ListType(list) => {
            *is_list = true;
            base_type_name(&list.ty()?, is_list)
        }
        cst::Type::NonNullType(non_null) => {
            if let Some(named) = non_null.named_type() {
                Some(named.name()?.text().to_string())
            } else if let Some(list) = non_null.list_type() {
                *is_list = true;
                base_type_name(&list.ty()?, is_list)
            } else {
                None
            }
        }
    }
}
