//! Typed schema model built from SDL.
//!
//! Type references between declarations (field types, `implements` lists,
//! union members) are plain names resolved through [`SchemaModel::get`] at use
//! time, so declaration order never matters.

use std::collections::BTreeMap;

/// Kind of a GraphQL type.
///
/// The six named kinds describe declarations; `List` and `NonNull` describe
/// the wrappers a [`TypeRef`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Self::Scalar => "scalar",
            Self::Object => "type",
            Self::Interface => "interface",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::InputObject => "input",
            Self::List => "list",
            Self::NonNull => "non-null",
        };
        f.write_str(text)
    }
}

/// Reference to a named type with its list/non-null markers.
///
/// Nested lists and lists of non-null elements are not distinguished: a type
/// written as `[[User!]]!` is `User` with both flags set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeRef {
    pub name: String,
    /// The type text contains a list wrapper anywhere
    pub is_list: bool,
    /// The outermost wrapper is non-null (the type text ends in `!`)
    pub is_required: bool,
}

impl TypeRef {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_list: false,
            is_required: false,
        }
    }

    /// The outermost wrapper of this reference, if any.
    #[must_use]
    pub const fn wrapper_kind(&self) -> Option<TypeKind> {
        if self.is_required {
            Some(TypeKind::NonNull)
        } else if self.is_list {
            Some(TypeKind::List)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    pub name: String,
    /// Named type with brackets and `!` stripped
    pub type_name: String,
    pub required: bool,
    /// Default value text exactly as written in the SDL
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_ref: TypeRef,
    /// Arguments in declaration order; names are unique
    pub arguments: Vec<ArgumentDescriptor>,
    pub description: Option<String>,
    pub deprecated: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_ref.name
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.type_ref.is_required
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        self.type_ref.is_list
    }

    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ArgumentDescriptor> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    /// Adds an argument. A repeated name replaces the earlier value but keeps
    /// its position.
    pub fn insert_argument(&mut self, argument: ArgumentDescriptor) {
        match self.arguments.iter_mut().find(|arg| arg.name == argument.name) {
            Some(existing) => *existing = argument,
            None => self.arguments.push(argument),
        }
    }
}

/// Kind-specific contents of a type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDefinition {
    Scalar,
    Object {
        fields: Vec<FieldDescriptor>,
        interfaces: Vec<String>,
    },
    Interface {
        fields: Vec<FieldDescriptor>,
        interfaces: Vec<String>,
    },
    Union {
        members: Vec<String>,
    },
    Enum {
        values: Vec<String>,
    },
    InputObject {
        fields: Vec<FieldDescriptor>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    pub name: String,
    pub description: Option<String>,
    pub definition: TypeDefinition,
}

impl TypeDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, definition: TypeDefinition) -> Self {
        Self {
            name: name.into(),
            description: None,
            definition,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        match self.definition {
            TypeDefinition::Scalar => TypeKind::Scalar,
            TypeDefinition::Object { .. } => TypeKind::Object,
            TypeDefinition::Interface { .. } => TypeKind::Interface,
            TypeDefinition::Union { .. } => TypeKind::Union,
            TypeDefinition::Enum { .. } => TypeKind::Enum,
            TypeDefinition::InputObject { .. } => TypeKind::InputObject,
        }
    }

    /// Output fields of an object or interface; empty for other kinds.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        match &self.definition {
            TypeDefinition::Object { fields, .. } | TypeDefinition::Interface { fields, .. } => {
                fields
            }
            _ => &[],
        }
    }

    /// Fields of an input object; empty for other kinds.
    #[must_use]
    pub fn input_fields(&self) -> &[FieldDescriptor] {
        match &self.definition {
            TypeDefinition::InputObject { fields } => fields,
            _ => &[],
        }
    }

    #[must_use]
    pub fn enum_values(&self) -> &[String] {
        match &self.definition {
            TypeDefinition::Enum { values } => values,
            _ => &[],
        }
    }

    #[must_use]
    pub fn interfaces(&self) -> &[String] {
        match &self.definition {
            TypeDefinition::Object { interfaces, .. }
            | TypeDefinition::Interface { interfaces, .. } => interfaces,
            _ => &[],
        }
    }

    #[must_use]
    pub fn possible_types(&self) -> &[String] {
        match &self.definition {
            TypeDefinition::Union { members } => members,
            _ => &[],
        }
    }
}

/// Root operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub const ALL: [Self; 3] = [Self::Query, Self::Mutation, Self::Subscription];

    /// Keyword used in operation documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    /// Name of the collection folder holding operations of this kind.
    #[must_use]
    pub const fn folder_name(self) -> &'static str {
        match self {
            Self::Query => "queries",
            Self::Mutation => "mutations",
            Self::Subscription => "subscriptions",
        }
    }

    /// Matches a root type name (`Query`, `mutation`, ...) case-insensitively.
    #[must_use]
    pub fn from_root_type_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| name.eq_ignore_ascii_case(kind.as_str()))
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Name-indexed type table plus the root operation fields.
///
/// Built once per SDL document and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaModel {
    types: BTreeMap<String, TypeDescriptor>,
    queries: Vec<FieldDescriptor>,
    mutations: Vec<FieldDescriptor>,
    subscriptions: Vec<FieldDescriptor>,
}

impl SchemaModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Inserts a declaration, replacing any earlier one with the same name.
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> Option<TypeDescriptor> {
        self.types.insert(descriptor.name.clone(), descriptor)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    #[must_use]
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn root_fields(&self, kind: OperationKind) -> &[FieldDescriptor] {
        match kind {
            OperationKind::Query => &self.queries,
            OperationKind::Mutation => &self.mutations,
            OperationKind::Subscription => &self.subscriptions,
        }
    }

    /// Replaces the root fields for `kind`; a later root block wins.
    pub fn set_root_fields(&mut self, kind: OperationKind, fields: Vec<FieldDescriptor>) {
        match kind {
            OperationKind::Query => self.queries = fields,
            OperationKind::Mutation => self.mutations = fields,
            OperationKind::Subscription => self.subscriptions = fields,
        }
    }

    #[must_use]
    pub fn queries(&self) -> &[FieldDescriptor] {
        &self.queries
    }

    #[must_use]
    pub fn mutations(&self) -> &[FieldDescriptor] {
        &self.mutations
    }

    #[must_use]
    pub fn subscriptions(&self) -> &[FieldDescriptor] {
        &self.subscriptions
    }
}
