//! Collection assembly for GraphQL schemas.

use crate::error::Result;
use crate::model::{OperationKind, SchemaModel};
use crate::request::{RequestBuilder, ENDPOINT_VARIABLE};
use crate::schema::build_schema;
use postman_collection::{
    Collection, Conversion, DiagnosticKind, Diagnostics, FolderSet, Info, Variable,
};

pub const DEFAULT_COLLECTION_NAME: &str = "Postman Collection (from GraphQL)";
pub const DEFAULT_ENDPOINT: &str = "https://api.example.com/graphql";

/// Settings for a GraphQL conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub collection_name: String,
    /// Value of the `url` collection variable every request targets
    pub endpoint: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            collection_name: DEFAULT_COLLECTION_NAME.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Builds a collection with one folder per non-empty operation kind.
///
/// A root field whose request cannot be built is left out and recorded as a
/// [`DiagnosticKind::SkippedRequest`]; the rest of the collection is still
/// produced.
#[tracing::instrument(skip_all, fields(collection = %options.collection_name))]
pub fn convert_schema(schema: &SchemaModel, options: &ConvertOptions) -> Conversion {
    let builder = RequestBuilder::new(schema);
    let mut diagnostics = Diagnostics::new();
    let mut folders = FolderSet::new();

    for kind in OperationKind::ALL {
        let mut items = Vec::new();
        for field in schema.root_fields(kind) {
            match builder.build_item(field, kind) {
                Ok(item) => {
                    tracing::debug!(operation = %kind, field = %field.name, "Added request");
                    items.push(item);
                }
                Err(err) => diagnostics.warn(
                    DiagnosticKind::SkippedRequest,
                    format!("{kind} {}", field.name),
                    err.to_string(),
                ),
            }
        }
        folders.push_folder(kind.folder_name(), items);
    }

    let info = Info::new(options.collection_name.clone()).auto_generated();
    let variables = vec![Variable::string(ENDPOINT_VARIABLE, options.endpoint.clone())];
    let collection = Collection::new(info, folders.into_folders(), variables);

    tracing::info!(
        folders = collection.item.len(),
        requests = collection.request_count(),
        "Built GraphQL collection"
    );

    Conversion {
        collection,
        diagnostics,
    }
}

/// Parses SDL text and converts it in one step.
///
/// Diagnostics from parsing come first, followed by those from request
/// assembly.
pub fn convert_sdl(source: &str, options: &ConvertOptions) -> Result<Conversion> {
    let build = build_schema(source)?;
    let mut conversion = convert_schema(&build.schema, options);
    let mut diagnostics = build.diagnostics;
    diagnostics.extend(conversion.diagnostics);
    conversion.diagnostics = diagnostics;
    Ok(conversion)
}
