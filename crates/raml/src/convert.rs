//! Collection assembly for RAML documents.

use crate::document::{resource_entries, RamlDocument};
use crate::error::Result;
use crate::request::{http_method, RequestBuilder};
use postman_collection::{
    folder_display_name, Collection, Conversion, DiagnosticKind, Diagnostics, FolderSet, Info,
    Item, Variable,
};
use serde_yaml::Value;

/// Collection variable holding the base URI.
pub const BASE_URL_VARIABLE: &str = "baseUrl";

/// Folder key for requests on the root resource `/`.
const ROOT_FOLDER: &str = "root";

/// Settings for a RAML conversion. Unset fields fall back to the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Replaces `"<title> <version>"` as the collection name
    pub collection_name: Option<String>,
    /// Replaces the document's `baseUri`
    pub base_uri: Option<String>,
}

/// A request item with the resource path it was built from.
#[derive(Debug)]
struct ResourceRequest {
    path: String,
    item: Item,
}

/// Builds a collection with one folder per first path segment.
///
/// Folders and the requests inside them keep document order: a resource's
/// methods come before its nested resources.
#[tracing::instrument(skip_all, fields(title = %document.title))]
pub fn convert_document(document: &RamlDocument, options: &ConvertOptions) -> Result<Conversion> {
    let base_uri = options
        .base_uri
        .as_deref()
        .unwrap_or(document.base_uri.as_str());
    let builder = RequestBuilder::new(base_uri, document.types());
    let mut diagnostics = Diagnostics::new();

    let mut requests = Vec::new();
    for (path, resource) in document.resources() {
        collect_requests(&builder, "", path, resource, &mut requests, &mut diagnostics)?;
    }

    let mut folders = FolderSet::new();
    for request in requests {
        let key = folder_key(&request.path);
        folders.push(key, || folder_display_name(key), request.item);
    }

    let name = options
        .collection_name
        .clone()
        .unwrap_or_else(|| document.display_name());
    let info = Info::new(name).with_description(format!(
        "Generated from RAML specification: {}",
        document.title
    ));
    let variables = vec![Variable::string(BASE_URL_VARIABLE, base_uri)];
    let collection = Collection::new(info, folders.into_folders(), variables);

    tracing::info!(
        folders = collection.item.len(),
        requests = collection.request_count(),
        "Built RAML collection"
    );

    Ok(Conversion {
        collection,
        diagnostics,
    })
}

/// Parses RAML text and converts it in one step.
pub fn convert_raml(source: &str, options: &ConvertOptions) -> Result<Conversion> {
    let document = RamlDocument::parse(source)?;
    convert_document(&document, options)
}

/// Appends the requests of `resource` and, after them, those of its nested
/// resources.
fn collect_requests(
    builder: &RequestBuilder<'_>,
    parent: &str,
    segment: &str,
    resource: &Value,
    requests: &mut Vec<ResourceRequest>,
    diagnostics: &mut Diagnostics,
) -> Result<()> {
    let path = format!("{parent}{segment}");
    let Value::Mapping(resource) = resource else {
        diagnostics.warn(
            DiagnosticKind::MalformedDeclaration,
            path,
            "resource is not a mapping; skipped",
        );
        return Ok(());
    };

    for (key, definition) in resource {
        let Some(method) = key.as_str().and_then(http_method) else {
            continue;
        };
        let item = builder.build_item(method, &path, definition)?;
        requests.push(ResourceRequest {
            path: path.clone(),
            item,
        });
    }

    for (nested, definition) in resource_entries(resource) {
        collect_requests(builder, &path, nested, definition, requests, diagnostics)?;
    }
    Ok(())
}

/// First non-empty segment of a resource path.
fn folder_key(path: &str) -> &str {
    path.split('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(ROOT_FOLDER)
}
