//! Output model shared by the GraphQL and RAML converters.
//!
//! This crate provides the pieces both pipelines assemble their results into:
//!
//! - **Collection model**: [`Collection`], [`Folder`], [`Item`], [`Request`] and
//!   friends, serializable to the Postman Collection v2.1.0 JSON layout
//! - **Folder assembly**: [`FolderSet`] groups request items by key while
//!   keeping first-seen order, [`folder_display_name`] derives folder titles
//! - **Diagnostics**: [`Diagnostics`] collects the recoverable problems a
//!   conversion ran into, so callers can report them without parsing logs

mod diagnostics;
mod folder;
mod model;

pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSeverity, Diagnostics};
pub use folder::{folder_display_name, title_case, FolderSet};
pub use model::{
    Body, Collection, Folder, FormParam, FormParamKind, GraphqlBody, Header, Info, Item,
    QueryParam, RawLanguage, RawOptions, Request, Response, Url, Variable, SCHEMA_URL,
};

/// A finished collection together with the diagnostics recorded while
/// building it.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub collection: Collection,
    pub diagnostics: Diagnostics,
}
