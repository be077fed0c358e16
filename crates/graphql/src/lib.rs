//! GraphQL SDL to Postman collection conversion.
//!
//! The pipeline has three stages:
//!
//! - **Schema model**: [`build_schema`] reads SDL with `apollo-parser` into a
//!   [`SchemaModel`], recovering from malformed declarations and recording
//!   them as diagnostics
//! - **Examples**: [`ExampleSynthesizer`] produces depth-bounded example
//!   values for argument types
//! - **Requests**: [`RequestBuilder`] turns each root field into an operation
//!   document plus variables, and [`convert_schema`] groups the requests into
//!   `queries`, `mutations` and `subscriptions` folders
//!
//! # Example
//!
//! ```
//! use postman_graphql::{convert_sdl, ConvertOptions};
//!
//! let conversion = convert_sdl("type Query { hello: String }", &ConvertOptions::default())?;
//! assert_eq!(conversion.collection.request_count(), 1);
//! # Ok::<(), postman_graphql::SchemaError>(())
//! ```

mod convert;
mod error;
mod example;
mod model;
mod request;
mod schema;

pub use convert::{
    convert_schema, convert_sdl, ConvertOptions, DEFAULT_COLLECTION_NAME, DEFAULT_ENDPOINT,
};
pub use error::{RequestError, Result, SchemaError};
pub use example::{
    is_builtin_scalar, scalar_example, ExampleSynthesizer, BUILTIN_SCALARS, MAX_EXAMPLE_DEPTH,
};
pub use model::{
    ArgumentDescriptor, FieldDescriptor, OperationKind, SchemaModel, TypeDefinition,
    TypeDescriptor, TypeKind, TypeRef,
};
pub use request::{RequestBuilder, Selection, ENDPOINT_VARIABLE, MAX_SELECTION_DEPTH};
pub use schema::{build_schema, SchemaBuild};
