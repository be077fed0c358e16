//! RAML to Postman collection conversion.
//!
//! The document is loaded as a plain YAML tree ([`RamlDocument`]); the `types`
//! section doubles as the type table the [`ExampleSynthesizer`] resolves names
//! against. Every `/`-prefixed key is a resource, and every HTTP method key
//! under a resource becomes one request, grouped into folders by the first
//! segment of its path.
//!
//! ```
//! use postman_raml::{convert_raml, ConvertOptions};
//!
//! let conversion = convert_raml("title: Users\n/users:\n  get:\n", &ConvertOptions::default())?;
//! assert_eq!(conversion.collection.item[0].name, "Users");
//! # Ok::<(), postman_raml::RamlError>(())
//! ```

mod convert;
mod document;
mod error;
mod example;
mod request;
mod url;

pub use convert::{convert_document, convert_raml, ConvertOptions, BASE_URL_VARIABLE};
pub use document::{yaml_to_json, RamlDocument, DEFAULT_BASE_URI, DEFAULT_TITLE};
pub use error::{RamlError, Result};
pub use example::{is_truthy, primitive_example, ExampleSynthesizer, MAX_EXAMPLE_DEPTH};
pub use request::{http_method, RequestBuilder, HTTP_METHODS};
pub use url::{build_url, to_postman_variables};
