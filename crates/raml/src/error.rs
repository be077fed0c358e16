use thiserror::Error;

pub type Result<T> = std::result::Result<T, RamlError>;

#[derive(Debug, Error)]
pub enum RamlError {
    #[error("Failed to parse RAML document: {0}")]
    InvalidDocument(#[from] serde_yaml::Error),

    #[error("RAML document must be a mapping at the top level")]
    NotAMapping,

    /// A response key that does not parse as a status code in `0..=65535`.
    #[error(
        "Response status '{code}' of {method} {path} is not a numeric HTTP status code in 0..=65535"
    )]
    InvalidStatusCode {
        path: String,
        method: String,
        code: String,
    },

    #[error("Failed to serialize example for {context}: {source}")]
    Example {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
