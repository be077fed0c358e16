use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to parse GraphQL schema: {message} ({count} syntax errors, no declarations recovered)")]
    Unparseable { count: usize, message: String },
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to serialize variables for {operation}: {source}")]
    Variables {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
}
