use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Invalid schema: {message}")]
    InvalidSchema { message: String },

    #[error("Unresolvable schema reference: {uri}")]
    UnresolvableRef { uri: String },

    #[error("Instance does not conform to the schema")]
    InvalidInstance,

    #[error("Invalid regular expression in schema: {0}")]
    RegexError(#[from] regex::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Unsupported meta-schema version: {version}")]
    UnsupportedVersion { version: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl SchemaError {
    pub(crate) fn invalid_schema(message: impl Into<String>) -> Self {
        SchemaError::InvalidSchema {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;
