//! Error types for record descriptors and dynamic record decoding.

use thiserror::Error;

/// Errors raised while building or validating record descriptors.
#[derive(Error, Debug)]
pub enum ModelError {
    /// A string could not be read as a qualified name.
    #[error("invalid qualified name `{0}`")]
    InvalidQName(String),

    /// A record type declares more than one text field.
    #[error("record `{record}` declares more than one text field (`{first}` and `{second}`)")]
    DuplicateTextField {
        record: String,
        first: String,
        second: String,
    },

    /// A value was assigned to a field the record does not declare.
    #[error("record `{record}` has no field named `{field}`")]
    UnknownField { record: String, field: String },

    /// A dynamic record document is structurally wrong.
    #[error("invalid record document: {0}")]
    InvalidDocument(String),

    /// The JSON input could not be parsed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
