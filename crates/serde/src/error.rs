//! Error types for XML rendering.
//!
//! Any error aborts the whole render: no partial tree or text is handed back
//! to the caller.

use thiserror::Error;
use xmlbind_model::ModelError;

/// Errors raised while building or writing an XML tree.
#[derive(Error, Debug)]
pub enum SerdeError {
    /// A text-classified field holds a nested record. Text positions only
    /// accept primitive values.
    #[error("structural serialization error: {0}")]
    Structural(String),

    /// A field's value does not have the shape its classification requires.
    #[error("field `{field}` expected {expected}, found {found}")]
    UnexpectedValue {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The record graph nests deeper than the configured bound.
    #[error("record nesting exceeds the maximum depth of {0}")]
    DepthLimitExceeded(usize),

    /// The configured output encoding cannot be produced.
    #[error("unsupported output encoding `{0}`")]
    UnsupportedEncoding(String),

    /// A record descriptor is invalid.
    #[error(transparent)]
    InvalidRecord(#[from] ModelError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Custom(String),
}

impl SerdeError {
    pub(crate) fn unexpected(field: &str, expected: &'static str, found: &'static str) -> Self {
        SerdeError::UnexpectedValue {
            field: field.to_string(),
            expected,
            found,
        }
    }
}

impl From<String> for SerdeError {
    fn from(msg: String) -> Self {
        SerdeError::Custom(msg)
    }
}

impl From<&str> for SerdeError {
    fn from(msg: &str) -> Self {
        SerdeError::Custom(msg.to_string())
    }
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, SerdeError>;
