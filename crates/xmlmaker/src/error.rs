//! Error types for building and serializing XML trees.
//!
//! Tree navigation and mutation are total; errors only come from assigning
//! values that cannot be represented as a generic nested value, from chaining
//! through a key that holds a scalar, and from the XML writer/reader.

use thiserror::Error;

/// The error type for all xmlmaker operations.
#[derive(Error, Debug)]
pub enum XmlMakerError {
    /// A value assigned through the field API has no scalar or container shape.
    #[error("unsupported value for `{key}`: {reason}")]
    UnsupportedValue {
        /// The key the value was assigned to.
        key: String,
        /// Why the value could not be converted.
        reason: String,
    },

    /// A chained access expected a node but found a scalar or item group.
    #[error("`{key}` does not hold a node")]
    NotANode {
        /// The key that was accessed.
        key: String,
    },

    /// An element or attribute name is not a valid XML name.
    #[error("invalid XML name: {0:?}")]
    InvalidName(String),

    /// XML writer or reader error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// JSON serialization or parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error while writing a document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error message
    #[error("{0}")]
    Custom(String),
}

impl From<String> for XmlMakerError {
    fn from(msg: String) -> Self {
        XmlMakerError::Custom(msg)
    }
}

impl From<&str> for XmlMakerError {
    fn from(msg: &str) -> Self {
        XmlMakerError::Custom(msg.to_string())
    }
}

/// Result type alias for xmlmaker operations
pub type Result<T> = std::result::Result<T, XmlMakerError>;
