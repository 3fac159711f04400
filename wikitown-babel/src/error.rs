//! Error types for format operations

use thiserror::Error;

/// Errors that can occur during format operations
///
/// Rendering markup never fails: unrecognized syntax degrades to literal text.
/// These errors come from the registry and the HTML plumbing around the converter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
}
