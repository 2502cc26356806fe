//! Error types for dxf-survey

use std::io;
use thiserror::Error;

/// Main error type for dxf-survey operations
///
/// Only conditions the reader cannot recover from are reported here.
/// Malformed values inside an otherwise readable document are recorded as
/// [`Notification`](crate::notification::Notification)s instead.
#[derive(Debug, Error)]
pub enum DxfError {
    /// IO error occurred while loading the input
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The input carries no top-level DXF structure at all
    #[error("Not a DXF document: no {expected} marker found in {lines} line(s)")]
    MissingMarker {
        /// The marker(s) the reader looked for
        expected: &'static str,
        /// Number of lines examined
        lines: usize,
    },

    /// Invalid entity type
    #[error("Invalid entity type: {0:?}")]
    InvalidEntityType(String),

    /// Requested layer does not exist in the registry
    #[error("Layer not found: {0:?}")]
    LayerNotFound(String),

    /// Generic error with custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias for dxf-survey operations
pub type Result<T> = std::result::Result<T, DxfError>;

impl From<String> for DxfError {
    fn from(s: String) -> Self {
        DxfError::Custom(s)
    }
}

impl From<&str> for DxfError {
    fn from(s: &str) -> Self {
        DxfError::Custom(s.to_string())
    }
}
