//! Error types for the export pipeline

use crate::tree::NodeKey;
use std::fmt;

/// Errors that can occur while exporting a document tree to HTML
///
/// Validation failures are reported before traversal starts; the export
/// either returns a complete string or fails outright, never partial output.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// The tree has no root node to export from
    MissingRoot,
    /// A selection endpoint or child reference points at a key that is not
    /// present in the snapshot being exported
    NodeNotFound(NodeKey),
    /// A selection offset lies outside the addressed node's content
    OffsetOutOfBounds {
        key: NodeKey,
        offset: usize,
        len: usize,
    },
    /// Serializing the assembled fragment to a string failed
    Serialize(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::MissingRoot => write!(f, "Document tree has no root node"),
            ExportError::NodeNotFound(key) => {
                write!(f, "Node {} not found in the document tree", key)
            }
            ExportError::OffsetOutOfBounds { key, offset, len } => write!(
                f,
                "Offset {} out of bounds for node {} (content length {})",
                offset, key, len
            ),
            ExportError::Serialize(msg) => write!(f, "HTML serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}
