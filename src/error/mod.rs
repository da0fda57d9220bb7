//! Editor-level error types.

use thiserror::Error;

/// Errors surfaced by the document/session layer and the workspace.
///
/// Malformed embedded graphs and unresolvable output nodes are deliberately
/// *not* represented here: both recover locally (default graph, empty
/// minimized graph) and are never surfaced to the caller.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Host not found: {0}")]
    HostNotFound(String),
    #[error("You must specify a filename")]
    EmptyFileName,
    #[error("File path can contain only alphanumerics, hyphens, and underscores, and must end with an extension: {0}")]
    InvalidFilePath(String),
    #[error("Invalid filename: must be either a script (.script, .js, or .ns) or text file (.txt): {0}")]
    InvalidExtension(String),
    #[error("No document is currently open")]
    NoCurrentDocument,
}
