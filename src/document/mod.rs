//! Open documents and the editor session that manages them.

pub mod session;

pub use session::{CloseOutcome, EditorSession};

use crate::codec::{default_graph, extract_graph, merge_library, render_source};
use crate::graph::{minimize, Graph};
use crate::library::FragmentLibrary;

/// Holds all the state for one open file: its text, owning host, and the
/// last-known graph with its cached canonical serialization.
///
/// The document owns its graph snapshot; the visual editor owns the live
/// working graph and only hands a copy over on each change event.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenDocument {
    pub file_name: String,
    pub hostname: String,
    pub code: String,
    pub graph: Option<Graph>,
    pub graph_str: Option<String>,
}

impl OpenDocument {
    pub fn new(
        file_name: impl Into<String>,
        code: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        OpenDocument {
            file_name: file_name.into(),
            hostname: hostname.into(),
            code: code.into(),
            graph: None,
            graph_str: None,
        }
    }

    pub fn with_graph(
        file_name: impl Into<String>,
        code: impl Into<String>,
        hostname: impl Into<String>,
        graph: Graph,
    ) -> Self {
        OpenDocument {
            graph_str: Some(graph.canonical_json()),
            graph: Some(graph),
            ..OpenDocument::new(file_name, code, hostname)
        }
    }

    pub fn is_text_file(&self) -> bool {
        self.file_name.ends_with(".txt")
    }

    /// The graph handed to the visual editor when this document mounts:
    /// the embedded graph reconciled with the fragment library, or the
    /// default graph when the document carries no graph yet.
    pub fn editor_graph(&self, library: &FragmentLibrary) -> Graph {
        match extract_graph(&self.code) {
            Some(graph) => merge_library(graph, library),
            None => default_graph(library),
        }
    }

    /// Apply an edited graph reported by the visual editor: minimize it,
    /// and — only when the minimized form serializes differently than the
    /// cached one — regenerate the source text and update the snapshot.
    ///
    /// Returns whether the document changed; a `false` means a no-op edit
    /// notification and suppresses the downstream save.
    pub fn apply_graph_update(&mut self, edited: &Graph) -> bool {
        let minimized = minimize(edited);
        let serialized = minimized.canonical_json();
        if self.graph_str.as_deref() == Some(serialized.as_str()) {
            return false;
        }
        self.code = render_source(&minimized);
        self.graph = Some(minimized);
        self.graph_str = Some(serialized);
        true
    }
}
