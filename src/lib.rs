//! # graphscript — headless core of a visual dataflow script editor
//!
//! `graphscript` owns the state and transforms behind a node-graph script
//! editor: the graph data model, the minimization pass that prunes a graph
//! to what its output actually depends on, and the codec that embeds the
//! graph inside generated source text.
//!
//! - **Graph model**: nodes with optional alias references, literal values
//!   and embedded sub-graphs; edges with role and kind labels; a designated
//!   output node. Serde-serializable, with a canonical JSON form.
//! - **Minimization**: on every edit event from the visual editor, the graph
//!   is pruned to the subset reachable from its output node — following
//!   value edges, alias references and sub-graph output nodes — via an
//!   explicit worklist with a visited-set cycle guard.
//! - **Codec**: the canonical serialization travels inside the generated
//!   source between the fixed markers `graph = ...; //end_graph`; a missing
//!   region falls back to a default graph rather than failing.
//! - **Fragment library**: an introspectable API namespace is turned into
//!   one reusable call fragment per callable, merged into working graphs
//!   without clobbering user edits.
//! - **Documents & session**: open-file tabs with selection, close and
//!   reorder semantics, dirty tracking, change suppression and save
//!   dispatch into an in-memory workspace of hosts.
//! - **Cost display**: estimator outcomes become fixed status labels and
//!   sorted breakdown rows, refreshed through a coalescing debouncer.
//!
//! # Quick start
//!
//! ```rust
//! use graphscript::{build_library, ApiNamespace, EditorSession, Host, Workspace};
//!
//! let library = build_library(
//!     &ApiNamespace::new().function("hack", "function hack(host, threads = 1)"),
//! );
//!
//! let mut workspace = Workspace::new();
//! workspace.add_host(Host::new("home"));
//!
//! let mut session = EditorSession::new();
//! let doc = session.open_file("loop.js", "", "home");
//! let working_graph = doc.editor_graph(&library);
//!
//! // ... the visual editor mutates working_graph, then reports it back:
//! session.on_graph_update(&working_graph, &mut workspace).unwrap();
//! ```

pub mod codec;
pub mod cost;
pub mod document;
pub mod error;
pub mod graph;
pub mod library;
pub mod workspace;

pub use crate::codec::{default_graph, extract_graph, merge_library, render_source};
pub use crate::cost::{cost_report, CostEntry, CostErrorCode, CostOutcome, CostReport, Debouncer};
pub use crate::document::{CloseOutcome, EditorSession, OpenDocument};
pub use crate::error::EditorError;
pub use crate::graph::{minimize, reachable_from_output, Edge, Graph, Node};
pub use crate::library::{build_library, ApiEntry, ApiNamespace, FragmentLibrary};
pub use crate::workspace::{Host, SavedAs, ScriptFile, TextFile, Workspace};
