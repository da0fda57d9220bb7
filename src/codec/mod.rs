//! Graph ⇄ source-code embedding.
//!
//! A document's graph travels inside its generated source as a single
//! marker-delimited JSON region: `graph = <JSON>; //end_graph`. Decoding is
//! tolerant — a missing or unparsable region just means "no graph yet" and
//! falls back to the default graph. Encoding regenerates the whole source
//! module around the canonical serialization.

use regex::Regex;

use crate::graph::{Edge, Graph, Node};
use crate::library::FragmentLibrary;

/// Marker pair delimiting the embedded graph region.
pub const GRAPH_PREFIX: &str = "graph = ";
pub const GRAPH_SUFFIX: &str = "; //end_graph";

/// Output node id of a freshly-opened document's default graph.
pub const DEFAULT_OUT: &str = "main/out";

/// Locate and parse the embedded graph region of `code`.
///
/// Returns `None` when the marker pair is absent or the region does not
/// parse; neither case is an error.
pub fn extract_graph(code: &str) -> Option<Graph> {
    let re = Regex::new(r"graph = (.*); //end_graph").unwrap();
    let region = re.captures(code)?.get(1)?.as_str();
    match serde_json::from_str(region) {
        Ok(graph) => Some(graph),
        Err(err) => {
            tracing::warn!(%err, "embedded graph region does not parse, treating document as graph-less");
            None
        }
    }
}

/// The minimal graph a freshly-opened document starts from: an argument
/// binding for the namespace handle feeding a terminal output node, with the
/// whole fragment library alongside.
pub fn default_graph(library: &FragmentLibrary) -> Graph {
    let arg_ns = Node {
        name: Some("ns".to_string()),
        reference: Some("arg".to_string()),
        value: Some(serde_json::json!("ns")),
        ..Node::new("arg_ns")
    };
    let mut nodes = vec![arg_ns, Node::new(DEFAULT_OUT)];
    nodes.extend(library.nodes.iter().cloned());
    let mut edges = vec![Edge::with_role("arg_ns", DEFAULT_OUT, "ns")];
    edges.extend(library.edges.iter().cloned());

    Graph {
        id: "default_ns".to_string(),
        nodes,
        edges,
        out: Some(DEFAULT_OUT.to_string()),
    }
}

/// Merge the static fragment library into a working graph.
///
/// User edits take precedence: a library node is appended only when its id
/// is not already present, and a library edge only when no identical edge
/// exists. The working graph's own nodes and edges are never dropped.
pub fn merge_library(mut graph: Graph, library: &FragmentLibrary) -> Graph {
    for node in &library.nodes {
        if !graph.contains_node(&node.id) {
            graph.nodes.push(node.clone());
        }
    }
    for edge in &library.edges {
        if !graph.edges.contains(edge) {
            graph.edges.push(edge.clone());
        }
    }
    graph
}

/// Render the generated source module around `graph`.
///
/// The module declares the graph constant between the fixed markers and
/// exports an entry routine handing the graph, its output-node id and the
/// namespace handle to the external graph runner. The `if(false)` branch
/// never executes; it lists a call expression for every namespace-derived
/// node so the external static cost analyzer can account for them.
pub fn render_source(graph: &Graph) -> String {
    let json = graph.canonical_json();
    let out = graph.out.as_deref().unwrap_or(DEFAULT_OUT);
    let calls: Vec<String> = graph
        .nodes
        .iter()
        .filter(|n| n.id.starts_with("ns"))
        .map(|n| format!("{}()", n.id))
        .collect();
    let calls = calls.join(",");

    format!(
        "let {GRAPH_PREFIX}{json}{GRAPH_SUFFIX}\n\
         export async function main(ns, runGraph){{\n\
         \x20 await Promise.resolve(runGraph(graph, '{out}', {{ns}}));\n\
         \x20 // Add in the nodes for RAM calculations.\n\
         \x20 if(false){{\n\
         \x20   {calls}\n\
         \x20 }}\n\
         }}\n"
    )
}
