//! Fragment library builder.
//!
//! Walks an introspectable API namespace and synthesizes one reusable graph
//! fragment per callable: argument-binding nodes, a terminal call node, and
//! the edges wiring arguments into the call. Sub-namespaces become
//! aggregation nodes so the library mirrors the dotted API shape.
//!
//! The builder is pure: it returns a caller-owned [`FragmentLibrary`] instead
//! of filling process-wide accumulators, so it can run any number of times.

pub mod signature;

use serde_json::json;

use crate::graph::{Edge, Node};
use signature::{parse_params, Param};

/// Names that never get fragments (gated or sensitive capabilities).
const EXCLUDED: &[&str] = &[
    "heart",
    "break",
    "exploit",
    "bypass",
    "corporation",
    "alterReality",
    "formula",
    "gang",
];

/// Script body of the `rest_filter` node: concatenates ordinary positional
/// arguments with any rest-collected arguments, excluding the namespace
/// handle and function-identity entries.
const REST_FILTER_SCRIPT: &str = "return args.concat(rest_args ? Object.entries(rest_args).filter(a => a[0] !== 'ns' && a[0] !== 'fn').map(a => a[1]) : [])";

/// One entry in an introspectable API namespace.
#[derive(Debug, Clone)]
pub enum ApiEntry {
    /// A callable, described by its declared signature text.
    Function { signature: String },
    /// A nested namespace.
    Namespace(ApiNamespace),
}

/// An ordered mapping of names to callables or nested namespaces.
#[derive(Debug, Clone, Default)]
pub struct ApiNamespace {
    entries: Vec<(String, ApiEntry)>,
}

impl ApiNamespace {
    pub fn new() -> Self {
        ApiNamespace::default()
    }

    pub fn function(mut self, name: impl Into<String>, signature: impl Into<String>) -> Self {
        self.entries.push((
            name.into(),
            ApiEntry::Function {
                signature: signature.into(),
            },
        ));
        self
    }

    pub fn namespace(mut self, name: impl Into<String>, ns: ApiNamespace) -> Self {
        self.entries.push((name.into(), ApiEntry::Namespace(ns)));
        self
    }

    pub fn entries(&self) -> &[(String, ApiEntry)] {
        &self.entries
    }
}

/// The static graph fragments built from an API namespace, ready to be
/// merged into a user's working graph.
#[derive(Debug, Clone, Default)]
pub struct FragmentLibrary {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Every API name encountered, for editor completion.
    pub symbols: Vec<String>,
}

impl FragmentLibrary {
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }
}

/// Build the fragment library for `api`, rooted at the `ns` handle.
pub fn build_library(api: &ApiNamespace) -> FragmentLibrary {
    let mut library = FragmentLibrary::default();
    let roots = populate(api, "ns", &mut library);
    for root in roots {
        library.edges.push(Edge::new(root, "ns"));
    }
    library.nodes.push(Node::new("ns"));
    library
}

/// Recurse over one namespace level, returning the ids of the fragment
/// nodes created at this level (for the parent's aggregation edges).
fn populate(ns: &ApiNamespace, path: &str, library: &mut FragmentLibrary) -> Vec<String> {
    let mut created = Vec::new();

    for (name, entry) in ns.entries() {
        if EXCLUDED.contains(&name.as_str()) {
            continue;
        }
        library.symbols.push(name.clone());

        match entry {
            ApiEntry::Namespace(child) => {
                library.nodes.push(Node::new(name.clone()));
                let children = populate(child, &format!("{path}.{name}"), library);
                for child_id in children {
                    library.edges.push(Edge::new(child_id, name.clone()));
                }
                created.push(name.clone());
            }
            ApiEntry::Function { signature } => {
                let fragment = function_fragment(name, path, signature);
                created.push(fragment.id.clone());
                library.nodes.push(fragment);
            }
        }
    }

    created
}

/// Synthesize the call fragment for a single callable.
///
/// The fragment wires the namespace handle (as `self`), the function name
/// (as `fn`) and the merged argument list (as `args`) into a terminal call
/// node. When no rest parameter exists, a literal empty `rest_args` node
/// keeps the filter's input satisfied.
fn function_fragment(name: &str, path: &str, signature: &str) -> Node {
    let params = parse_params(signature);
    let has_rest = params.iter().any(|p| p.rest);

    let mut nodes = vec![
        Node {
            reference: Some("new_array".to_string()),
            ..Node::new("args")
        },
        Node {
            reference: Some("arg".to_string()),
            value: Some(json!("ns")),
            ..Node::new("ns")
        },
        Node {
            script: Some(REST_FILTER_SCRIPT.to_string()),
            ..Node::new("rest_filter")
        },
        Node {
            value: Some(json!(name)),
            ..Node::new("fn")
        },
        Node {
            reference: Some("call".to_string()),
            ..Node::new("out")
        },
    ];
    for param in &params {
        nodes.push(binding_node(param));
    }
    if !has_rest {
        nodes.push(Node {
            value: Some(json!([])),
            ..Node::new("rest_args")
        });
    }

    let mut edges = vec![
        Edge {
            kind: Some("resolve".to_string()),
            ..Edge::with_role("args", "rest_filter", "args")
        },
        Edge::with_role("ns", "out", "self"),
        Edge::with_role("fn", "out", "fn"),
        Edge::with_role("rest_filter", "out", "args"),
    ];
    for (i, param) in params.iter().enumerate() {
        if param.rest {
            edges.push(Edge {
                kind: Some("resolve".to_string()),
                ..Edge::with_role(format!("arg_{}", param.name), "rest_filter", "rest_args")
            });
        } else {
            edges.push(Edge::with_role(
                format!("arg_{}", param.name),
                "args",
                format!("arg{i}"),
            ));
        }
    }
    if !has_rest {
        edges.push(Edge::with_role("rest_args", "rest_filter", "rest_args"));
    }

    Node {
        name: Some(name.to_string()),
        out: Some("out".to_string()),
        nodes: Some(nodes),
        edges: Some(edges),
        ..Node::new(format!("{path}.{name}"))
    }
}

/// Argument-binding node: a rest parameter binds the whole `_args` bundle,
/// a positional one binds its own name.
fn binding_node(param: &Param) -> Node {
    Node {
        reference: Some("arg".to_string()),
        value: Some(json!(if param.rest {
            "_args"
        } else {
            param.name.as_str()
        })),
        ..Node::new(format!("arg_{}", param.name))
    }
}
