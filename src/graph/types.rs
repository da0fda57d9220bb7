use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single node in a dataflow graph.
///
/// A node may additionally act as a graph fragment: when `nodes`/`edges` are
/// present it embeds its own sub-graph, with `out` naming the sub-graph's
/// designated output node.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub id: String,
    /// Alias to another node id: "same as node X", resolved against the
    /// outer graph rather than this node's own edges.
    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Literal value carried by the node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Inline script body, carried verbatim for the graph runner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<Edge>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
}

impl Node {
    /// A plain node with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            ..Node::default()
        }
    }
}

/// A directed edge: data flows from `from` into `to`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: String,
    pub to: String,
    /// Role label: which input of the target this edge feeds (e.g. `self`,
    /// `fn`, `args`, `arg0`).
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Kind tag. The fragment library only emits `"resolve"` (deferred,
    /// batched argument collection) but arbitrary kinds round-trip.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Edge {
            from: from.into(),
            to: to.into(),
            role: None,
            kind: None,
        }
    }

    pub fn with_role(
        from: impl Into<String>,
        to: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Edge {
            role: Some(role.into()),
            ..Edge::new(from, to)
        }
    }
}

/// A dataflow graph with an optional designated output node.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Graph {
    pub id: String,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out: Option<String>,
}

impl Graph {
    pub fn find_node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.find_node(id).is_some()
    }

    /// Canonical serialized form, used both for source embedding and for
    /// change suppression. Serialization of these types cannot fail.
    pub fn canonical_json(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}
