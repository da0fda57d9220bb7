//! Reachability minimization: prune a graph to the nodes and edges that lie
//! on some dependency path into its designated output node.

use std::collections::{HashSet, VecDeque};

use super::types::{Edge, Graph, Node};

/// A traversal scope: either the outer graph or a node's embedded sub-graph.
#[derive(Clone, Copy)]
struct Scope<'a> {
    nodes: &'a [Node],
    edges: &'a [Edge],
}

impl<'a> Scope<'a> {
    fn of_graph(graph: &'a Graph) -> Self {
        Scope {
            nodes: &graph.nodes,
            edges: &graph.edges,
        }
    }

    fn of_node(node: &'a Node) -> Self {
        Scope {
            nodes: node.nodes.as_deref().unwrap_or(&[]),
            edges: node.edges.as_deref().unwrap_or(&[]),
        }
    }

    fn find(&self, id: &str) -> Option<&'a Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Collect the ids of every node reachable from the graph's output node.
///
/// Traversal follows three kinds of dependency:
/// - edges targeting the current node, within the current scope;
/// - an alias node's `ref`, resolved against the outer graph;
/// - an embedded sub-graph's own output node.
///
/// A single visited set keyed by node id guards against cycles and shared
/// references, so traversal terminates on any input. Dangling edges and refs
/// are ignored rather than rejected. Returns an empty set when the output id
/// names no node.
pub fn reachable_from_output(graph: &Graph) -> HashSet<String> {
    let mut visited: HashSet<String> = HashSet::new();
    let Some(out_id) = graph.out.as_deref() else {
        return visited;
    };

    let root = Scope::of_graph(graph);
    let Some(out_node) = root.find(out_id) else {
        return visited;
    };

    let mut queue: VecDeque<(Scope<'_>, &Node)> = VecDeque::new();
    queue.push_back((root, out_node));

    while let Some((scope, node)) = queue.pop_front() {
        if !visited.insert(node.id.clone()) {
            continue;
        }

        // Descend into an embedded sub-graph through its own output node.
        if node.nodes.is_some() {
            if let Some(inner_out) = node.out.as_deref() {
                let inner = Scope::of_node(node);
                if let Some(inner_node) = inner.find(inner_out) {
                    queue.push_back((inner, inner_node));
                }
            }
        }

        // Alias nodes resolve against the outer graph.
        if let Some(target) = node.reference.as_deref() {
            if let Some(ref_node) = root.find(target) {
                queue.push_back((root, ref_node));
            }
        }

        // Every edge feeding this node pulls its source in, same scope.
        for edge in scope.edges.iter().filter(|e| e.to == node.id) {
            if let Some(source) = scope.find(&edge.from) {
                queue.push_back((scope, source));
            }
        }
    }

    visited
}

/// Prune `graph` to the subset reachable from its output node.
///
/// A graph with no output id is returned unchanged — minimization is only
/// meaningful relative to a reachable-from-output set. An output id that
/// names no node yields an empty graph.
pub fn minimize(graph: &Graph) -> Graph {
    if graph.out.is_none() {
        return graph.clone();
    }

    let keep = reachable_from_output(graph);
    if keep.is_empty() {
        tracing::debug!(graph = %graph.id, "output node unresolved, minimized graph is empty");
    }

    Graph {
        id: graph.id.clone(),
        nodes: graph
            .nodes
            .iter()
            .filter(|n| keep.contains(&n.id))
            .cloned()
            .collect(),
        edges: graph
            .edges
            .iter()
            .filter(|e| keep.contains(&e.from) && keep.contains(&e.to))
            .cloned()
            .collect(),
        out: graph.out.clone(),
    }
}
