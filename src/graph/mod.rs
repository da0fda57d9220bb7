//! Dataflow graph model and reachability minimization.

pub mod minimize;
pub mod types;

pub use minimize::{minimize, reachable_from_output};
pub use types::{Edge, Graph, Node};
