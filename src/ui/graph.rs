//! Neighbour lookups over canvas nodes and edges.

use super::types::{FlowEdge, FlowNode};

/// Nodes with an edge pointing at `node`, in edge order.
pub fn incomers<'a>(node: &FlowNode, nodes: &'a [FlowNode], edges: &[FlowEdge]) -> Vec<&'a FlowNode> {
    edges
        .iter()
        .filter(|e| e.target == node.id)
        .filter_map(|e| nodes.iter().find(|n| n.id == e.source))
        .collect()
}

/// Edges leaving `node_id`, in edge order.
pub fn outgoing_edges<'a>(node_id: &str, edges: &'a [FlowEdge]) -> impl Iterator<Item = &'a FlowEdge> {
    edges.iter().filter(move |e| e.source == node_id)
}

/// Nodes whose `parent_node` is `parent_id`, in node order.
pub fn children_of<'a>(parent_id: &str, nodes: &'a [FlowNode]) -> Vec<&'a FlowNode> {
    nodes
        .iter()
        .filter(|n| n.parent_node.as_deref() == Some(parent_id))
        .collect()
}

/// Connects `ids` one after another: `a -> b -> c`.
pub fn connect_in_sequence<S: AsRef<str>>(ids: &[S]) -> Vec<FlowEdge> {
    ids.windows(2)
        .map(|pair| FlowEdge::new(pair[0].as_ref(), pair[1].as_ref()))
        .collect()
}
