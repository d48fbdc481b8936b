//! Query execution algorithms.

use crate::datastr::graph::*;

pub mod bidirectional_dijkstra;
pub mod search_context;

/// Simply a source-target pair
#[derive(Debug, Clone, Copy)]
pub struct Query {
    pub from: NodeId,
    pub to: NodeId,
}

/// A found route: its total weight and the unpacked node sequence
/// from source to target, shortcut-free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteResult {
    pub distance: Weight,
    pub path: Vec<NodeId>,
}
