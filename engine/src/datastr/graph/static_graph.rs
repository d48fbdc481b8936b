//! Adjacency array graph storage generic over the backing containers.
//!
//! Nodes and edges are identified by dense ids from `0` to `n-1` and `m-1`.
//! Each direction is stored as a classic adjacency array: `first_out` with
//! `n+1` entries, plus `head`, `weight` and `middle` with `m` entries each,
//! so `head[first_out[x]..first_out[x+1]]` are the neighbors of `x`.
//! All arrays are `u32` based, which lets the same code run on owned vectors
//! and on slices decoded out of a shared memory segment.

use super::*;
use crate::io::Load;
use std::path::Path;

/// One direction's adjacency arrays.
/// Anything that can be viewed as a `u32` slice works as container,
/// both owned (`Vec<u32>`) and shared (views into a mapped segment).
#[derive(Debug, Clone)]
pub struct EdgeArray<Container: AsRef<[u32]>> {
    // index of the first edge of each node, +1 entry in the end
    first_out: Container,
    // the node id each edge points at
    head: Container,
    // the weight of each edge
    weight: Container,
    // middle node of shortcut edges, sentinel encoded
    middle: Container,
}

impl<Container: AsRef<[u32]>> EdgeArray<Container> {
    /// Wraps the four containers, checking the adjacency array invariants.
    /// No query may ever observe nodes or edges outside these arrays,
    /// so a facade cannot be constructed from inconsistent data.
    pub fn new(first_out: Container, head: Container, weight: Container, middle: Container) -> Result<Self, FacadeError> {
        let edges = EdgeArray { first_out, head, weight, middle };
        edges.validate()?;
        Ok(edges)
    }

    fn validate(&self) -> Result<(), FacadeError> {
        let first_out = self.first_out();
        let (head, weight, middle) = (self.head(), self.weight(), self.middle());
        if first_out.is_empty() || first_out[0] != 0 {
            return Err(FacadeError::Inconsistent("first_out must start with 0"));
        }
        if first_out.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(FacadeError::Inconsistent("first_out must be non-decreasing"));
        }
        if *first_out.last().expect("checked non-empty") as usize != head.len() {
            return Err(FacadeError::Inconsistent("first_out must end with the edge count"));
        }
        if weight.len() != head.len() || middle.len() != head.len() {
            return Err(FacadeError::Inconsistent("head, weight and middle must have equal length"));
        }
        let num_nodes = first_out.len() - 1;
        if head.iter().any(|&node| node as usize >= num_nodes) {
            return Err(FacadeError::Inconsistent("head node out of bounds"));
        }
        if middle
            .iter()
            .any(|&node| InRangeOption::from_raw(node).value().map(|m| m as usize >= num_nodes).unwrap_or(false))
        {
            return Err(FacadeError::Inconsistent("middle node out of bounds"));
        }
        if weight.iter().any(|&weight| weight > INFINITY) {
            return Err(FacadeError::Inconsistent("edge weight exceeds INFINITY"));
        }
        Ok(())
    }

    pub fn first_out(&self) -> &[EdgeId] {
        self.first_out.as_ref()
    }
    pub fn head(&self) -> &[NodeId] {
        self.head.as_ref()
    }
    pub fn weight(&self) -> &[Weight] {
        self.weight.as_ref()
    }
    pub fn middle(&self) -> &[NodeId] {
        self.middle.as_ref()
    }

    pub fn num_nodes(&self) -> usize {
        self.first_out().len() - 1
    }

    pub fn num_edges(&self) -> usize {
        self.head().len()
    }

    fn neighbor_range(&self, node: NodeId) -> std::ops::Range<usize> {
        let node = node as usize;
        self.first_out()[node] as usize..self.first_out()[node + 1] as usize
    }

    #[allow(clippy::type_complexity)]
    pub fn link_iter(&self, node: NodeId) -> LinkIter<'_> {
        let range = self.neighbor_range(node);
        self.head()[range.clone()]
            .iter()
            .zip(self.weight()[range.clone()].iter())
            .zip(self.middle()[range].iter())
            .map(|((&head, &weight), &middle)| Link {
                head,
                weight,
                middle: InRangeOption::from_raw(middle),
            })
    }
}

#[allow(clippy::type_complexity)]
pub type LinkIter<'a> = std::iter::Map<
    std::iter::Zip<std::iter::Zip<std::slice::Iter<'a, NodeId>, std::slice::Iter<'a, Weight>>, std::slice::Iter<'a, NodeId>>,
    fn(((&NodeId, &Weight), &NodeId)) -> Link,
>;

/// A facade over one forward and one backward [`EdgeArray`] sharing a container type.
#[derive(Debug, Clone)]
pub struct StaticGraph<Container: AsRef<[u32]>> {
    forward: EdgeArray<Container>,
    backward: EdgeArray<Container>,
}

impl<Container: AsRef<[u32]>> StaticGraph<Container> {
    pub fn new(forward: EdgeArray<Container>, backward: EdgeArray<Container>) -> Result<Self, FacadeError> {
        if forward.num_nodes() != backward.num_nodes() {
            return Err(FacadeError::Inconsistent("forward and backward node counts differ"));
        }
        Ok(StaticGraph { forward, backward })
    }

    pub fn forward(&self) -> &EdgeArray<Container> {
        &self.forward
    }

    pub fn backward(&self) -> &EdgeArray<Container> {
        &self.backward
    }
}

impl<Container: AsRef<[u32]>> GraphFacade for StaticGraph<Container> {
    type LinkIter<'a>
        = LinkIter<'a>
    where
        Self: 'a;

    fn num_nodes(&self) -> usize {
        self.forward.num_nodes()
    }

    /// Number of directed edges in the forward edge set.
    fn num_edges(&self) -> usize {
        self.forward.num_edges()
    }

    fn forward_links(&self, node: NodeId) -> LinkIter<'_> {
        self.forward.link_iter(node)
    }

    fn backward_links(&self, node: NodeId) -> LinkIter<'_> {
        self.backward.link_iter(node)
    }
}

/// The process-private backing: all arrays owned by this facade.
pub type InternalGraph = StaticGraph<Vec<u32>>;

impl InternalGraph {
    /// Build a facade from forward adjacency lists.
    /// The backward edge set is derived by reversing every edge,
    /// carrying weights and shortcut middle nodes along.
    pub fn from_adjacency_lists(adjacency_lists: Vec<Vec<Link>>) -> InternalGraph {
        let num_nodes = adjacency_lists.len();
        let mut reversed: Vec<Vec<Link>> = (0..num_nodes).map(|_| Vec::new()).collect();
        for (tail, links) in adjacency_lists.iter().enumerate() {
            for link in links {
                assert!((link.head as usize) < num_nodes, "head node out of bounds");
                reversed[link.head as usize].push(Link {
                    head: tail as NodeId,
                    weight: link.weight,
                    middle: link.middle,
                });
            }
        }

        StaticGraph {
            forward: EdgeArray::from_adjacency_lists(adjacency_lists),
            backward: EdgeArray::from_adjacency_lists(reversed),
        }
    }

    /// Load a facade from a directory of raw array files,
    /// as written by the preprocessing pipeline.
    pub fn load_from<P: AsRef<Path>>(dir: P) -> Result<InternalGraph, FacadeError> {
        let dir = dir.as_ref();
        let load_direction = |prefix: &str| -> Result<EdgeArray<Vec<u32>>, FacadeError> {
            EdgeArray::new(
                Vec::load_from(dir.join(format!("{}_first_out", prefix)))?,
                Vec::load_from(dir.join(format!("{}_head", prefix)))?,
                Vec::load_from(dir.join(format!("{}_weight", prefix)))?,
                Vec::load_from(dir.join(format!("{}_middle", prefix)))?,
            )
        };
        StaticGraph::new(load_direction("forward")?, load_direction("backward")?)
    }
}

impl EdgeArray<Vec<u32>> {
    fn from_adjacency_lists(adjacency_lists: Vec<Vec<Link>>) -> EdgeArray<Vec<u32>> {
        // create the first_out array by a prefix sum over the adjacency list sizes
        let mut first_out = Vec::with_capacity(adjacency_lists.len() + 1);
        first_out.push(0);
        let mut prefix_sum = 0;
        for links in &adjacency_lists {
            prefix_sum += links.len() as EdgeId;
            first_out.push(prefix_sum);
        }

        let num_edges = prefix_sum as usize;
        let mut head = Vec::with_capacity(num_edges);
        let mut weight = Vec::with_capacity(num_edges);
        let mut middle = Vec::with_capacity(num_edges);
        for link in adjacency_lists.into_iter().flatten() {
            debug_assert!(link.weight <= INFINITY);
            head.push(link.head);
            weight.push(link.weight);
            middle.push(link.middle.raw());
        }

        EdgeArray { first_out, head, weight, middle }
    }
}
