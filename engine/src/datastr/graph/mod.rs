//! The static graph facade: a read-only, queryable view over the road network.
//!
//! Exactly one facade is active per engine instance.
//! Two interchangeable backings satisfy the same contract:
//! [`InternalGraph`] owns its arrays in process-private memory, while
//! [`SharedGraph`] views arrays inside a reference counted segment that can be
//! mapped from another process.
//! Callers must not depend on which backing is active.

use crate::util::in_range_option::InRangeOption;

pub mod shared;
pub mod static_graph;

pub use self::shared::{SharedGraph, SharedSegment};
pub use self::static_graph::{InternalGraph, StaticGraph};

/// Node ids are 32bit unsigned ints
pub type NodeId = u32;
/// Edge ids are 32bit unsigned ints
pub type EdgeId = u32;
/// Edge weights are 32bit unsigned ints
pub type Weight = u32;
/// A sufficiently large infinity constant.
/// Set to `u32::MAX / 2` so that `INFINITY + x` for `x <= INFINITY` does not overflow.
pub const INFINITY: Weight = u32::MAX / 2;

/// One directed, weighted edge as seen from its tail node.
///
/// `middle` is the contracted middle node for shortcut edges inserted by
/// preprocessing and `None` for original road segments.
/// A shortcut `(tail, head)` with middle `m` stands for the two edges
/// `(tail, m)` and `(m, head)`, which may themselves be shortcuts.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Link {
    pub head: NodeId,
    pub weight: Weight,
    pub middle: InRangeOption<NodeId>,
}

impl Link {
    /// A plain road segment link without shortcut information.
    pub fn new(head: NodeId, weight: Weight) -> Link {
        Link {
            head,
            weight,
            middle: InRangeOption::new(None),
        }
    }

    /// A shortcut link standing for the concatenation of `(tail, middle)` and `(middle, head)`.
    pub fn shortcut(head: NodeId, weight: Weight, middle: NodeId) -> Link {
        Link {
            head,
            weight,
            middle: InRangeOption::new(Some(middle)),
        }
    }

    pub fn is_shortcut(&self) -> bool {
        self.middle.value().is_some()
    }
}

/// Errors when constructing a facade from loaded or mapped data.
/// These are fatal at startup; at runtime they can only be recovered
/// from by a full facade swap.
#[derive(Debug, thiserror::Error)]
pub enum FacadeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("shared segment truncated: expected {expected} words, got {actual}")]
    SegmentTruncated { expected: usize, actual: usize },
    #[error("graph arrays inconsistent: {0}")]
    Inconsistent(&'static str),
}

/// The read-only contract every graph backing has to satisfy.
///
/// Adjacency iteration is split into a forward and a backward edge set for
/// the two directions of a bidirectional search.
/// A backward link of `node` represents an original edge *into* `node`;
/// its `head` field holds the tail of that original edge.
pub trait GraphFacade {
    type LinkIter<'a>: Iterator<Item = Link> + 'a
    where
        Self: 'a;

    fn num_nodes(&self) -> usize;
    fn num_edges(&self) -> usize;
    fn forward_links(&self, node: NodeId) -> Self::LinkIter<'_>;
    fn backward_links(&self, node: NodeId) -> Self::LinkIter<'_>;

    /// Find the cheapest edge from `tail` to `head` in either direction's
    /// edge set. Used when unpacking shortcut edges on a reconstructed path.
    fn find_edge(&self, tail: NodeId, head: NodeId) -> Option<Link> {
        let forward = self.forward_links(tail).filter(|link| link.head == head);
        let backward = self
            .backward_links(head)
            .filter(|link| link.head == tail)
            .map(|link| Link { head, ..link });
        forward.chain(backward).min_by_key(|link| link.weight)
    }
}
