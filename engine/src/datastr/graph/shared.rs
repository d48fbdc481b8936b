//! The cross-process backing for the graph facade.
//!
//! All graph arrays are `u32` based, so a complete graph can be laid out as
//! one contiguous word segment: a small header with the array lengths
//! followed by the eight adjacency arrays.
//! A [`SharedSegment`] wraps such a region behind an `Arc`, which makes the
//! handoff when swapping graphs reference counted: a query holding a
//! [`SharedGraph`] keeps the old segment alive until it finishes, a new
//! segment can be decoded and handed to new queries concurrently.

use super::static_graph::EdgeArray;
use super::*;
use crate::io::Load;
use std::ops::Range;
use std::path::Path;
use std::sync::Arc;

const HEADER_WORDS: usize = 3;

/// A reference counted `u32` region holding one encoded graph.
///
/// Layout: `[num_nodes, num_forward_edges, num_backward_edges]`, then for each
/// direction `first_out` (`n+1` words), `head`, `weight` and `middle`
/// (edge count words each).
#[derive(Debug, Clone)]
pub struct SharedSegment {
    words: Arc<[u32]>,
}

impl SharedSegment {
    /// Wrap an existing word region, e.g. one copied out of a memory mapping.
    pub fn new(words: Arc<[u32]>) -> SharedSegment {
        SharedSegment { words }
    }

    /// Read a segment from a raw array file on disk.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<SharedSegment, FacadeError> {
        let words = Vec::<u32>::load_from(path)?;
        Ok(SharedSegment { words: words.into() })
    }

    /// Serialize a privately owned graph into segment layout,
    /// the counterpart of [`SharedSegment::decode`].
    pub fn encode(graph: &InternalGraph) -> SharedSegment {
        let (forward, backward) = (graph.forward(), graph.backward());
        let mut words = Vec::with_capacity(
            HEADER_WORDS + forward.first_out().len() + backward.first_out().len() + 3 * forward.num_edges() + 3 * backward.num_edges(),
        );
        words.push(graph.num_nodes() as u32);
        words.push(forward.num_edges() as u32);
        words.push(backward.num_edges() as u32);
        for direction in [forward, backward] {
            words.extend_from_slice(direction.first_out());
            words.extend_from_slice(direction.head());
            words.extend_from_slice(direction.weight());
            words.extend_from_slice(direction.middle());
        }
        SharedSegment { words: words.into() }
    }

    /// Decode the segment into a facade of zero-copy views.
    /// A malformed segment is a structural error, never a panic.
    pub fn decode(&self) -> Result<SharedGraph, FacadeError> {
        if self.words.len() < HEADER_WORDS {
            return Err(FacadeError::SegmentTruncated {
                expected: HEADER_WORDS,
                actual: self.words.len(),
            });
        }
        let num_nodes = self.words[0] as usize;
        let num_forward = self.words[1] as usize;
        let num_backward = self.words[2] as usize;

        let mut cursor = Cursor {
            segment: self,
            offset: HEADER_WORDS,
        };
        let forward = cursor.edge_array(num_nodes, num_forward)?;
        let backward = cursor.edge_array(num_nodes, num_backward)?;
        StaticGraph::new(forward, backward)
    }

    fn slice(&self, range: Range<usize>) -> Result<SharedSlice, FacadeError> {
        if range.end > self.words.len() {
            return Err(FacadeError::SegmentTruncated {
                expected: range.end,
                actual: self.words.len(),
            });
        }
        Ok(SharedSlice {
            words: self.words.clone(),
            range,
        })
    }
}

struct Cursor<'s> {
    segment: &'s SharedSegment,
    offset: usize,
}

impl Cursor<'_> {
    fn take(&mut self, len: usize) -> Result<SharedSlice, FacadeError> {
        let slice = self.segment.slice(self.offset..self.offset + len)?;
        self.offset += len;
        Ok(slice)
    }

    fn edge_array(&mut self, num_nodes: usize, num_edges: usize) -> Result<EdgeArray<SharedSlice>, FacadeError> {
        EdgeArray::new(self.take(num_nodes + 1)?, self.take(num_edges)?, self.take(num_edges)?, self.take(num_edges)?)
    }
}

/// A cheaply clonable view into a [`SharedSegment`].
/// Keeps the whole segment alive for as long as any view on it exists.
#[derive(Debug, Clone)]
pub struct SharedSlice {
    words: Arc<[u32]>,
    range: Range<usize>,
}

impl AsRef<[u32]> for SharedSlice {
    fn as_ref(&self) -> &[u32] {
        &self.words[self.range.clone()]
    }
}

/// The shared-memory backing: same contract as [`InternalGraph`],
/// but every array is a view into one reference counted segment.
pub type SharedGraph = StaticGraph<SharedSlice>;
