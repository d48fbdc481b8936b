//! Per-thread search state, reused across queries.
//!
//! Every worker thread owns exactly one `SearchContext` and passes it into
//! each query it executes. The context holds up to three independent
//! forward/backward queue pairs so that one request can run up to three
//! logically distinct search passes (say a primary route search and a
//! secondary alternative-route search) without sharing mutable state.
//! The queue pairs are created lazily per slot and kept alive for the
//! lifetime of the thread, trading memory for reallocation-free queries.

use crate::datastr::{graph::NodeId, query_heap::QueryHeap};

/// One forward/backward queue pair.
/// The payload of every queue entry is the predecessor node in the
/// respective search direction.
#[derive(Debug)]
pub struct HeapPair {
    pub forward: QueryHeap<NodeId>,
    pub backward: QueryHeap<NodeId>,
}

/// The three independently addressable queue pair slots of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSlot {
    Primary,
    Secondary,
    Tertiary,
}

impl SearchSlot {
    fn index(self) -> usize {
        match self {
            SearchSlot::Primary => 0,
            SearchSlot::Secondary => 1,
            SearchSlot::Tertiary => 2,
        }
    }
}

#[derive(Debug, Default)]
pub struct SearchContext {
    slots: [Option<HeapPair>; 3],
}

impl SearchContext {
    pub fn new() -> SearchContext {
        Default::default()
    }

    /// Hand out the queue pair for `slot`, sized for a graph with
    /// `node_count` nodes. Must be called once per query before the search
    /// algorithm touches the slot.
    ///
    /// If the slot was last used for a graph of a different size, both
    /// queues are discarded and reallocated; otherwise they are cleared in
    /// place and their backing capacity is reused.
    pub fn ensure_capacity(&mut self, slot: SearchSlot, node_count: usize) -> &mut HeapPair {
        assert!(node_count > 0, "ensure_capacity: node count must be positive");
        let slot = &mut self.slots[slot.index()];
        match slot {
            Some(pair) if pair.forward.node_count() == node_count => {
                pair.forward.clear();
                pair.backward.clear();
            }
            _ => {
                *slot = Some(HeapPair {
                    forward: QueryHeap::new(node_count),
                    backward: QueryHeap::new(node_count),
                });
            }
        }
        slot.as_mut().expect("slot was just populated")
    }

    /// Whether the slot ever allocated its queue pair.
    pub fn is_allocated(&self, slot: SearchSlot) -> bool {
        self.slots[slot.index()].is_some()
    }
}
