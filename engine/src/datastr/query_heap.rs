//! A decrease-key priority queue over node ids with per-node search state.
//!
//! Insertion and popping the minimal element have `O(log n)` time complexity,
//! key lookups are `O(1)` expected.
//! Every node goes through the states unseen -> inserted -> settled and never
//! regresses; keys may only decrease while a node is inserted.
//! Backing storage is a sparse map rather than arrays indexed by node id,
//! so per-query cost is proportional to the number of nodes actually touched,
//! not to the size of the graph.
//! Each entry carries an auxiliary payload, typically the predecessor node
//! for path reconstruction.
//!
//! # Examples
//!
//! ```
//! use road_query_engine::datastr::query_heap::QueryHeap;
//!
//! let mut heap = QueryHeap::new(3);
//! heap.insert(0, 42, ());
//! heap.insert(1, 23, ());
//! heap.insert(2, 50000, ());
//! heap.decrease_key(0, 1);
//! assert_eq!(heap.delete_min(), Some(0));
//! assert_eq!(heap.delete_min(), Some(1));
//! assert!(heap.was_settled(1));
//! assert!(heap.was_inserted(2));
//! ```

use super::graph::{NodeId, Weight};
use std::collections::HashMap;

const TREE_ARITY: usize = 4;
// heap position marker for settled entries
const SETTLED: usize = usize::MAX;

#[derive(Debug)]
struct HeapEntry<Data> {
    key: Weight,
    position: usize,
    data: Data,
}

/// A 4-ary min-heap over `(key, node)` pairs with sparse bookkeeping per node.
/// Ties are broken by node id, so settlement order is deterministic.
#[derive(Debug)]
pub struct QueryHeap<Data> {
    heap: Vec<(Weight, NodeId)>,
    entries: HashMap<NodeId, HeapEntry<Data>>,
    node_count: usize,
}

impl<Data> QueryHeap<Data> {
    /// Creates an empty heap for node ids in `[0, node_count)`.
    pub fn new(node_count: usize) -> QueryHeap<Data> {
        QueryHeap {
            heap: Vec::new(),
            entries: HashMap::new(),
            node_count,
        }
    }

    /// The node id bound this heap was sized for.
    /// Used as the capacity baseline when deciding whether thread local
    /// storage has to be reallocated for a different graph.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of currently inserted (not yet settled) nodes.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Drops all entries but keeps the backing capacity for reuse across queries.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.entries.clear();
    }

    /// Records `node` as inserted with the given key and payload.
    /// Panics if the node was already inserted or settled.
    pub fn insert(&mut self, node: NodeId, key: Weight, data: Data) {
        debug_assert!((node as usize) < self.node_count, "node id {} out of bounds", node);
        let position = self.heap.len();
        let prev = self.entries.insert(node, HeapEntry { key, position, data });
        assert!(prev.is_none(), "insert: node {} was already inserted", node);
        self.heap.push((key, node));
        self.move_up_in_tree(position);
    }

    /// Lowers the key of an inserted node.
    /// Does nothing if the new key is not smaller than the current one.
    /// Panics if the node is settled or was never inserted.
    pub fn decrease_key(&mut self, node: NodeId, new_key: Weight) {
        let entry = self.entries.get_mut(&node).expect("decrease_key: node was never inserted");
        assert!(entry.position != SETTLED, "decrease_key: node {} is already settled", node);
        if new_key >= entry.key {
            return;
        }
        entry.key = new_key;
        let position = entry.position;
        self.heap[position].0 = new_key;
        self.move_up_in_tree(position);
    }

    /// Removes and returns the inserted node with the smallest key,
    /// transitioning it to settled. Returns `None` on an empty heap.
    pub fn delete_min(&mut self) -> Option<NodeId> {
        let last = self.heap.len().checked_sub(1)?;
        self.heap.swap(0, last);
        let (_, node) = self.heap.pop().expect("heap is non-empty here");
        if let Some(&(_, moved)) = self.heap.first() {
            self.entries.get_mut(&moved).expect("heap entry missing").position = 0;
            self.move_down_in_tree(0);
        }
        self.entries.get_mut(&node).expect("heap entry missing").position = SETTLED;
        Some(node)
    }

    /// The smallest key currently in the queue, if any.
    pub fn min_key(&self) -> Option<Weight> {
        self.heap.first().map(|&(key, _)| key)
    }

    /// Whether the node was ever inserted, regardless of settlement.
    pub fn was_inserted(&self, node: NodeId) -> bool {
        self.entries.contains_key(&node)
    }

    pub fn was_settled(&self, node: NodeId) -> bool {
        self.entries.get(&node).map(|entry| entry.position == SETTLED).unwrap_or(false)
    }

    /// The current key of an inserted node, or the final distance of a settled one.
    /// Panics if the node has no record.
    pub fn key(&self, node: NodeId) -> Weight {
        self.entries.get(&node).expect("key: node was never inserted").key
    }

    /// The payload of a recorded node. Panics if the node has no record.
    pub fn data(&self, node: NodeId) -> &Data {
        &self.entries.get(&node).expect("data: node was never inserted").data
    }

    pub fn data_mut(&mut self, node: NodeId) -> &mut Data {
        &mut self.entries.get_mut(&node).expect("data: node was never inserted").data
    }

    fn swap_heap_elements(&mut self, first: usize, second: usize) {
        let (_, first_node) = self.heap[first];
        let (_, second_node) = self.heap[second];
        self.heap.swap(first, second);
        self.entries.get_mut(&first_node).expect("heap entry missing").position = second;
        self.entries.get_mut(&second_node).expect("heap entry missing").position = first;
    }

    fn move_up_in_tree(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / TREE_ARITY;
            if self.heap[parent] <= self.heap[position] {
                break;
            }
            self.swap_heap_elements(parent, position);
            position = parent;
        }
    }

    fn move_down_in_tree(&mut self, mut position: usize) {
        let heap_size = self.heap.len();
        loop {
            let first_child = TREE_ARITY * position + 1;
            let last_child = std::cmp::min(TREE_ARITY * position + TREE_ARITY + 1, heap_size);
            if first_child >= heap_size {
                return; // no children at all
            }
            let smallest_child = (first_child..last_child)
                .min_by_key(|&child| self.heap[child])
                .expect("child range is non-empty here");
            if self.heap[smallest_child] >= self.heap[position] {
                return; // no child is smaller
            }
            self.swap_heap_elements(position, smallest_child);
            position = smallest_child;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_min_yields_ascending_keys() {
        let mut heap = QueryHeap::new(10);
        for (node, key) in [(3, 30), (1, 10), (4, 40), (0, 25), (7, 5)] {
            heap.insert(node, key, ());
        }
        assert_eq!(heap.min_key(), Some(5));
        let order: Vec<_> = std::iter::from_fn(|| heap.delete_min()).collect();
        assert_eq!(order, vec![7, 1, 0, 3, 4]);
    }

    #[test]
    fn equal_keys_break_ties_by_node_id() {
        let mut heap = QueryHeap::new(10);
        for node in [5, 2, 8, 1] {
            heap.insert(node, 42, ());
        }
        let order: Vec<_> = std::iter::from_fn(|| heap.delete_min()).collect();
        assert_eq!(order, vec![1, 2, 5, 8]);
    }

    #[test]
    fn decrease_key_reorders_and_updates_lookup() {
        let mut heap = QueryHeap::new(10);
        heap.insert(0, 100, 0u32);
        heap.insert(1, 50, 0u32);
        heap.decrease_key(0, 10);
        assert_eq!(heap.key(0), 10);
        assert_eq!(heap.delete_min(), Some(0));
        // not smaller: must be ignored
        heap.decrease_key(1, 60);
        assert_eq!(heap.key(1), 50);
    }

    #[test]
    fn settled_nodes_keep_their_final_key() {
        let mut heap = QueryHeap::new(10);
        heap.insert(2, 7, 1u32);
        assert_eq!(heap.delete_min(), Some(2));
        assert!(heap.was_settled(2));
        assert!(heap.was_inserted(2));
        assert_eq!(heap.key(2), 7);
        assert_eq!(*heap.data(2), 1);
    }

    #[test]
    #[should_panic(expected = "already inserted")]
    fn double_insert_is_a_caller_error() {
        let mut heap = QueryHeap::new(10);
        heap.insert(0, 1, ());
        heap.insert(0, 2, ());
    }

    #[test]
    #[should_panic(expected = "already settled")]
    fn decrease_key_after_settlement_is_a_caller_error() {
        let mut heap = QueryHeap::new(10);
        heap.insert(0, 1, ());
        heap.delete_min();
        heap.decrease_key(0, 0);
    }

    #[test]
    fn clear_resets_all_state() {
        let mut heap = QueryHeap::new(10);
        heap.insert(0, 1, ());
        heap.insert(1, 2, ());
        heap.delete_min();
        heap.clear();
        assert!(heap.is_empty());
        assert!(!heap.was_inserted(0));
        assert!(!heap.was_settled(0));
        heap.insert(0, 3, ());
        assert_eq!(heap.delete_min(), Some(0));
    }
}
