//! Bidirectional Dijkstra over the static graph facade.
//!
//! Runs a forward search from the source and a backward search from the
//! target simultaneously, always advancing the direction with the smaller
//! queue minimum. A direction stops expanding once its minimum reaches the
//! best meeting distance found so far; the query is done when both
//! directions have stopped or run empty.
//! Path unpacking recursively replaces shortcut edges by their two halves
//! until only original road segments remain.

use super::search_context::HeapPair;
use super::{Query, RouteResult};
use crate::datastr::{graph::*, query_heap::QueryHeap};
use log::{debug, warn};

pub struct BidirectionalDijkstra<'a, F: GraphFacade> {
    facade: &'a F,
    heaps: &'a mut HeapPair,
    tentative_distance: Weight,
    meeting_node: NodeId,
    node_limit: usize,
}

impl<'a, F: GraphFacade> BidirectionalDijkstra<'a, F> {
    /// Set up a search over `facade` using the given queue pair,
    /// which must have been sized for this facade through
    /// `SearchContext::ensure_capacity`.
    pub fn new(facade: &'a F, heaps: &'a mut HeapPair) -> Self {
        debug_assert_eq!(heaps.forward.node_count(), facade.num_nodes(), "queue pair not sized for this graph");
        BidirectionalDijkstra {
            facade,
            heaps,
            tentative_distance: INFINITY,
            meeting_node: 0,
            node_limit: usize::MAX,
        }
    }

    /// Bound the total number of settled nodes across both directions.
    /// Exceeding the bound terminates the search as "no route".
    pub fn with_node_limit(mut self, node_limit: usize) -> Self {
        self.node_limit = node_limit;
        self
    }

    /// The shortest distance from `query.from` to `query.to`,
    /// or `None` if the two are not connected.
    pub fn distance(&mut self, query: Query) -> Option<Weight> {
        let facade = self.facade;
        debug_assert!((query.from as usize) < facade.num_nodes());
        debug_assert!((query.to as usize) < facade.num_nodes());

        // initialize
        self.tentative_distance = INFINITY;
        self.heaps.forward.clear();
        self.heaps.backward.clear();
        self.heaps.forward.insert(query.from, 0, query.from);
        self.heaps.backward.insert(query.to, 0, query.to);

        let mut num_settled = 0;

        loop {
            let forward_min = self.heaps.forward.min_key();
            let backward_min = self.heaps.backward.min_key();
            // a direction is exhausted once its minimum cannot improve the best meeting
            let forward_active = forward_min.map(|min| min < self.tentative_distance).unwrap_or(false);
            let backward_active = backward_min.map(|min| min < self.tentative_distance).unwrap_or(false);
            if !forward_active && !backward_active {
                break;
            }

            if num_settled >= self.node_limit {
                warn!("bidirectional search aborted after settling {} nodes", num_settled);
                return None;
            }
            num_settled += 1;

            let forward_turn = forward_active && (!backward_active || forward_min <= backward_min);
            let heaps = &mut *self.heaps;
            if forward_turn {
                Self::settle_next(
                    &mut heaps.forward,
                    &heaps.backward,
                    |node| facade.forward_links(node),
                    &mut self.tentative_distance,
                    &mut self.meeting_node,
                );
            } else {
                Self::settle_next(
                    &mut heaps.backward,
                    &heaps.forward,
                    |node| facade.backward_links(node),
                    &mut self.tentative_distance,
                    &mut self.meeting_node,
                );
            }
        }

        debug!("bidirectional search settled {} nodes", num_settled);

        match self.tentative_distance {
            INFINITY.. => None,
            distance => Some(distance),
        }
    }

    fn settle_next<I: Iterator<Item = Link>>(
        queue: &mut QueryHeap<NodeId>,
        opposite: &QueryHeap<NodeId>,
        links: impl FnOnce(NodeId) -> I,
        tentative_distance: &mut Weight,
        meeting_node: &mut NodeId,
    ) {
        let node = queue.delete_min().expect("active direction has a queue minimum");
        let distance = queue.key(node);

        if opposite.was_inserted(node) {
            let total = distance + opposite.key(node);
            if total < *tentative_distance {
                *tentative_distance = total;
                *meeting_node = node;
            }
        }

        for link in links(node) {
            let candidate = distance.saturating_add(link.weight);
            if candidate >= INFINITY {
                continue;
            }
            // settled keys never regress
            if queue.was_settled(link.head) {
                continue;
            }
            if queue.was_inserted(link.head) {
                if candidate < queue.key(link.head) {
                    queue.decrease_key(link.head, candidate);
                    *queue.data_mut(link.head) = node;
                }
            } else {
                queue.insert(link.head, candidate, node);
            }
        }
    }

    /// The node sequence of the last found route, shortcut edges fully
    /// unpacked into their original road segments.
    /// Empty if the last query found no route.
    pub fn path(&self, query: Query) -> Vec<NodeId> {
        if self.tentative_distance >= INFINITY {
            return Vec::new();
        }

        // walk the forward search tree from the meeting node back to the source
        let mut chain = vec![self.meeting_node];
        while *chain.last().expect("chain is never empty") != query.from {
            chain.push(*self.heaps.forward.data(*chain.last().expect("chain is never empty")));
        }
        chain.reverse();

        let mut path = vec![query.from];
        for pair in chain.windows(2) {
            self.unpack_edge(pair[0], pair[1], &mut path);
        }

        // then the backward search tree from the meeting node on to the target
        let mut node = self.meeting_node;
        while node != query.to {
            let next = *self.heaps.backward.data(node);
            self.unpack_edge(node, next, &mut path);
            node = next;
        }

        path
    }

    fn unpack_edge(&self, tail: NodeId, head: NodeId, path: &mut Vec<NodeId>) {
        let link = self.facade.find_edge(tail, head).expect("path edge missing from graph");
        match link.middle.value() {
            Some(middle) => {
                self.unpack_edge(tail, middle, path);
                self.unpack_edge(middle, head, path);
            }
            None => path.push(head),
        }
    }

    /// Distance and unpacked path in one go.
    pub fn query(&mut self, query: Query) -> Option<RouteResult> {
        self.distance(query).map(|distance| RouteResult {
            distance,
            path: self.path(query),
        })
    }
}
