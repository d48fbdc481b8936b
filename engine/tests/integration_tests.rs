use road_query_engine::{
    algo::{bidirectional_dijkstra::BidirectionalDijkstra, search_context::*, Query},
    datastr::{graph::*, query_heap::QueryHeap},
};

use rand::prelude::*;
use rayon::prelude::*;

fn graph() -> InternalGraph {
    // This is the directed graph we're going to use.
    // The node numbers correspond to the different states,
    // and the edge weights symbolize the cost of moving
    // from one node to another.
    // Note that the edges are one-way.
    //
    //                  7
    //          +-----------------+
    //          |                 |
    //          v   1        2    |  2
    //          0 -----> 1 -----> 3 ---> 4
    //          |        ^        ^      ^
    //          |        | 1      |      |
    //          |        |        | 3    | 1
    //          +------> 2 -------+      |
    //           10      |               |
    //                   +---------------+
    //
    InternalGraph::from_adjacency_lists(vec![
        vec![Link::new(2, 10), Link::new(1, 1)],
        vec![Link::new(3, 2)],
        vec![Link::new(1, 1), Link::new(3, 3), Link::new(4, 1)],
        vec![Link::new(0, 7), Link::new(4, 2)],
        vec![],
    ])
}

fn distance(graph: &impl GraphFacade, context: &mut SearchContext, from: NodeId, to: NodeId) -> Option<Weight> {
    let heaps = context.ensure_capacity(SearchSlot::Primary, graph.num_nodes());
    BidirectionalDijkstra::new(graph, heaps).distance(Query { from, to })
}

#[test]
fn bidir_dijkstra_correct_distances() {
    let _ = env_logger::builder().is_test(true).try_init();
    let graph = graph();
    let mut context = SearchContext::new();

    assert_eq!(distance(&graph, &mut context, 0, 1), Some(1));
    assert_eq!(distance(&graph, &mut context, 0, 3), Some(3));
    assert_eq!(distance(&graph, &mut context, 3, 0), Some(7));
    assert_eq!(distance(&graph, &mut context, 0, 4), Some(5));
    assert_eq!(distance(&graph, &mut context, 4, 0), None);
    assert_eq!(distance(&graph, &mut context, 2, 2), Some(0));
}

#[test]
fn unique_shortest_path_is_reported() {
    //              10
    //          0 -----> 1
    //          |        |  2
    //        1 |        v       5
    //          +-> 3 -> 2 ----> 4
    //                1
    let graph = InternalGraph::from_adjacency_lists(vec![
        vec![Link::new(1, 10), Link::new(3, 1)],
        vec![Link::new(2, 2)],
        vec![Link::new(4, 5)],
        vec![Link::new(2, 1)],
        vec![],
    ]);
    let mut context = SearchContext::new();
    let heaps = context.ensure_capacity(SearchSlot::Primary, graph.num_nodes());
    let mut server = BidirectionalDijkstra::new(&graph, heaps);

    let query = Query { from: 0, to: 4 };
    assert_eq!(server.distance(query), Some(7));
    assert_eq!(server.path(query), vec![0, 3, 2, 4]);
}

#[test]
fn shortcuts_are_unpacked_into_original_edges() {
    // 0 -> 1 -> 2 -> 3 plus shortcuts over 1 and over the whole chain
    let graph = InternalGraph::from_adjacency_lists(vec![
        vec![Link::new(1, 1), Link::shortcut(2, 3, 1), Link::shortcut(3, 4, 2)],
        vec![Link::new(2, 2)],
        vec![Link::new(3, 1)],
        vec![],
    ]);
    let mut context = SearchContext::new();
    let heaps = context.ensure_capacity(SearchSlot::Primary, graph.num_nodes());
    let mut server = BidirectionalDijkstra::new(&graph, heaps);

    let query = Query { from: 0, to: 3 };
    assert_eq!(server.distance(query), Some(4));
    assert_eq!(server.path(query), vec![0, 1, 2, 3]);
}

#[test]
fn both_facade_backings_agree() {
    let internal = graph();
    let shared = SharedSegment::encode(&internal).decode().expect("valid segment must decode");
    let mut context = SearchContext::new();

    for from in 0..internal.num_nodes() as NodeId {
        for to in 0..internal.num_nodes() as NodeId {
            assert_eq!(
                distance(&internal, &mut context, from, to),
                distance(&shared, &mut context, from, to)
            );
        }
    }
}

#[test]
fn node_limit_turns_routes_into_no_routes() {
    let graph = graph();
    let mut context = SearchContext::new();
    let query = Query { from: 0, to: 4 };

    let heaps = context.ensure_capacity(SearchSlot::Primary, graph.num_nodes());
    assert_eq!(BidirectionalDijkstra::new(&graph, heaps).with_node_limit(1).distance(query), None);

    let heaps = context.ensure_capacity(SearchSlot::Primary, graph.num_nodes());
    assert_eq!(BidirectionalDijkstra::new(&graph, heaps).distance(query), Some(5));
}

#[test]
fn disconnected_queries_terminate_without_result() {
    let graph = InternalGraph::from_adjacency_lists(vec![vec![Link::new(1, 1)], vec![], vec![Link::new(3, 1)], vec![]]);
    let mut context = SearchContext::new();

    assert_eq!(distance(&graph, &mut context, 0, 3), None);
    assert_eq!(distance(&graph, &mut context, 2, 1), None);
}

// plain one directional dijkstra as the ground truth for randomized tests
fn reference_distance(graph: &impl GraphFacade, from: NodeId, to: NodeId) -> Option<Weight> {
    let mut queue: QueryHeap<()> = QueryHeap::new(graph.num_nodes());
    queue.insert(from, 0, ());
    while let Some(node) = queue.delete_min() {
        let distance = queue.key(node);
        if node == to {
            return Some(distance);
        }
        for link in graph.forward_links(node) {
            let candidate = distance + link.weight;
            if queue.was_settled(link.head) {
                continue;
            }
            if queue.was_inserted(link.head) {
                queue.decrease_key(link.head, candidate);
            } else {
                queue.insert(link.head, candidate, ());
            }
        }
    }
    None
}

fn random_graph(rng: &mut StdRng, num_nodes: usize, num_edges: usize) -> InternalGraph {
    let mut adjacency = vec![Vec::new(); num_nodes];
    for _ in 0..num_edges {
        let tail = rng.gen_range(0..num_nodes);
        let head = rng.gen_range(0..num_nodes as NodeId);
        adjacency[tail].push(Link::new(head, rng.gen_range(1..100)));
    }
    InternalGraph::from_adjacency_lists(adjacency)
}

#[test]
fn matches_reference_dijkstra_on_random_graphs() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut context = SearchContext::new();

    for _ in 0..10 {
        let graph = random_graph(&mut rng, 50, 200);
        for _ in 0..100 {
            let from = rng.gen_range(0..50);
            let to = rng.gen_range(0..50);
            assert_eq!(
                distance(&graph, &mut context, from, to),
                reference_distance(&graph, from, to),
                "query {} -> {} disagrees with reference",
                from,
                to
            );
        }
    }
}

#[test]
fn parallel_queries_with_one_context_per_thread() {
    let graph = graph();
    let queries: Vec<_> = (0u32..64).map(|i| Query { from: i % 4, to: (i + 1) % 5 }).collect();

    let sequential: Vec<_> = {
        let mut context = SearchContext::new();
        queries.iter().map(|&query| distance(&graph, &mut context, query.from, query.to)).collect()
    };

    let parallel: Vec<_> = queries
        .par_iter()
        .map_init(SearchContext::new, |context, &query| distance(&graph, context, query.from, query.to))
        .collect();

    assert_eq!(sequential, parallel);
}
