//! The route search plugin.
//!
//! Resolves the request waypoints to graph nodes and runs one
//! bidirectional search per leg, all in the primary slot of the caller's
//! search state. Leg paths are concatenated into one route.

use super::Plugin;
use crate::algo::bidirectional_dijkstra::BidirectionalDijkstra;
use crate::algo::search_context::{SearchContext, SearchSlot};
use crate::algo::Query;
use crate::datastr::graph::{GraphFacade, NodeId, Weight, INFINITY};
use crate::dispatch::locate::NodeLocator;
use crate::dispatch::{Reply, RouteParameters, Status};
use log::debug;
use std::sync::Arc;

pub struct ViaRoutePlugin<F: GraphFacade> {
    facade: Arc<F>,
    locator: Arc<dyn NodeLocator>,
}

impl<F: GraphFacade> ViaRoutePlugin<F> {
    pub fn new(facade: Arc<F>, locator: Arc<dyn NodeLocator>) -> ViaRoutePlugin<F> {
        ViaRoutePlugin { facade, locator }
    }

    /// Waypoints given as nodes win over coordinates.
    fn waypoints(&self, params: &RouteParameters) -> Option<Vec<NodeId>> {
        if !params.nodes.is_empty() {
            if params.nodes.iter().any(|&node| node as usize >= self.facade.num_nodes()) {
                return None;
            }
            return Some(params.nodes.clone());
        }
        params
            .coordinates
            .iter()
            .map(|&coordinate| self.locator.nearest_node(coordinate).map(|(node, _)| node))
            .collect()
    }
}

impl<F: GraphFacade + Send + Sync> Plugin<F> for ViaRoutePlugin<F> {
    fn descriptor(&self) -> &'static str {
        "viaroute"
    }

    fn handle_request(&self, context: &mut SearchContext, params: &RouteParameters, reply: &mut Reply) {
        let Some(waypoints) = self.waypoints(params) else {
            *reply = Reply::stock(Status::BadRequest);
            return;
        };
        if waypoints.len() < 2 {
            *reply = Reply::stock(Status::BadRequest);
            return;
        }

        let heaps = context.ensure_capacity(SearchSlot::Primary, self.facade.num_nodes());
        let mut server = BidirectionalDijkstra::new(self.facade.as_ref(), heaps);
        if let Some(limit) = params.max_settled_nodes {
            server = server.with_node_limit(limit);
        }

        let mut total_distance: Weight = 0;
        let mut route = vec![waypoints[0]];
        for leg in waypoints.windows(2) {
            let query = Query { from: leg[0], to: leg[1] };
            match server.query(query) {
                Some(result) => {
                    debug!("leg {} -> {} found with distance {}", query.from, query.to, result.distance);
                    total_distance = std::cmp::min(total_distance.saturating_add(result.distance), INFINITY);
                    route.extend_from_slice(&result.path[1..]);
                }
                None => {
                    reply.content = serde_json::json!({
                        "status": 207,
                        "status_message": "Cannot find route between points",
                    });
                    return;
                }
            }
        }

        reply.content = serde_json::json!({
            "status": 0,
            "status_message": "Found route between points",
            "total_distance": total_distance,
            "route": route,
        });
    }
}
