//! Snaps a coordinate to the nearest graph node.

use super::Plugin;
use crate::algo::search_context::SearchContext;
use crate::datastr::graph::GraphFacade;
use crate::dispatch::locate::NodeLocator;
use crate::dispatch::{Reply, RouteParameters, Status};
use std::sync::Arc;

pub struct LocatePlugin {
    locator: Arc<dyn NodeLocator>,
}

impl LocatePlugin {
    pub fn new(locator: Arc<dyn NodeLocator>) -> LocatePlugin {
        LocatePlugin { locator }
    }
}

impl<F: GraphFacade> Plugin<F> for LocatePlugin {
    fn descriptor(&self) -> &'static str {
        "locate"
    }

    fn handle_request(&self, _context: &mut SearchContext, params: &RouteParameters, reply: &mut Reply) {
        let Some(&coordinate) = params.coordinates.first() else {
            *reply = Reply::stock(Status::BadRequest);
            return;
        };
        match self.locator.nearest_node(coordinate) {
            Some((node, location)) => {
                reply.content = serde_json::json!({
                    "node": node,
                    "mapped_coordinate": [location.lat, location.lon],
                });
            }
            None => {
                reply.content = serde_json::json!({
                    "status": 207,
                    "status_message": "Cannot find location",
                });
            }
        }
    }
}
