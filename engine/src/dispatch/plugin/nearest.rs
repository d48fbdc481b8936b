//! Like locate, but also reports the street name at the snapped position.

use super::Plugin;
use crate::algo::search_context::SearchContext;
use crate::datastr::graph::GraphFacade;
use crate::dispatch::locate::NodeLocator;
use crate::dispatch::{Reply, RouteParameters, Status};
use std::sync::Arc;

pub struct NearestPlugin {
    locator: Arc<dyn NodeLocator>,
}

impl NearestPlugin {
    pub fn new(locator: Arc<dyn NodeLocator>) -> NearestPlugin {
        NearestPlugin { locator }
    }
}

impl<F: GraphFacade> Plugin<F> for NearestPlugin {
    fn descriptor(&self) -> &'static str {
        "nearest"
    }

    fn handle_request(&self, _context: &mut SearchContext, params: &RouteParameters, reply: &mut Reply) {
        let Some(&coordinate) = params.coordinates.first() else {
            *reply = Reply::stock(Status::BadRequest);
            return;
        };
        match self.locator.nearest_feature(coordinate) {
            Some(feature) => {
                reply.content = serde_json::json!({
                    "node": feature.node,
                    "mapped_coordinate": [feature.location.lat, feature.location.lon],
                    "name": feature.name,
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
