//! Reports the server time, mostly useful to probe request plumbing.

use super::Plugin;
use crate::algo::search_context::SearchContext;
use crate::datastr::graph::GraphFacade;
use crate::dispatch::{Reply, RouteParameters};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct TimestampPlugin;

impl<F: GraphFacade> Plugin<F> for TimestampPlugin {
    fn descriptor(&self) -> &'static str {
        "timestamp"
    }

    fn handle_request(&self, _context: &mut SearchContext, _params: &RouteParameters, reply: &mut Reply) {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0);
        reply.content = serde_json::json!({ "timestamp": seconds });
    }
}
