//! Liveness check plugin.

use super::Plugin;
use crate::algo::search_context::SearchContext;
use crate::datastr::graph::GraphFacade;
use crate::dispatch::{Reply, RouteParameters};

pub struct HelloWorldPlugin;

impl<F: GraphFacade> Plugin<F> for HelloWorldPlugin {
    fn descriptor(&self) -> &'static str {
        "hello"
    }

    fn handle_request(&self, _context: &mut SearchContext, _params: &RouteParameters, reply: &mut Reply) {
        reply.content = serde_json::json!({ "title": "Hello World" });
    }
}
