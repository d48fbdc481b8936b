//! The plugin interface and the built-in plugins.

use super::{Reply, RouteParameters};
use crate::algo::search_context::SearchContext;
use crate::datastr::graph::GraphFacade;

pub mod hello_world;
pub mod locate;
pub mod nearest;
pub mod timestamp;
pub mod via_route;

/// One query service.
///
/// Plugins are registered once and then shared across worker threads, so
/// they must not carry per-request state. Everything mutable a request
/// needs lives in the caller's [`SearchContext`] and the reply.
pub trait Plugin<F: GraphFacade>: Send + Sync {
    /// The service name this plugin is registered under.
    fn descriptor(&self) -> &'static str;

    /// Answer one request. The dispatcher has already set the reply status
    /// to ok; plugins overwrite status and content as they see fit.
    fn handle_request(&self, context: &mut SearchContext, params: &RouteParameters, reply: &mut Reply);
}
