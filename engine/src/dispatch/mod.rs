//! Request dispatch.
//!
//! The [`Engine`] owns the graph facade and a registry of named plugins.
//! Incoming requests carry a service name; the engine looks up the plugin
//! registered under that name and hands it the request together with the
//! caller's per-thread search state. Unknown service names produce a stock
//! bad request reply without touching any plugin.

use crate::algo::search_context::SearchContext;
use crate::datastr::graph::{GraphFacade, NodeId};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub mod locate;
pub mod plugin;

use locate::NodeLocator;
use plugin::hello_world::HelloWorldPlugin;
use plugin::locate::LocatePlugin;
use plugin::nearest::NearestPlugin;
use plugin::timestamp::TimestampPlugin;
use plugin::via_route::ViaRoutePlugin;
use plugin::Plugin;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f32,
    pub lon: f32,
}

/// The parsed parameters of one request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteParameters {
    /// Which plugin should handle the request.
    pub service: String,
    /// Waypoints as coordinates, resolved through the locator.
    #[serde(default)]
    pub coordinates: Vec<Coordinate>,
    /// Waypoints given directly as graph nodes, bypassing the locator.
    #[serde(default)]
    pub nodes: Vec<NodeId>,
    /// Optional per-request bound on settled nodes.
    #[serde(default)]
    pub max_settled_nodes: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    BadRequest,
}

/// What goes back to the caller: a transport level status and a JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub status: Status,
    pub content: serde_json::Value,
}

impl Reply {
    pub fn ok() -> Reply {
        Reply {
            status: Status::Ok,
            content: serde_json::Value::Null,
        }
    }

    /// The canned reply for requests no plugin will see.
    pub fn stock(status: Status) -> Reply {
        Reply {
            status,
            content: serde_json::json!({ "status_message": "bad request" }),
        }
    }
}

impl Default for Reply {
    fn default() -> Reply {
        Reply::ok()
    }
}

/// The query engine: one graph facade, many plugins.
pub struct Engine<F: GraphFacade> {
    facade: Arc<F>,
    plugins: HashMap<&'static str, Box<dyn Plugin<F>>>,
}

impl<F: GraphFacade + Send + Sync + 'static> Engine<F> {
    /// Build an engine over `facade` with the full default plugin set.
    pub fn new(facade: Arc<F>, locator: Arc<dyn NodeLocator>) -> Engine<F> {
        let mut engine = Engine {
            facade: facade.clone(),
            plugins: HashMap::new(),
        };
        engine.register_plugin(Box::new(HelloWorldPlugin));
        engine.register_plugin(Box::new(TimestampPlugin));
        engine.register_plugin(Box::new(LocatePlugin::new(locator.clone())));
        engine.register_plugin(Box::new(NearestPlugin::new(locator.clone())));
        engine.register_plugin(Box::new(ViaRoutePlugin::new(facade, locator)));
        engine
    }

    /// Build an engine with no plugins at all.
    pub fn without_plugins(facade: Arc<F>) -> Engine<F> {
        Engine {
            facade,
            plugins: HashMap::new(),
        }
    }

    pub fn facade(&self) -> &Arc<F> {
        &self.facade
    }

    /// Add a plugin to the registry. Registering a second plugin under an
    /// already taken descriptor replaces the first one.
    pub fn register_plugin(&mut self, plugin: Box<dyn Plugin<F>>) {
        let descriptor = plugin.descriptor();
        info!("loaded plugin: {}", descriptor);
        self.plugins.insert(descriptor, plugin);
    }

    /// Route one request to the plugin registered for its service name.
    ///
    /// `context` is the calling thread's search state; plugins run their
    /// searches in it. An unknown service name yields a stock bad request.
    pub fn run_query(&self, context: &mut SearchContext, params: &RouteParameters, reply: &mut Reply) {
        match self.plugins.get(params.service.as_str()) {
            Some(plugin) => {
                reply.status = Status::Ok;
                plugin.handle_request(context, params, reply);
            }
            None => {
                *reply = Reply::stock(Status::BadRequest);
            }
        }
    }
}
