//! The seam to the spatial index.
//!
//! Snapping a raw coordinate to the road network is the job of a spatial
//! index that lives outside this crate. Plugins only depend on this trait,
//! so tests and embedders can plug in whatever index they have.

use super::Coordinate;
use crate::datastr::graph::NodeId;

/// A snapped coordinate with the street name at that location.
#[derive(Debug, Clone, PartialEq)]
pub struct NearestFeature {
    pub node: NodeId,
    pub location: Coordinate,
    pub name: String,
}

pub trait NodeLocator: Send + Sync {
    /// The graph node closest to `coordinate` and its actual location,
    /// or `None` if the index has nothing near the coordinate.
    fn nearest_node(&self, coordinate: Coordinate) -> Option<(NodeId, Coordinate)>;

    /// Like [`NodeLocator::nearest_node`], enriched with the street name.
    fn nearest_feature(&self, coordinate: Coordinate) -> Option<NearestFeature>;
}
