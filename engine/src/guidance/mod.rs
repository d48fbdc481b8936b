//! Guidance related metadata attached to graph edges.

pub mod road_classification;
