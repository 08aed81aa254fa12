//! Data model for traffic-aware routing
//!
//! Contains the coordinate value type and the road network graph.

pub mod coordinate;
pub mod road;

pub use coordinate::Coordinate;
pub use road::components::{NodeKey, RoadEdge, RoadNode};
pub use road::network::{RoadGraph, SharedGraph};
