//! Traffic-weighted road network model

pub mod components;
pub mod network;

pub use components::{NodeKey, RoadEdge, RoadNode};
pub use network::{RoadGraph, SharedGraph};
