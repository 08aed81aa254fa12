//! This module is responsible for turning traffic observations into a
//! queryable road graph.

mod builder;
mod config;
mod observations;

pub use builder::{build_road_graph, refresh_graph};
pub use config::{GraphConfig, WeightFold};
pub use observations::{ObservationSource, TrafficObservation};
