//! Path search over the road graph

pub mod dijkstra;
mod optimizer;
mod path;
mod pathfinder;
mod to_geojson;

pub use optimizer::{OptimizerParams, optimized_path};
pub use path::RoutePath;
pub use pathfinder::{find_path, shortest_path};
pub use to_geojson::routes_to_geojson;
