// Re-export key components
pub use crate::error::Error;
pub use crate::lifecycle::{
    MemoryStore, RequestState, RequestStore, RouteRequest, RouteStatus, compute, compute_batch,
    submit,
};
pub use crate::loading::{
    GraphConfig, ObservationSource, TrafficObservation, WeightFold, build_road_graph,
    refresh_graph,
};
pub use crate::model::{Coordinate, RoadGraph, SharedGraph};
pub use crate::routing::{
    OptimizerParams, RoutePath, find_path, optimized_path, routes_to_geojson, shortest_path,
};

pub use crate::DEFAULT_SNAP_PRECISION;
pub use crate::RoadNodeId;
