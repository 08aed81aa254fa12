//! Traffic-aware route computation engine.
//!
//! Builds a weighted directed road graph from traffic segment
//! observations, runs a deterministic shortest-path search over it, and
//! derives a second, congestion-avoiding path per request. The request
//! lifecycle (pending → calculated | error) is modelled as an immutable
//! value with a single terminal transition.
//!
//! Transport, persistence and facility listing live outside this crate;
//! the seams they plug into are the [`ObservationSource`] and
//! [`RequestStore`] traits.

pub mod error;
pub mod lifecycle;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

// Re-export of the core types for convenience
pub use lifecycle::{RequestState, RequestStore, RouteRequest, RouteStatus};
pub use loading::{GraphConfig, ObservationSource, TrafficObservation, WeightFold};
pub use model::{Coordinate, RoadGraph, SharedGraph};
pub use routing::{OptimizerParams, RoutePath};

/// Node identifier within a [`RoadGraph`].
pub type RoadNodeId = petgraph::graph::NodeIndex;

/// Decimal places kept when snapping observation endpoints to graph
/// nodes. Five places is roughly 1.1 m at the equator.
pub const DEFAULT_SNAP_PRECISION: u32 = 5;
