//! Road network components - nodes and traffic-weighted edges

use chrono::{DateTime, Utc};
use geo::Point;

use crate::model::Coordinate;

/// Stable node identity: latitude and longitude scaled by
/// 10^precision and rounded to integers. Observation endpoints that
/// round to the same key snap to the same graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeKey {
    lat: i64,
    lon: i64,
}

impl NodeKey {
    pub fn snap(coord: Coordinate, precision: u32) -> Self {
        let scale = 10_f64.powi(precision.try_into().unwrap_or(i32::MAX));
        Self {
            lat: (coord.latitude * scale).round() as i64,
            lon: (coord.longitude * scale).round() as i64,
        }
    }
}

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Snapping key the node was deduplicated under
    pub key: NodeKey,
    /// Node coordinates; the first observation to produce the key wins
    pub geometry: Point<f64>,
}

/// Road graph edge (directed traffic segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Folded traffic cost, always finite and positive
    pub cost: f64,
    /// Timestamp of the newest observation folded into the edge
    pub observed_at: DateTime<Utc>,
    /// Number of observations folded into the edge
    pub samples: u32,
}
