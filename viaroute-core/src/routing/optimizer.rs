use itertools::Itertools;
use log::debug;
use petgraph::graph::NodeIndex;
use serde::{Deserialize, Serialize};

use super::dijkstra::dijkstra_path;
use super::path::RoutePath;
use crate::{Error, RoadGraph};

/// Tuning knobs for the traffic-avoiding cost transform.
///
/// Edges costing more than the `congestion_percentile` of the graph's
/// edge-cost distribution are penalized superlinearly:
/// `cost * (cost / threshold)^(penalty_exponent - 1)`. The transform is
/// continuous at the threshold, so lightly loaded edges keep their plain
/// cost. Both knobs are tunables, not fixed laws.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OptimizerParams {
    /// Exponent applied above the congestion threshold; must be > 1 for
    /// the transform to penalize at all.
    pub penalty_exponent: f64,
    /// Quantile of the edge-cost distribution taken as the congestion
    /// threshold, in [0, 1].
    pub congestion_percentile: f64,
}

impl Default for OptimizerParams {
    fn default() -> Self {
        Self {
            penalty_exponent: 2.0,
            congestion_percentile: 0.85,
        }
    }
}

/// A traffic-aware alternative to the shortest path.
///
/// Runs the same search under the penalized cost, so the result avoids
/// congested edges more aggressively than plain shortest-path does, at
/// the expense of possibly higher plain cost. When no divergent route
/// exists the result equals the shortest path; that is a valid outcome,
/// not an error.
///
/// # Errors
///
/// Returns [`Error::Unreachable`] when no path exists.
pub fn optimized_path(
    graph: &RoadGraph,
    start: NodeIndex,
    end: NodeIndex,
    params: &OptimizerParams,
) -> Result<RoutePath, Error> {
    let threshold = congestion_threshold(graph, params.congestion_percentile);
    let exponent = params.penalty_exponent;
    debug!("Optimizing with congestion threshold {threshold}, exponent {exponent}");
    dijkstra_path(graph, start, end, move |edge| {
        penalized_cost(edge.cost, threshold, exponent)
    })
}

/// Congestion threshold: the given percentile of all folded edge costs.
fn congestion_threshold(graph: &RoadGraph, percentile: f64) -> f64 {
    let costs = graph
        .edge_costs()
        .sorted_by(f64::total_cmp)
        .collect::<Vec<_>>();
    if costs.is_empty() {
        return f64::INFINITY;
    }
    let rank = ((costs.len() - 1) as f64 * percentile.clamp(0.0, 1.0)).round() as usize;
    costs[rank]
}

fn penalized_cost(cost: f64, threshold: f64, exponent: f64) -> f64 {
    if cost <= threshold || threshold <= 0.0 {
        cost
    } else {
        cost * (cost / threshold).powf(exponent - 1.0)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::loading::{GraphConfig, TrafficObservation, build_road_graph};
    use crate::model::Coordinate;
    use crate::routing::pathfinder::shortest_path;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate::new(latitude, longitude).unwrap()
    }

    fn observation(start: Coordinate, end: Coordinate, weight: f64) -> TrafficObservation {
        TrafficObservation {
            start,
            end,
            weight,
            observed_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
        }
    }

    fn endpoints(graph: &RoadGraph, start: Coordinate, end: Coordinate) -> (NodeIndex, NodeIndex) {
        (
            graph.nearest_node(start.point()).unwrap(),
            graph.nearest_node(end.point()).unwrap(),
        )
    }

    #[test]
    fn penalty_is_identity_below_threshold() {
        assert_eq!(penalized_cost(2.0, 5.0, 2.0), 2.0);
        assert_eq!(penalized_cost(5.0, 5.0, 2.0), 5.0);
    }

    #[test]
    fn penalty_grows_superlinearly_above_threshold() {
        // cost 10 over threshold 5 at exponent 2: 10 * (10/5) = 20
        assert_eq!(penalized_cost(10.0, 5.0, 2.0), 20.0);
        assert!(penalized_cost(10.0, 5.0, 3.0) > penalized_cost(10.0, 5.0, 2.0));
    }

    #[test]
    fn avoids_the_congested_shortcut() {
        // Congested direct edge A → D cost 4; detour A → B → C → D cost
        // 2 each, total 6. Plain shortest takes the shortcut; the
        // optimizer routes around it.
        let a = coord(0.0, 0.0);
        let b = coord(0.0, 1.0);
        let c = coord(0.0, 2.0);
        let d = coord(0.0, 3.0);
        let graph = build_road_graph(
            &[
                observation(a, d, 4.0),
                observation(a, b, 2.0),
                observation(b, c, 2.0),
                observation(c, d, 2.0),
            ],
            &GraphConfig::default(),
        )
        .unwrap();
        let (start, end) = endpoints(&graph, a, d);

        let shortest = shortest_path(&graph, start, end).unwrap();
        assert_eq!(shortest.len(), 2);
        assert_eq!(shortest.cost(), 4.0);

        let params = OptimizerParams {
            penalty_exponent: 3.0,
            congestion_percentile: 0.5,
        };
        let optimized = optimized_path(&graph, start, end, &params).unwrap();
        assert_eq!(optimized.len(), 4);
        // The alternative pays more plain cost to dodge the congestion.
        assert!(optimized.cost() > shortest.cost());
    }

    #[test]
    fn identical_paths_when_no_divergent_route_exists() {
        // The direct edge is the only one over the congestion
        // threshold, so the surcharge applies to it, yet the detour was
        // already preferred. Agreeing with the shortest path is a valid
        // outcome, not an error.
        let a = coord(0.0, 0.0);
        let b = coord(0.0, 1.0);
        let c = coord(1.0, 1.0);
        let graph = build_road_graph(
            &[
                observation(a, b, 1.0),
                observation(b, c, 1.0),
                observation(a, c, 5.0),
            ],
            &GraphConfig::default(),
        )
        .unwrap();
        let (start, end) = endpoints(&graph, a, c);

        let shortest = shortest_path(&graph, start, end).unwrap();
        let params = OptimizerParams {
            penalty_exponent: 2.0,
            congestion_percentile: 0.5,
        };
        let optimized = optimized_path(&graph, start, end, &params).unwrap();
        assert_eq!(optimized, shortest);
        assert_eq!(optimized.len(), 3);
    }

    #[test]
    fn shortest_plain_cost_never_exceeds_optimized_plain_cost() {
        let a = coord(0.0, 0.0);
        let b = coord(0.0, 1.0);
        let c = coord(1.0, 0.0);
        let d = coord(1.0, 1.0);
        let graph = build_road_graph(
            &[
                observation(a, b, 1.0),
                observation(b, d, 8.0),
                observation(a, c, 3.0),
                observation(c, d, 3.0),
            ],
            &GraphConfig::default(),
        )
        .unwrap();
        let (start, end) = endpoints(&graph, a, d);

        let shortest = shortest_path(&graph, start, end).unwrap();
        let optimized = optimized_path(&graph, start, end, &OptimizerParams::default()).unwrap();
        assert!(shortest.cost() <= optimized.cost());
    }
}
