use petgraph::graph::NodeIndex;

use super::dijkstra::dijkstra_path;
use super::path::RoutePath;
use crate::model::RoadEdge;
use crate::{Error, RoadGraph};

/// Minimum-total-cost path between two graph nodes under a supplied
/// edge-cost function.
///
/// `cost_fn` must return finite, non-negative values; the search is
/// stateless and reentrant, so any number of calls may run concurrently
/// against one graph.
///
/// # Errors
///
/// Returns [`Error::Unreachable`] when no path exists.
pub fn find_path<F>(
    graph: &RoadGraph,
    start: NodeIndex,
    end: NodeIndex,
    cost_fn: F,
) -> Result<RoutePath, Error>
where
    F: Fn(&RoadEdge) -> f64,
{
    dijkstra_path(graph, start, end, cost_fn)
}

/// Shortest path under the plain folded traffic cost.
///
/// # Errors
///
/// Returns [`Error::Unreachable`] when no path exists.
pub fn shortest_path(graph: &RoadGraph, start: NodeIndex, end: NodeIndex) -> Result<RoutePath, Error> {
    dijkstra_path(graph, start, end, |edge| edge.cost)
}
