//! Immutable road graph with a spatial index for snapping queries

use std::sync::{Arc, PoisonError, RwLock};

use geo::Point;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use rstar::{RTree, primitives::GeomWithData};

use super::components::{RoadEdge, RoadNode};
use crate::Error;

type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Weighted directed road graph built from traffic observations.
///
/// Immutable after construction and safe to share across threads; any
/// number of concurrent searches may read it without locking.
pub struct RoadGraph {
    pub(crate) graph: DiGraph<RoadNode, RoadEdge>,
    index: RTree<IndexedPoint>,
}

impl std::fmt::Debug for RoadGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoadGraph")
            .field("nodes", &self.graph.node_count())
            .field("edges", &self.graph.edge_count())
            .finish()
    }
}

impl RoadGraph {
    pub(crate) fn new(graph: DiGraph<RoadNode, RoadEdge>) -> Self {
        let points = graph
            .node_indices()
            .map(|idx| {
                let node = &graph[idx];
                IndexedPoint::new([node.geometry.x(), node.geometry.y()], idx)
            })
            .collect();
        Self {
            graph,
            index: RTree::bulk_load(points),
        }
    }

    /// Returns the graph node closest to an arbitrary point under planar
    /// Euclidean distance on the lon/lat plane. The metric ignores earth
    /// curvature, which is acceptable at snapping distances.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoNodes`] when the graph has no nodes.
    pub fn nearest_node(&self, point: Point<f64>) -> Result<NodeIndex, Error> {
        self.index
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|indexed| indexed.data)
            .ok_or(Error::NoNodes)
    }

    /// Outgoing adjacency of a node.
    pub fn neighbors(&self, node: NodeIndex) -> impl Iterator<Item = (NodeIndex, &RoadEdge)> {
        self.graph
            .edges(node)
            .map(|edge| (edge.target(), edge.weight()))
    }

    /// Geometry of a node, if the index is valid.
    pub fn node_point(&self, node: NodeIndex) -> Option<Point<f64>> {
        self.graph.node_weight(node).map(|n| n.geometry)
    }

    /// Folded cost of the directed edge between two nodes, if one exists.
    pub fn edge_cost(&self, from: NodeIndex, to: NodeIndex) -> Option<f64> {
        self.graph
            .find_edge(from, to)
            .and_then(|edge| self.graph.edge_weight(edge))
            .map(|edge| edge.cost)
    }

    /// All folded edge costs, in arbitrary order.
    pub fn edge_costs(&self) -> impl Iterator<Item = f64> {
        self.graph.edge_weights().map(|edge| edge.cost)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

/// Clone-able handle to the current road graph.
///
/// Rebuilding from fresh traffic data produces a new [`RoadGraph`] and
/// installs it with [`SharedGraph::swap`]; computations that already
/// hold a snapshot from [`SharedGraph::load`] keep reading the instance
/// they started with.
#[derive(Debug, Clone)]
pub struct SharedGraph {
    current: Arc<RwLock<Arc<RoadGraph>>>,
}

impl SharedGraph {
    pub fn new(graph: RoadGraph) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(graph))),
        }
    }

    /// Snapshot of the graph as of this call.
    pub fn load(&self) -> Arc<RoadGraph> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Installs a rebuilt graph for subsequent [`SharedGraph::load`]s
    /// and returns it.
    pub fn swap(&self, graph: RoadGraph) -> Arc<RoadGraph> {
        let fresh = Arc::new(graph);
        let mut slot = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = fresh.clone();
        fresh
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::{Coordinate, NodeKey};

    fn node(latitude: f64, longitude: f64) -> RoadNode {
        let coord = Coordinate::new(latitude, longitude).unwrap();
        RoadNode {
            key: NodeKey::snap(coord, 5),
            geometry: coord.point(),
        }
    }

    fn edge(cost: f64) -> RoadEdge {
        RoadEdge {
            cost,
            observed_at: Utc::now(),
            samples: 1,
        }
    }

    fn two_node_graph() -> RoadGraph {
        let mut graph = DiGraph::new();
        let a = graph.add_node(node(0.0, 0.0));
        let b = graph.add_node(node(0.0, 1.0));
        graph.add_edge(a, b, edge(3.0));
        RoadGraph::new(graph)
    }

    #[test]
    fn nearest_node_picks_the_closest() {
        let graph = two_node_graph();
        let near_b = Coordinate::new(0.01, 0.99).unwrap();
        let snapped = graph.nearest_node(near_b.point()).unwrap();
        assert_eq!(graph.node_point(snapped).unwrap().x(), 1.0);
    }

    #[test]
    fn nearest_node_on_empty_graph_fails() {
        let graph = RoadGraph::new(DiGraph::new());
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        assert!(matches!(
            graph.nearest_node(origin.point()),
            Err(Error::NoNodes)
        ));
    }

    #[test]
    fn neighbors_expose_edge_costs() {
        let graph = two_node_graph();
        let origin = Coordinate::new(0.0, 0.0).unwrap();
        let a = graph.nearest_node(origin.point()).unwrap();
        let adjacency: Vec<_> = graph.neighbors(a).collect();
        assert_eq!(adjacency.len(), 1);
        assert_eq!(adjacency[0].1.cost, 3.0);
        assert_eq!(graph.edge_cost(a, adjacency[0].0), Some(3.0));
    }

    #[test]
    fn swap_serves_new_loads_but_not_held_snapshots() {
        let shared = SharedGraph::new(two_node_graph());
        let held = shared.load();
        assert_eq!(held.node_count(), 2);

        let mut rebuilt = DiGraph::new();
        rebuilt.add_node(node(5.0, 5.0));
        shared.swap(RoadGraph::new(rebuilt));

        assert_eq!(shared.load().node_count(), 1);
        // The snapshot taken before the swap is untouched.
        assert_eq!(held.node_count(), 2);
    }
}
