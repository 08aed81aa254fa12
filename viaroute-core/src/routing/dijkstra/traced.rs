use std::collections::BinaryHeap;

use hashbrown::HashMap;
use itertools::Itertools;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::state::State;
use crate::model::RoadEdge;
use crate::routing::path::RoutePath;
use crate::{Error, RoadGraph};

/// Dijkstra's algorithm from `start` to `target` under a caller-supplied
/// edge-cost function.
///
/// The cost function must return finite, non-negative values; that is a
/// caller contract, not a checked condition. Output is deterministic for
/// identical inputs: equal-cost frontier entries pop in discovery order
/// and relaxation keeps the first-discovered predecessor on ties.
///
/// The returned path carries the *plain* total edge cost regardless of
/// the cost function searched under, so alternative paths stay
/// comparable on one scale.
///
/// # Errors
///
/// Returns [`Error::Unreachable`] when no path connects the nodes.
pub(crate) fn dijkstra_path<F>(
    graph: &RoadGraph,
    start: NodeIndex,
    target: NodeIndex,
    cost_fn: F,
) -> Result<RoutePath, Error>
where
    F: Fn(&RoadEdge) -> f64,
{
    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);
    let mut next_seq: u64 = 1;

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        seq: 0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node, .. }) = heap.pop() {
        if node == target {
            break;
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        // Examine neighbors
        for edge in graph.graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + cost_fn(edge.weight());

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, node);
                    heap.push(State {
                        cost: next_cost,
                        seq: next_seq,
                        node: next,
                    });
                    next_seq += 1;
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    // Strict improvement only: equal-cost rediscoveries
                    // keep the first predecessor
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, node);
                        heap.push(State {
                            cost: next_cost,
                            seq: next_seq,
                            node: next,
                        });
                        next_seq += 1;
                    }
                }
            }
        }
    }

    if !distances.contains_key(&target) {
        return Err(Error::Unreachable);
    }

    // Follow predecessors backward from target to start
    let mut node_path = vec![target];
    let mut current = target;
    while current != start {
        if let Some(&prev) = predecessors.get(&current) {
            node_path.push(prev);
            current = prev;
        } else {
            break;
        }
    }
    node_path.reverse();

    let plain_cost: f64 = node_path
        .iter()
        .tuple_windows()
        .filter_map(|(&from, &to)| graph.edge_cost(from, to))
        .sum();

    let coords = node_path
        .iter()
        .filter_map(|&node| graph.node_point(node))
        .map(crate::model::Coordinate::from_point)
        .collect();

    Ok(RoutePath::new(coords, plain_cost))
}
