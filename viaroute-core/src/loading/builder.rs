use std::sync::Arc;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use log::{debug, info};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use super::config::{GraphConfig, WeightFold};
use super::observations::{ObservationSource, TrafficObservation};
use crate::model::{Coordinate, NodeKey, RoadEdge, RoadNode, SharedGraph};
use crate::{Error, RoadGraph};

/// Builds an immutable road graph from traffic observations.
///
/// Endpoints are deduplicated into nodes by snapping to
/// `config.snap_precision` decimal places; repeated directed segments
/// fold into one edge per `config.weight_fold`. Observations whose
/// endpoints snap to the same node carry no routing information and are
/// dropped.
///
/// # Errors
///
/// Returns [`Error::EmptyGraph`] for zero observations and
/// [`Error::InvalidData`] for a non-finite or non-positive weight.
pub fn build_road_graph(
    observations: &[TrafficObservation],
    config: &GraphConfig,
) -> Result<RoadGraph, Error> {
    if observations.is_empty() {
        return Err(Error::EmptyGraph);
    }

    let mut graph = DiGraph::new();
    let mut nodes: HashMap<NodeKey, NodeIndex> = HashMap::new();
    let mut edges: HashMap<(NodeIndex, NodeIndex), EdgeIndex> = HashMap::new();
    let mut self_loops = 0_usize;

    for observation in observations {
        validate_observation(observation)?;

        let from = intern_node(&mut graph, &mut nodes, observation.start, config.snap_precision);
        let to = intern_node(&mut graph, &mut nodes, observation.end, config.snap_precision);

        if from == to {
            self_loops += 1;
            continue;
        }

        match edges.entry((from, to)) {
            Entry::Vacant(entry) => {
                let edge = graph.add_edge(
                    from,
                    to,
                    RoadEdge {
                        cost: observation.weight,
                        observed_at: observation.observed_at,
                        samples: 1,
                    },
                );
                entry.insert(edge);
            }
            Entry::Occupied(entry) => {
                if let Some(edge) = graph.edge_weight_mut(*entry.get()) {
                    fold_edge(edge, observation, config.weight_fold);
                }
            }
        }
    }

    if self_loops > 0 {
        debug!("Dropped {self_loops} observations whose endpoints snapped to one node");
    }
    info!(
        "Built road graph: {} nodes, {} edges from {} observations",
        graph.node_count(),
        graph.edge_count(),
        observations.len()
    );

    Ok(RoadGraph::new(graph))
}

/// Pulls fresh observations from the source, rebuilds the graph and
/// swaps it into the shared handle. Computations holding a snapshot of
/// the previous graph are unaffected.
///
/// # Errors
///
/// Propagates source failures and [`build_road_graph`] errors; on error
/// the shared handle keeps serving the previous graph.
pub fn refresh_graph<S: ObservationSource>(
    source: &S,
    config: &GraphConfig,
    shared: &SharedGraph,
) -> Result<Arc<RoadGraph>, Error> {
    let observations = source.list_observations()?;
    let graph = build_road_graph(&observations, config)?;
    Ok(shared.swap(graph))
}

fn validate_observation(observation: &TrafficObservation) -> Result<(), Error> {
    observation.start.validate()?;
    observation.end.validate()?;
    if observation.weight.is_finite() && observation.weight > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidData(format!(
            "observation weight must be finite and positive, got {}",
            observation.weight
        )))
    }
}

fn intern_node(
    graph: &mut DiGraph<RoadNode, RoadEdge>,
    nodes: &mut HashMap<NodeKey, NodeIndex>,
    coord: Coordinate,
    precision: u32,
) -> NodeIndex {
    let key = NodeKey::snap(coord, precision);
    *nodes.entry(key).or_insert_with(|| {
        graph.add_node(RoadNode {
            key,
            geometry: coord.point(),
        })
    })
}

fn fold_edge(edge: &mut RoadEdge, observation: &TrafficObservation, policy: WeightFold) {
    match policy {
        WeightFold::MostRecent => {
            // >= resolves equal timestamps to the later-inserted sample
            if observation.observed_at >= edge.observed_at {
                edge.cost = observation.weight;
                edge.observed_at = observation.observed_at;
            }
            edge.samples += 1;
        }
        WeightFold::Average => {
            let folded = f64::from(edge.samples);
            edge.cost = (edge.cost * folded + observation.weight) / (folded + 1.0);
            edge.observed_at = edge.observed_at.max(observation.observed_at);
            edge.samples += 1;
        }
    }
}
