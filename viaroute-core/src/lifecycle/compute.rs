use std::panic::{AssertUnwindSafe, catch_unwind};

use log::{debug, warn};
use rayon::prelude::*;

use super::request::RouteRequest;
use crate::model::Coordinate;
use crate::routing::{OptimizerParams, RoutePath, optimized_path, shortest_path};
use crate::{Error, RoadGraph};

/// Creates a pending route request for a start/end coordinate pair.
///
/// # Errors
///
/// Returns [`Error::InvalidCoordinate`] for out-of-range input; no
/// request value is created in that case.
pub fn submit(start: Coordinate, end: Coordinate) -> Result<RouteRequest, Error> {
    start.validate()?;
    end.validate()?;
    Ok(RouteRequest::new(start, end))
}

/// Runs one route computation to its terminal state.
///
/// Snaps both endpoints, finds the shortest and the traffic-optimized
/// path, stitches the requested coordinates onto the path ends and
/// transitions the request to calculated. Every failure along the way,
/// panics included, terminates in the error state with a readable
/// reason; a computed request never remains pending.
///
/// Already-terminal requests are returned unchanged; recomputation
/// requires a new request.
///
/// The call is synchronous and CPU-bound. Callers needing cancellation
/// should wrap it in their own timeout.
pub fn compute(request: RouteRequest, graph: &RoadGraph) -> RouteRequest {
    if request.is_terminal() {
        warn!(
            "Route request {} is already {:?}; recomputation requires a new request",
            request.id(),
            request.status()
        );
        return request;
    }

    let outcome = catch_unwind(AssertUnwindSafe(|| compute_paths(&request, graph)));
    match outcome {
        Ok(Ok((shortest, optimized))) => {
            debug!(
                "Route request {} calculated: {} and {} points",
                request.id(),
                shortest.len(),
                optimized.len()
            );
            request.into_calculated(shortest, optimized)
        }
        Ok(Err(err)) => {
            debug!("Route request {} failed: {err}", request.id());
            request.into_error(err.to_string())
        }
        Err(panic) => {
            let message = panic
                .downcast_ref::<&str>()
                .map(ToString::to_string)
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "computation panicked".to_string());
            warn!("Route request {} panicked: {message}", request.id());
            request.into_error(Error::Unknown(message).to_string())
        }
    }
}

/// Computes a batch of independent requests in parallel against one
/// shared graph snapshot. Output order matches input order.
pub fn compute_batch(requests: Vec<RouteRequest>, graph: &RoadGraph) -> Vec<RouteRequest> {
    requests
        .into_par_iter()
        .map(|request| compute(request, graph))
        .collect()
}

fn compute_paths(
    request: &RouteRequest,
    graph: &RoadGraph,
) -> Result<(RoutePath, RoutePath), Error> {
    let start_node = graph.nearest_node(request.start().point())?;
    let end_node = graph.nearest_node(request.end().point())?;

    let mut shortest = shortest_path(graph, start_node, end_node)?;
    let mut optimized = optimized_path(graph, start_node, end_node, &OptimizerParams::default())?;

    shortest.stitch_endpoints(request.start(), request.end());
    optimized.stitch_endpoints(request.start(), request.end());

    Ok((shortest, optimized))
}
