//! GeoJSON export of computed routes for map front-ends

use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry};
use serde_json::{Map, json};

use super::path::RoutePath;
use crate::Error;
use crate::lifecycle::{RequestState, RouteRequest};

/// Renders a calculated request as a `FeatureCollection` with one
/// LineString feature per path (`kind` is `"shortest"` or
/// `"optimized"`).
///
/// # Errors
///
/// Returns [`Error::InvalidData`] when the request has no computed
/// paths.
pub fn routes_to_geojson(request: &RouteRequest) -> Result<FeatureCollection, Error> {
    let RequestState::Calculated {
        shortest_path,
        optimized_path,
    } = request.state()
    else {
        return Err(Error::InvalidData(format!(
            "route request {} has no computed paths to export",
            request.id()
        )));
    };

    Ok(FeatureCollection {
        bbox: None,
        features: vec![
            path_to_feature(shortest_path, "shortest", request),
            path_to_feature(optimized_path, "optimized", request),
        ],
        foreign_members: None,
    })
}

fn path_to_feature(path: &RoutePath, kind: &str, request: &RouteRequest) -> Feature {
    let line: LineString<f64> = path
        .coords()
        .iter()
        .map(|coord| Coord {
            x: coord.longitude,
            y: coord.latitude,
        })
        .collect();

    let mut properties = Map::new();
    properties.insert("kind".to_string(), json!(kind));
    properties.insert("cost".to_string(), json!(path.cost()));
    properties.insert("request_id".to_string(), json!(request.id()));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new((&line).into())),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
