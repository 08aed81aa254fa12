use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::model::Coordinate;

/// One directed road-segment sample from the traffic feed.
///
/// `weight` is a positive traversal cost; lower means faster. The same
/// segment may be observed many times, forming a time series the graph
/// builder folds per [`crate::WeightFold`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrafficObservation {
    pub start: Coordinate,
    pub end: Coordinate,
    pub weight: f64,
    pub observed_at: DateTime<Utc>,
}

/// Traffic-data collaborator the graph is (re)built from.
pub trait ObservationSource {
    /// Returns the current set of observations.
    ///
    /// # Errors
    ///
    /// Implementations surface feed failures as [`Error::InvalidData`].
    fn list_observations(&self) -> Result<Vec<TrafficObservation>, Error>;
}
