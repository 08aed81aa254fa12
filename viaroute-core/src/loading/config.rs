use serde::{Deserialize, Serialize};

use crate::DEFAULT_SNAP_PRECISION;

/// How repeated observations of the same directed segment fold into a
/// single edge cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightFold {
    /// The observation with the newest `observed_at` defines the cost;
    /// equal timestamps resolve to the later-inserted observation.
    #[default]
    MostRecent,
    /// Arithmetic mean over all observations of the segment.
    Average,
}

/// Graph construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Decimal places kept when snapping endpoints to node keys.
    pub snap_precision: u32,
    /// Folding policy for repeated segments.
    pub weight_fold: WeightFold,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            snap_precision: DEFAULT_SNAP_PRECISION,
            weight_fold: WeightFold::MostRecent,
        }
    }
}
