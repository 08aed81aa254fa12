use geo::Point;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A geographic coordinate in degrees.
///
/// Latitude must lie in [-90, 90] and longitude in [-180, 180];
/// [`Coordinate::new`] rejects anything else (NaN included).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a range-validated coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCoordinate`] when either component is out
    /// of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        let coord = Self {
            latitude,
            longitude,
        };
        coord.validate()?;
        Ok(coord)
    }

    /// Re-checks the range invariant on an already constructed value.
    ///
    /// Useful at trust boundaries where a `Coordinate` may have been
    /// deserialized or built from raw fields.
    pub fn validate(&self) -> Result<(), Error> {
        if (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude) {
            Ok(())
        } else {
            Err(Error::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Planar view of the coordinate (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    pub(crate) fn from_point(point: Point<f64>) -> Self {
        Self {
            latitude: point.y(),
            longitude: point.x(),
        }
    }
}
