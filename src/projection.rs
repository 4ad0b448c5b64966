use serde::{Deserialize, Serialize};

use crate::route::Position;

/// Meters per degree of latitude under the local flat-earth approximation.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Reference point of the telemetry feed's planar frame. Offsets are mapped
/// to lat/lng with a local equirectangular approximation, which is only valid
/// for offsets small relative to Earth's radius (tens of kilometers). No
/// curvature correction, no datum handling.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectionOrigin {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for ProjectionOrigin {
    fn default() -> Self {
        ProjectionOrigin {
            latitude: 32.986103,
            longitude: -96.751180,
        }
    }
}

impl ProjectionOrigin {
    pub fn position(&self) -> Position {
        Position {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Maps a planar offset `(x, y)` in meters to lat/lng. Pure; non-finite
    /// input propagates to the output.
    pub fn project(&self, x: f64, y: f64) -> Position {
        let latitude = self.latitude + y / METERS_PER_DEGREE;
        let longitude =
            self.longitude + x / (METERS_PER_DEGREE * self.latitude.to_radians().cos());
        Position {
            latitude,
            longitude,
        }
    }
}
