use serde::{Deserialize, Serialize};

use crate::{projection::ProjectionOrigin, telemetry::RawSample};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoutePoint {
    pub position: Position,
    pub speed: f64,
}

/// The canonical in-memory route for one dataset load: projected points in
/// sample order plus the max speed over the full, undecimated point list.
/// Built once per load and read-only afterwards; every zoom-triggered
/// rederivation reads from the same instance.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    points: Vec<RoutePoint>,
    max_speed: f64,
}

impl Route {
    pub fn new(points: Vec<RoutePoint>) -> Self {
        // fixed denominator for color scaling, never recomputed per zoom
        let max_speed = points.iter().fold(0.0_f64, |max, p| max.max(p.speed));
        Route { points, max_speed }
    }

    pub fn empty() -> Self {
        Route::new(Vec::new())
    }

    pub fn from_samples(
        samples: impl IntoIterator<Item = RawSample>,
        origin: &ProjectionOrigin,
    ) -> Self {
        let points = samples
            .into_iter()
            .map(|sample| RoutePoint {
                position: origin.project(sample.planar_x, sample.planar_y),
                speed: sample.scalar_speed(),
            })
            .collect();
        Route::new(points)
    }

    pub fn points(&self) -> &[RoutePoint] {
        &self.points
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point of the route, the natural initial map center.
    pub fn first_position(&self) -> Option<Position> {
        self.points.first().map(|p| p.position)
    }
}
