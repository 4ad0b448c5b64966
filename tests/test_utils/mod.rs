use routeviz_core::config::TelemetrySchema;
use routeviz_core::import_data;
use routeviz_core::projection::ProjectionOrigin;
use routeviz_core::route::{Position, Route, RoutePoint};

pub fn load_sample_route() -> Route {
    import_data::load_telemetry_csv(
        "./tests/data/sample_telemetry.csv",
        &ProjectionOrigin::default(),
        &TelemetrySchema::default(),
    )
    .unwrap()
}

/// Route with the given speeds, points spaced evenly northwards.
pub fn route_of_speeds(speeds: &[f64]) -> Route {
    Route::new(points_of_speeds(speeds))
}

pub fn points_of_speeds(speeds: &[f64]) -> Vec<RoutePoint> {
    speeds
        .iter()
        .enumerate()
        .map(|(i, &speed)| RoutePoint {
            position: Position {
                latitude: 33.0 + i as f64 * 0.0001,
                longitude: -96.75,
            },
            speed,
        })
        .collect()
}
