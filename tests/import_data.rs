pub mod test_utils;

use assert_float_eq::assert_float_absolute_eq;
use routeviz_core::config::TelemetrySchema;
use routeviz_core::import_data;
use routeviz_core::projection::ProjectionOrigin;
use tempdir::TempDir;

#[test]
fn load_sample_csv() {
    let route = test_utils::load_sample_route();

    // 13 data rows: one non-numeric planar x, one NaN velocity, one short row
    assert_eq!(route.len(), 10);
    assert_eq!(route.max_speed(), 29.0);

    let origin = ProjectionOrigin::default();
    let first = route.points()[0];
    assert_eq!(first.position.latitude, origin.latitude);
    assert_eq!(first.position.longitude, origin.longitude);
    assert_eq!(first.speed, 0.0);
}

#[test]
fn rejected_rows_are_dropped_not_interpolated() {
    let route = test_utils::load_sample_route();
    let speeds: Vec<f64> = route.points().iter().map(|p| p.speed).collect();
    // neighbors of the rejected rows are untouched
    assert_eq!(speeds, vec![0., 5., 10., 13., 17., 29., 25., 15., 20., 5.]);
}

#[test]
fn missing_columns_fail_the_load() {
    let csv = "Car Coord X,Chassis Velocity X,Chassis Velocity Y\n1,2,3\n";
    let result = import_data::read_telemetry_csv(
        csv.as_bytes(),
        &ProjectionOrigin::default(),
        &TelemetrySchema::default(),
    );
    let message = format!("{}", result.unwrap_err());
    assert!(message.contains("Car Coord Y"));
    assert!(message.contains("Chassis Velocity Z"));
    assert!(!message.contains("Car Coord X,"));
}

#[test]
fn custom_schema() {
    let schema = TelemetrySchema {
        planar_x: "x".to_string(),
        planar_y: "y".to_string(),
        velocity_x: "vx".to_string(),
        velocity_y: "vy".to_string(),
        velocity_z: "vz".to_string(),
    };
    let csv = "x,y,vx,vy,vz\n0,111000,3,4,0\n";
    let route =
        import_data::read_telemetry_csv(csv.as_bytes(), &ProjectionOrigin::default(), &schema)
            .unwrap();

    assert_eq!(route.len(), 1);
    let point = route.points()[0];
    assert_float_absolute_eq!(point.position.latitude, 33.986103, 1e-9);
    assert_float_absolute_eq!(point.position.longitude, -96.751180, 1e-9);
    assert_eq!(point.speed, 5.0);
}

#[test]
fn all_rows_invalid_gives_an_empty_route() {
    let csv = "Car Coord X,Car Coord Y,Chassis Velocity X,Chassis Velocity Y,Chassis Velocity Z\n\
               a,b,c,d,e\nf,g,h,i,j\n";
    let route = import_data::read_telemetry_csv(
        csv.as_bytes(),
        &ProjectionOrigin::default(),
        &TelemetrySchema::default(),
    )
    .unwrap();
    assert!(route.is_empty());
    assert_eq!(route.max_speed(), 0.0);
}

#[test]
fn load_from_path() {
    let dir = TempDir::new("routeviz_import").unwrap();
    let path = dir.path().join("feed.csv");
    std::fs::write(
        &path,
        "Car Coord X,Car Coord Y,Chassis Velocity X,Chassis Velocity Y,Chassis Velocity Z\n\
         0,0,1,0,0\n10,10,2,0,0\n",
    )
    .unwrap();

    let route = import_data::load_telemetry_csv(
        &path,
        &ProjectionOrigin::default(),
        &TelemetrySchema::default(),
    )
    .unwrap();
    assert_eq!(route.len(), 2);
    assert_eq!(route.max_speed(), 2.0);
}
