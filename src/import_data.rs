use std::{fs::File, io::Read, path::Path};

use anyhow::Result;

use crate::{
    config::TelemetrySchema, projection::ProjectionOrigin, route::Route, telemetry::RawSample,
};

struct ColumnIndices {
    planar_x: usize,
    planar_y: usize,
    velocity_x: usize,
    velocity_y: usize,
    velocity_z: usize,
}

/// Resolves the five schema columns against the header row. Any missing
/// column fails the whole load; a partial route must never be built from a
/// feed with the wrong shape.
fn resolve_columns(headers: &csv::StringRecord, schema: &TelemetrySchema) -> Result<ColumnIndices> {
    let missing: Vec<&str> = schema
        .column_names()
        .into_iter()
        .filter(|name| !headers.iter().any(|h| h == *name))
        .collect();
    if !missing.is_empty() {
        bail!(
            "telemetry feed is missing required columns: {}",
            missing.join(", ")
        );
    }

    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .expect("column checked above")
    };
    Ok(ColumnIndices {
        planar_x: find(&schema.planar_x),
        planar_y: find(&schema.planar_y),
        velocity_x: find(&schema.velocity_x),
        velocity_y: find(&schema.velocity_y),
        velocity_z: find(&schema.velocity_z),
    })
}

fn parse_sample(record: &csv::StringRecord, columns: &ColumnIndices) -> Option<RawSample> {
    let value = |idx: usize| record.get(idx).and_then(|field| field.parse::<f64>().ok());
    let sample = RawSample {
        planar_x: value(columns.planar_x)?,
        planar_y: value(columns.planar_y)?,
        velocity_x: value(columns.velocity_x)?,
        velocity_y: value(columns.velocity_y)?,
        velocity_z: value(columns.velocity_z)?,
    };
    // "NaN"/"inf" parse as floats but are not valid telemetry
    if sample.is_finite() {
        Some(sample)
    } else {
        None
    }
}

/// Reads a telemetry CSV into a [`Route`]. Rows where any of the five fields
/// is absent or does not parse as a finite number are dropped, not
/// interpolated; the total is reported with a single warning. Runs once per
/// dataset load.
pub fn read_telemetry_csv(
    reader: impl Read,
    origin: &ProjectionOrigin,
    schema: &TelemetrySchema,
) -> Result<Route> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = resolve_columns(&csv_reader.headers()?.clone(), schema)?;

    let mut samples = Vec::new();
    let mut rejected: usize = 0;
    for record in csv_reader.records() {
        let record = record?;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }
        match parse_sample(&record, &columns) {
            Some(sample) => samples.push(sample),
            None => rejected += 1,
        }
    }

    if rejected > 0 {
        warn!("dropped {rejected} telemetry rows with missing or non-finite fields");
    }

    Ok(Route::from_samples(samples, origin))
}

pub fn load_telemetry_csv(
    file_path: impl AsRef<Path>,
    origin: &ProjectionOrigin,
    schema: &TelemetrySchema,
) -> Result<Route> {
    read_telemetry_csv(File::open(file_path)?, origin, schema)
}
