use std::{fs::File, io::BufReader, path::Path};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::projection::ProjectionOrigin;

pub const DEFAULT_ZOOM: i32 = 15;

/// Names of the five required columns in the telemetry feed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySchema {
    pub planar_x: String,
    pub planar_y: String,
    pub velocity_x: String,
    pub velocity_y: String,
    pub velocity_z: String,
}

impl Default for TelemetrySchema {
    fn default() -> Self {
        TelemetrySchema {
            planar_x: "Car Coord X".to_string(),
            planar_y: "Car Coord Y".to_string(),
            velocity_x: "Chassis Velocity X".to_string(),
            velocity_y: "Chassis Velocity Y".to_string(),
            velocity_z: "Chassis Velocity Z".to_string(),
        }
    }
}

impl TelemetrySchema {
    pub fn column_names(&self) -> [&str; 5] {
        [
            &self.planar_x,
            &self.planar_y,
            &self.velocity_x,
            &self.velocity_y,
            &self.velocity_z,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default)]
    pub origin: ProjectionOrigin,
    #[serde(default = "default_zoom")]
    pub default_zoom: i32,
    #[serde(default)]
    pub schema: TelemetrySchema,
}

fn default_zoom() -> i32 {
    DEFAULT_ZOOM
}

impl Default for CoreConfig {
    fn default() -> Self {
        CoreConfig {
            origin: ProjectionOrigin::default(),
            default_zoom: DEFAULT_ZOOM,
            schema: TelemetrySchema::default(),
        }
    }
}

impl CoreConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<CoreConfig> {
        let config = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        Ok(config)
    }
}
