#[macro_use]
extern crate log;
#[macro_use]
extern crate anyhow;

pub mod config;
pub mod import_data;
pub mod lod;
pub mod logs;
pub mod projection;
pub mod renderer;
pub mod route;
pub mod segment;
pub mod smoothing;
pub mod telemetry;
