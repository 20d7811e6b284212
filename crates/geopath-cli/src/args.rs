//! Value parsers and defaults for command-line arguments.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use geopath_lib::{Obstacle, Point};

/// File name of the path store inside the data directory.
pub const STORE_FILENAME: &str = "paths.json";

/// Parse `LAT,LNG` into a [`Point`].
pub fn parse_point(value: &str) -> Result<Point, String> {
    value.parse()
}

/// Parse `LAT,LNG,RADIUS_KM` into an [`Obstacle`].
pub fn parse_obstacle(value: &str) -> Result<Obstacle, String> {
    let (center, radius) = value
        .rsplit_once(',')
        .ok_or_else(|| format!("expected LAT,LNG,RADIUS_KM but got '{value}'"))?;
    let center = parse_point(center)?;
    let radius_km = radius
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid radius '{}': {e}", radius.trim()))?;
    Ok(Obstacle::new(center, radius_km))
}

/// Default location of the path store in the platform data directory.
pub fn default_store_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("org", "geopath", "geopath")
        .ok_or_else(|| anyhow!("could not determine a data directory; pass --store"))?;
    Ok(dirs.data_dir().join(STORE_FILENAME))
}
