use serde::Deserialize;

use crate::error::Result;
use crate::models::site::{Coordinate, SiteParameters};

/// One estimator run, read from a JSON file.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    /// Partial site parameters, merged over the defaults
    pub site: Option<SiteParameters>,
    /// Drawn rooftop outlines to measure
    pub rooftops: Vec<Vec<Coordinate>>,
    /// Latitude for the longitude correction; the location's own by default
    pub reference_latitude: Option<f64>,
    /// Where to write the measurement export, if anywhere
    pub export_path: Option<String>,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
