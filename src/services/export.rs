//! JSON export/import of a session's rooftop measurements.
//!
//! Numbers are written with shortest round-trip formatting and parsed with
//! `float_roundtrip`, so a document read back yields bit-identical doubles.
//! Timestamps are RFC 3339 strings.

use crate::error::Result;
use crate::models::measurement::MeasurementSet;

pub fn export_measurements(set: &MeasurementSet) -> Result<String> {
    tracing::debug!(measurements = set.len(), "exporting measurements");
    Ok(serde_json::to_string_pretty(set)?)
}

pub fn import_measurements(document: &str) -> Result<MeasurementSet> {
    Ok(serde_json::from_str(document)?)
}
