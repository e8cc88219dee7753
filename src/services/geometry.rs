/// ============================================================
///  Rooftop area from a drawn boundary
///
///  Planar bounding-box proxy, not a polygon (Shoelace) area:
///   1. min/max latitude & longitude of the points
///   2. latitude span  × 111 000 m
///   3. longitude span × 111 000 m × cos(reference latitude)
///   4. area = product of the two spans
///  Diagonal or L-shaped outlines are overestimated.
/// ============================================================

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{EstimatorError, Result};
use crate::models::measurement::RooftopMeasurement;
use crate::models::site::Coordinate;
use crate::services::factors::ILOCOS_NORTE;

pub const METERS_PER_DEGREE: f64 = 111_000.0;
/// Fraction of reference irradiance converted, as used for rooftop previews.
pub const PANEL_EFFICIENCY: f64 = 0.75;
/// Reference irradiance (W/m²)
pub const REFERENCE_IRRADIANCE: f64 = 1000.0;

/// Approximate footprint (m²) of `points` around `reference_latitude`.
pub fn bounding_box_area(points: &[Coordinate], reference_latitude: f64) -> Result<f64> {
    if points.len() < 2 {
        return Err(EstimatorError::InsufficientPoints { got: points.len() });
    }
    if !(-90.0..=90.0).contains(&reference_latitude) {
        return Err(EstimatorError::invalid(
            "reference_latitude",
            reference_latitude,
            "out of range [-90, 90]",
        ));
    }
    for p in points {
        p.validate()?;
    }

    let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
    for p in points {
        min_lat = min_lat.min(p.lat);
        max_lat = max_lat.max(p.lat);
        min_lng = min_lng.min(p.lng);
        max_lng = max_lng.max(p.lng);
    }

    let lat_span_m = (max_lat - min_lat).abs() * METERS_PER_DEGREE;
    let lng_span_m = (max_lng - min_lng).abs()
        * METERS_PER_DEGREE
        * reference_latitude.to_radians().cos().abs();

    tracing::trace!(lat_span_m, lng_span_m, "bounding box spans");
    Ok(lat_span_m * lng_span_m)
}

/// Estimated output (W) = area × peak sun hours × efficiency × 1000 W/m².
pub fn estimated_output_w(area_m2: f64, peak_sun_hours: f64) -> f64 {
    area_m2 * peak_sun_hours * PANEL_EFFICIENCY * REFERENCE_IRRADIANCE
}

/// Measures a drawn boundary at an explicit reference latitude and timestamp.
pub fn measure_rooftop_with(
    points: &[Coordinate],
    reference_latitude: f64,
    peak_sun_hours: f64,
    created_at: DateTime<Utc>,
) -> Result<RooftopMeasurement> {
    let area_m2 = bounding_box_area(points, reference_latitude)?;
    let measurement = RooftopMeasurement {
        id: Uuid::new_v4(),
        area_m2,
        peak_sun_hours,
        estimated_output_w: estimated_output_w(area_m2, peak_sun_hours),
        coordinates: points.to_vec(),
        created_at,
    };
    tracing::debug!(
        id = %measurement.id,
        area_m2 = measurement.area_m2,
        estimated_output_w = measurement.estimated_output_w,
        "rooftop measured"
    );
    Ok(measurement)
}

/// Measures a boundary in the default location, stamped with `now`.
pub fn measure_rooftop_at(points: &[Coordinate], now: DateTime<Utc>) -> Result<RooftopMeasurement> {
    measure_rooftop_with(points, ILOCOS_NORTE.latitude, ILOCOS_NORTE.peak_sun_hours, now)
}

/// Same as [`measure_rooftop_at`], stamped with the current UTC time.
pub fn measure_rooftop(points: &[Coordinate]) -> Result<RooftopMeasurement> {
    measure_rooftop_at(points, Utc::now())
}
