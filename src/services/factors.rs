/// ============================================================
///  Derating factor tables & location profiles
///
///  Three independent lookup tables turn categorical site inputs into
///  multipliers on a location's base peak sun hours:
///   - shading      → strict, unknown keys are an error
///   - orientation  → strict, unknown keys are an error
///   - tilt         → lenient, nearest 5° bucket, fallback 0.98
/// ============================================================

use crate::error::{EstimatorError, Result};
use crate::models::site::{Orientation, Shading};

// ─── Tilt table ──────────────────────────────────────────────
/// Multiplier used for any tilt whose bucket is not tabulated (e.g. > 37.5°).
pub const TILT_FALLBACK_FACTOR: f64 = 0.98;
const TILT_BUCKET_DEG: f64 = 5.0;

/// (bucket in degrees, multiplier); 20° is the optimum for the reference band.
const TILT_FACTORS: [(i32, f64); 8] = [
    (0, 0.85), // flat roof
    (5, 0.90),
    (10, 0.95),
    (15, 0.98),
    (20, 1.00),
    (25, 0.98),
    (30, 0.95),
    (35, 0.90),
];

pub fn shading_factor(shading: Shading) -> f64 {
    match shading {
        Shading::None => 1.00,
        Shading::Minimal => 0.95,
        Shading::Moderate => 0.85,
        Shading::Heavy => 0.70,
    }
}

pub fn orientation_factor(orientation: Orientation) -> f64 {
    match orientation {
        Orientation::South => 1.00,
        Orientation::SouthEast | Orientation::SouthWest => 0.98,
        Orientation::East | Orientation::West => 0.95,
        Orientation::NorthEast | Orientation::NorthWest => 0.90,
        Orientation::North => 0.85,
    }
}

/// Rounds `degrees` to the nearest 5° bucket and looks it up.
///
/// Buckets outside 0..=35 (and NaN) resolve to [`TILT_FALLBACK_FACTOR`].
pub fn resolve_tilt(degrees: f64) -> f64 {
    let bucket = (degrees / TILT_BUCKET_DEG).round() * TILT_BUCKET_DEG;
    TILT_FACTORS
        .iter()
        .find(|(deg, _)| *deg as f64 == bucket)
        .map(|(_, factor)| *factor)
        .unwrap_or(TILT_FALLBACK_FACTOR)
}

pub fn resolve_shading(key: &str) -> Result<f64> {
    key.parse::<Shading>().map(shading_factor)
}

pub fn resolve_orientation(key: &str) -> Result<f64> {
    key.parse::<Orientation>().map(orientation_factor)
}

// ─── Location profiles ───────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Season {
    pub name: &'static str,
    pub months: &'static [u32],
    pub peak_sun_hours: f64,
}

/// Solar resource data for one supported location (NREL-based averages).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationProfile {
    pub key: &'static str,
    pub name: &'static str,
    /// Annual average peak sun hours (h/day)
    pub peak_sun_hours: f64,
    pub seasons: &'static [Season],
    /// Reference tariff (currency/kWh)
    pub electricity_rate: f64,
    pub latitude: f64,
    pub longitude: f64,
}

pub const ILOCOS_NORTE: LocationProfile = LocationProfile {
    key: "ilocos_norte",
    name: "Ilocos Norte",
    peak_sun_hours: 4.75,
    seasons: &[
        Season { name: "summer", months: &[3, 4, 5], peak_sun_hours: 5.2 },
        Season { name: "rainy", months: &[6, 7, 8, 9, 10], peak_sun_hours: 4.3 },
        Season { name: "cool", months: &[11, 12, 1, 2], peak_sun_hours: 4.1 },
    ],
    electricity_rate: 12.5,
    latitude: 18.5046,
    longitude: 120.5906,
};

const LOCATIONS: &[LocationProfile] = &[ILOCOS_NORTE];

pub fn resolve_location(key: &str) -> Result<&'static LocationProfile> {
    LOCATIONS
        .iter()
        .find(|l| l.key == key)
        .ok_or_else(|| EstimatorError::category("location", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilt_buckets_round_to_nearest() {
        assert_eq!(resolve_tilt(0.0), 0.85);
        assert_eq!(resolve_tilt(2.4), 0.85);
        assert_eq!(resolve_tilt(2.5), 0.90);
        assert_eq!(resolve_tilt(15.0), 0.98);
        assert_eq!(resolve_tilt(18.0), 1.00);
        assert_eq!(resolve_tilt(36.0), 0.90);
    }

    #[test]
    fn test_tilt_fallback_outside_table() {
        assert_eq!(resolve_tilt(37.5), TILT_FALLBACK_FACTOR);
        assert_eq!(resolve_tilt(60.0), TILT_FALLBACK_FACTOR);
        assert_eq!(resolve_tilt(90.0), TILT_FALLBACK_FACTOR);
        assert_eq!(resolve_tilt(-10.0), TILT_FALLBACK_FACTOR);
        assert_eq!(resolve_tilt(f64::NAN), TILT_FALLBACK_FACTOR);
    }

    #[test]
    fn test_table_ranges() {
        for (_, f) in TILT_FACTORS {
            assert!((0.85..=1.0).contains(&f));
        }
        for o in Orientation::ALL {
            let f = orientation_factor(o);
            if o == Orientation::South {
                assert_eq!(f, 1.0);
            } else {
                assert!((0.85..=0.98).contains(&f), "{} -> {}", o, f);
            }
        }
    }

    #[test]
    fn test_strict_tables_reject_unknown_keys() {
        assert_eq!(resolve_shading("moderate").unwrap(), 0.85);
        assert_eq!(resolve_orientation("west").unwrap(), 0.95);
        assert!(matches!(
            resolve_shading("some"),
            Err(EstimatorError::InvalidCategory { kind: "shading", .. })
        ));
        assert!(matches!(
            resolve_orientation("South"),
            Err(EstimatorError::InvalidCategory { kind: "orientation", .. })
        ));
    }

    #[test]
    fn test_location_lookup() {
        let loc = resolve_location("ilocos_norte").unwrap();
        assert_eq!(loc.peak_sun_hours, 4.75);
        assert_eq!(loc.seasons.len(), 3);
        let months: usize = loc.seasons.iter().map(|s| s.months.len()).sum();
        assert_eq!(months, 12);
        assert!(matches!(
            resolve_location("manila"),
            Err(EstimatorError::InvalidCategory { kind: "location", .. })
        ));
    }
}
