use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::site::Coordinate;

/// Area and output estimate for one drawn rooftop boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RooftopMeasurement {
    pub id: Uuid,
    /// Planar bounding-box area (m²)
    pub area_m2: f64,
    /// Peak sun hours assumed for the estimate (h/day)
    pub peak_sun_hours: f64,
    /// Estimated output (W), already scaled by `peak_sun_hours`
    pub estimated_output_w: f64,
    pub coordinates: Vec<Coordinate>,
    pub created_at: DateTime<Utc>,
}

impl RooftopMeasurement {
    /// Yearly energy in kWh.
    ///
    /// `estimated_output_w` already carries the daily sun-hours term, so it is
    /// scaled by days only.
    pub fn annual_energy_kwh(&self) -> f64 {
        self.estimated_output_w * 365.0 / 1000.0
    }
}

/// A session's measurements plus their running totals.
///
/// The session owns this value. Every operation consumes the set and returns
/// a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSet {
    pub measurements: Vec<RooftopMeasurement>,
    pub total_area_m2: f64,
    pub total_output_w: f64,
}

impl MeasurementSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_measurement(mut self, m: RooftopMeasurement) -> Self {
        self.total_area_m2 += m.area_m2;
        self.total_output_w += m.estimated_output_w;
        self.measurements.push(m);
        self
    }

    /// Drops the measurement with `id`, recomputing totals from what remains.
    /// An unknown id leaves the set untouched.
    pub fn without(mut self, id: Uuid) -> Self {
        let before = self.measurements.len();
        self.measurements.retain(|m| m.id != id);
        if self.measurements.len() == before {
            return self;
        }
        self.total_area_m2 = self.measurements.iter().map(|m| m.area_m2).sum();
        self.total_output_w = self.measurements.iter().map(|m| m.estimated_output_w).sum();
        self
    }

    pub fn cleared(self) -> Self {
        Self::default()
    }

    pub fn get(&self, id: Uuid) -> Option<&RooftopMeasurement> {
        self.measurements.iter().find(|m| m.id == id)
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(area: f64, output: f64) -> RooftopMeasurement {
        RooftopMeasurement {
            id: Uuid::new_v4(),
            area_m2: area,
            peak_sun_hours: 4.75,
            estimated_output_w: output,
            coordinates: vec![Coordinate { lat: 18.5, lng: 120.5 }],
            created_at: Utc.with_ymd_and_hms(2026, 3, 21, 4, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_totals_follow_adds_and_removals() {
        let a = sample(10.0, 100.0);
        let b = sample(20.0, 250.0);
        let b_id = b.id;

        let set = MeasurementSet::new().with_measurement(a.clone()).with_measurement(b);
        assert_eq!(set.len(), 2);
        assert_eq!(set.total_area_m2, 30.0);
        assert_eq!(set.total_output_w, 350.0);

        let set = set.without(b_id);
        assert_eq!(set.len(), 1);
        assert_eq!(set.total_area_m2, 10.0);
        assert_eq!(set.total_output_w, 100.0);
        assert_eq!(set.get(a.id), Some(&a));
        assert!(set.get(b_id).is_none());
    }

    #[test]
    fn test_unknown_id_is_noop() {
        let set = MeasurementSet::new().with_measurement(sample(5.0, 50.0));
        let same = set.clone().without(Uuid::new_v4());
        assert_eq!(same, set);
    }

    #[test]
    fn test_cleared() {
        let set = MeasurementSet::new().with_measurement(sample(5.0, 50.0)).cleared();
        assert!(set.is_empty());
        assert_eq!(set.total_area_m2, 0.0);
        assert_eq!(set.total_output_w, 0.0);
    }

    #[test]
    fn test_annual_energy_counts_sun_hours_once() {
        let m = sample(10.0, 35_625.0);
        assert!((m.annual_energy_kwh() - 13_003.125).abs() < 1e-9);
    }
}
