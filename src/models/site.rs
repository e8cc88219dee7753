use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EstimatorError, Result};

// ─── Categorical site inputs ─────────────────────────────────────────────────

/// Shading class of the roof surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Shading {
    None,
    Minimal,
    Moderate,
    Heavy,
}

impl Shading {
    /// Ordered from least to most severe.
    pub const ALL: [Shading; 4] = [
        Shading::None,
        Shading::Minimal,
        Shading::Moderate,
        Shading::Heavy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shading::None => "none",
            Shading::Minimal => "minimal",
            Shading::Moderate => "moderate",
            Shading::Heavy => "heavy",
        }
    }
}

impl FromStr for Shading {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self> {
        Shading::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| EstimatorError::category("shading", s))
    }
}

/// Compass octant the roof plane faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Orientation {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Orientation {
    pub const ALL: [Orientation; 8] = [
        Orientation::North,
        Orientation::NorthEast,
        Orientation::East,
        Orientation::SouthEast,
        Orientation::South,
        Orientation::SouthWest,
        Orientation::West,
        Orientation::NorthWest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::North => "north",
            Orientation::NorthEast => "northeast",
            Orientation::East => "east",
            Orientation::SouthEast => "southeast",
            Orientation::South => "south",
            Orientation::SouthWest => "southwest",
            Orientation::West => "west",
            Orientation::NorthWest => "northwest",
        }
    }
}

impl FromStr for Orientation {
    type Err = EstimatorError;

    fn from_str(s: &str) -> Result<Self> {
        Orientation::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| EstimatorError::category("orientation", s))
    }
}

macro_rules! string_category {
    ($ty:ty) => {
        impl TryFrom<String> for $ty {
            type Error = EstimatorError;
            fn try_from(s: String) -> Result<Self> {
                s.parse()
            }
        }

        impl From<$ty> for String {
            fn from(v: $ty) -> String {
                v.as_str().to_string()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

string_category!(Shading);
string_category!(Orientation);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPreference {
    /// Paid upfront.
    #[default]
    Capex,
    /// Amortised loan over `financing_years`.
    Financing,
}

// ─── Site parameters ─────────────────────────────────────────────────────────

/// Everything the sizing model needs to know about one site.
///
/// Deserialising a partial JSON object fills the missing fields from
/// [`SiteParameters::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteParameters {
    /// Location profile key, e.g. `ilocos_norte`
    pub location: String,
    /// Available roof area (m²)
    pub roof_area_m2: f64,
    /// Roof pitch from horizontal (deg)
    pub roof_tilt_deg: f64,
    pub roof_orientation: Orientation,
    pub shading: Shading,

    // ── Consumption ──────────────────────────────────────────────────────────
    /// Monthly electricity bill (currency units)
    pub monthly_bill: f64,
    /// Monthly consumption (kWh). Derived from bill ÷ rate when absent.
    pub monthly_consumption_kwh: Option<f64>,
    /// Electricity unit rate (currency/kWh)
    pub electricity_rate: f64,
    /// Expected yearly tariff increase (%)
    pub rate_increase_pct: f64,

    // ── Financial ────────────────────────────────────────────────────────────
    pub system_cost_per_kw: f64,
    pub budget_preference: BudgetPreference,
    /// Annual loan interest (%) when financing
    pub financing_interest_pct: f64,
    pub financing_years: u32,
    pub net_metering: bool,
    /// 30% cost reduction when set
    pub government_incentives: bool,

    // ── Technical ────────────────────────────────────────────────────────────
    /// Panel efficiency (%)
    pub panel_efficiency_pct: f64,
    /// Fraction of theoretical output delivered, (0, 1]
    pub performance_ratio: f64,
    /// Yearly output decline (%)
    pub degradation_rate_pct: f64,
    pub system_lifetime_years: u32,
}

impl Default for SiteParameters {
    fn default() -> Self {
        Self {
            location: "ilocos_norte".to_string(),
            roof_area_m2: 100.0,
            roof_tilt_deg: 15.0,
            roof_orientation: Orientation::South,
            shading: Shading::Minimal,
            monthly_bill: 5000.0,
            monthly_consumption_kwh: None,
            electricity_rate: 12.5,
            rate_increase_pct: 5.0,
            system_cost_per_kw: 65000.0,
            budget_preference: BudgetPreference::Capex,
            financing_interest_pct: 8.0,
            financing_years: 10,
            net_metering: true,
            government_incentives: true,
            panel_efficiency_pct: 20.0,
            performance_ratio: 0.78,
            degradation_rate_pct: 0.5,
            system_lifetime_years: 25,
        }
    }
}

/// Upper bound on the modelled system life (years)
pub const MAX_LIFETIME_YEARS: u32 = 100;
/// Upper bound on a loan term (years)
pub const MAX_FINANCING_YEARS: u32 = 50;

fn non_negative(name: &'static str, value: f64) -> Result<()> {
    // `!(x >= 0)` also rejects NaN
    if !(value >= 0.0) || value.is_infinite() {
        return Err(EstimatorError::invalid(name, value, "must be a finite, non-negative number"));
    }
    Ok(())
}

impl SiteParameters {
    /// Checks every range and non-negativity invariant.
    pub fn validate(&self) -> Result<()> {
        non_negative("roof_area_m2", self.roof_area_m2)?;
        if !(0.0..=90.0).contains(&self.roof_tilt_deg) {
            return Err(EstimatorError::invalid(
                "roof_tilt_deg",
                self.roof_tilt_deg,
                "must be within [0, 90]",
            ));
        }
        non_negative("monthly_bill", self.monthly_bill)?;
        if let Some(kwh) = self.monthly_consumption_kwh {
            non_negative("monthly_consumption_kwh", kwh)?;
        }
        non_negative("electricity_rate", self.electricity_rate)?;
        non_negative("rate_increase_pct", self.rate_increase_pct)?;
        non_negative("system_cost_per_kw", self.system_cost_per_kw)?;
        non_negative("financing_interest_pct", self.financing_interest_pct)?;

        if !(self.panel_efficiency_pct > 0.0 && self.panel_efficiency_pct <= 100.0) {
            return Err(EstimatorError::invalid(
                "panel_efficiency_pct",
                self.panel_efficiency_pct,
                "must be within (0, 100]",
            ));
        }
        if !(self.performance_ratio > 0.0 && self.performance_ratio <= 1.0) {
            return Err(EstimatorError::invalid(
                "performance_ratio",
                self.performance_ratio,
                "must be within (0, 1]",
            ));
        }
        if !(0.0..=100.0).contains(&self.degradation_rate_pct) {
            return Err(EstimatorError::invalid(
                "degradation_rate_pct",
                self.degradation_rate_pct,
                "must be within [0, 100]",
            ));
        }
        if !(1..=MAX_LIFETIME_YEARS).contains(&self.system_lifetime_years) {
            return Err(EstimatorError::invalid(
                "system_lifetime_years",
                self.system_lifetime_years as f64,
                "must be within [1, 100]",
            ));
        }
        if self.budget_preference == BudgetPreference::Financing
            && !(1..=MAX_FINANCING_YEARS).contains(&self.financing_years)
        {
            return Err(EstimatorError::invalid(
                "financing_years",
                self.financing_years as f64,
                "must be within [1, 50] when financing",
            ));
        }
        Ok(())
    }

    /// Monthly consumption in kWh, falling back to bill ÷ rate.
    ///
    /// A zero rate with no explicit consumption means there is nothing to offset.
    pub fn resolved_monthly_consumption_kwh(&self) -> f64 {
        match self.monthly_consumption_kwh {
            Some(kwh) => kwh,
            None if self.electricity_rate > 0.0 => self.monthly_bill / self.electricity_rate,
            None => 0.0,
        }
    }
}

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// One WGS84 point of a drawn rooftop outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Creates a validated coordinate.
    pub fn new(lat: f64, lng: f64) -> Result<Self> {
        let c = Self { lat, lng };
        c.validate()?;
        Ok(c)
    }

    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(EstimatorError::invalid("lat", self.lat, "out of range [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(EstimatorError::invalid("lng", self.lng, "out of range [-180, 180]"));
        }
        Ok(())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let p: SiteParameters =
            serde_json::from_str(r#"{"roof_area_m2": 42.0, "shading": "heavy"}"#).unwrap();
        assert_eq!(p.roof_area_m2, 42.0);
        assert_eq!(p.shading, Shading::Heavy);
        assert_eq!(p.roof_orientation, Orientation::South);
        assert_eq!(p.system_lifetime_years, 25);
        assert_eq!(p.monthly_consumption_kwh, None);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = serde_json::from_str::<SiteParameters>(r#"{"shading": "partial"}"#).unwrap_err();
        assert!(err.to_string().contains("Unknown shading"));

        assert!(matches!(
            "up".parse::<Orientation>(),
            Err(EstimatorError::InvalidCategory { kind: "orientation", .. })
        ));
        assert_eq!("southwest".parse::<Orientation>().unwrap(), Orientation::SouthWest);
    }

    #[test]
    fn test_categories_serialize_lowercase() {
        let json = serde_json::to_string(&Orientation::NorthEast).unwrap();
        assert_eq!(json, "\"northeast\"");
        let json = serde_json::to_string(&BudgetPreference::Financing).unwrap();
        assert_eq!(json, "\"financing\"");
    }

    #[test]
    fn test_validate_ranges() {
        assert!(SiteParameters::default().validate().is_ok());

        let bad = [
            SiteParameters { roof_area_m2: -1.0, ..Default::default() },
            SiteParameters { roof_tilt_deg: 90.5, ..Default::default() },
            SiteParameters { performance_ratio: 0.0, ..Default::default() },
            SiteParameters { performance_ratio: 1.2, ..Default::default() },
            SiteParameters { system_lifetime_years: 0, ..Default::default() },
            SiteParameters { system_lifetime_years: 101, ..Default::default() },
            SiteParameters { system_lifetime_years: 3_000_000_000, ..Default::default() },
            SiteParameters { panel_efficiency_pct: 0.0, ..Default::default() },
            SiteParameters { electricity_rate: f64::NAN, ..Default::default() },
            SiteParameters { monthly_consumption_kwh: Some(-3.0), ..Default::default() },
            SiteParameters {
                budget_preference: BudgetPreference::Financing,
                financing_years: 0,
                ..Default::default()
            },
            SiteParameters {
                budget_preference: BudgetPreference::Financing,
                financing_years: 400_000_000,
                ..Default::default()
            },
        ];
        for p in bad {
            assert!(
                matches!(p.validate(), Err(EstimatorError::InvalidParameters { .. })),
                "expected rejection for {:?}",
                p
            );
        }
    }

    #[test]
    fn test_term_bounds_are_inclusive() {
        let p = SiteParameters { system_lifetime_years: MAX_LIFETIME_YEARS, ..Default::default() };
        assert!(p.validate().is_ok());

        let p = SiteParameters {
            budget_preference: BudgetPreference::Financing,
            financing_years: MAX_FINANCING_YEARS,
            ..Default::default()
        };
        assert!(p.validate().is_ok());

        // the loan term only matters when financing
        let p = SiteParameters { financing_years: 400_000_000, ..Default::default() };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_consumption_falls_back_to_bill() {
        let p = SiteParameters::default();
        assert_eq!(p.resolved_monthly_consumption_kwh(), 400.0);

        let p = SiteParameters { monthly_consumption_kwh: Some(250.0), ..Default::default() };
        assert_eq!(p.resolved_monthly_consumption_kwh(), 250.0);

        let p = SiteParameters { electricity_rate: 0.0, ..Default::default() };
        assert_eq!(p.resolved_monthly_consumption_kwh(), 0.0);
    }

    #[test]
    fn test_coordinate_range() {
        assert!(Coordinate::new(18.5, 120.6).is_ok());
        assert!(Coordinate::new(91.0, 0.0).is_err());
        assert!(Coordinate::new(0.0, -180.5).is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
    }
}
