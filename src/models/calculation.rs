use serde::{Deserialize, Serialize};

use crate::error::{EstimatorError, Result};

/// Years until the system pays for itself.
///
/// `Undefined` stands in for cost ÷ 0 when the system saves nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaybackPeriod {
    Years(f64),
    Undefined,
}

impl PaybackPeriod {
    pub(crate) fn from_ratio(total_cost: f64, annual_savings: f64) -> Self {
        if annual_savings > 0.0 {
            PaybackPeriod::Years(total_cost / annual_savings)
        } else {
            PaybackPeriod::Undefined
        }
    }

    /// The payback in years, or `DivisionSentinel` when it is undefined.
    pub fn years(&self) -> Result<f64> {
        match *self {
            PaybackPeriod::Years(y) => Ok(y),
            PaybackPeriod::Undefined => Err(EstimatorError::DivisionSentinel),
        }
    }
}

/// Production expected under one season's irradiance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalOutlook {
    pub season: String,
    /// Calendar months covered, 1 = January
    pub months: Vec<u32>,
    /// Derated peak sun hours for the season (h/day)
    pub peak_sun_hours: f64,
    pub daily_production_kwh: f64,
}

/// Loan amortisation when the system is financed rather than bought outright.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancingSummary {
    pub principal: f64,
    pub monthly_payment: f64,
    pub payment_count: u32,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Complete sizing, financial and environmental forecast for one site.
///
/// Produced fresh by each calculation and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarCalculationResult {
    // ── System sizing ────────────────────────────────────────────────────────
    /// Installed capacity (kW)
    pub system_size_kw: f64,
    /// Capacity needed to cover consumption (kW)
    pub required_system_size_kw: f64,
    /// Capacity the roof can hold (kW)
    pub max_system_size_kw: f64,
    pub panel_count: u32,
    /// Panel area implied by the panel count (m²)
    pub usable_area_m2: f64,
    pub panel_efficiency_pct: f64,

    // ── Energy production ────────────────────────────────────────────────────
    pub daily_production_kwh: f64,
    pub monthly_production_kwh: f64,
    pub annual_production_kwh: f64,
    /// Peak sun hours after shading, orientation and tilt derating (h/day)
    pub peak_sun_hours: f64,
    pub seasonal: Vec<SeasonalOutlook>,

    // ── Financial analysis ───────────────────────────────────────────────────
    pub total_system_cost: f64,
    pub annual_savings: f64,
    pub monthly_savings: f64,
    pub payback_period: PaybackPeriod,
    /// Return on investment over the system lifetime (%)
    pub roi_pct: f64,
    pub net_present_value: f64,
    pub financing: Option<FinancingSummary>,

    // ── Environmental impact ─────────────────────────────────────────────────
    /// kg CO₂ avoided per year
    pub carbon_offset_kg: f64,
    pub trees_equivalent: f64,
    pub cars_equivalent: f64,

    // ── System performance ───────────────────────────────────────────────────
    pub performance_ratio: f64,
    pub degradation_rate_pct: f64,
    /// Degraded production summed over the system lifetime (kWh)
    pub lifetime_production_kwh: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payback_sentinel() {
        assert_eq!(PaybackPeriod::from_ratio(910.0, 0.0), PaybackPeriod::Undefined);
        assert!(matches!(
            PaybackPeriod::Undefined.years(),
            Err(EstimatorError::DivisionSentinel)
        ));
        assert_eq!(PaybackPeriod::from_ratio(100.0, 50.0).years().unwrap(), 2.0);
    }

    #[test]
    fn test_payback_serializes_tagged() {
        let json = serde_json::to_string(&PaybackPeriod::Undefined).unwrap();
        assert_eq!(json, "\"undefined\"");
        let json = serde_json::to_string(&PaybackPeriod::Years(2.5)).unwrap();
        assert_eq!(json, r#"{"years":2.5}"#);
    }
}
