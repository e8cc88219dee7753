/// ============================================================
///  Solar sizing & financial model
///
///  Pipeline (one pass, no state):
///   1. Effective peak sun hours  – base × shading × orientation × tilt
///   2. Consumption               – monthly kWh (or bill ÷ rate) ÷ 30
///   3. Sizing                    – min(required, roof-constrained)
///   4. Panels & usable area      – 400 W modules
///   5. Production                – daily / monthly / annual
///   6. Cost, savings, payback, ROI, NPV, financing
///   7. Environmental impact      – CO₂, trees, cars
///   8. Lifetime production       – compounding degradation
///   9. Seasonal outlook          – per-season irradiance
/// ============================================================

use crate::error::Result;
use crate::models::calculation::{
    FinancingSummary, PaybackPeriod, SeasonalOutlook, SolarCalculationResult,
};
use crate::models::site::{BudgetPreference, SiteParameters};
use crate::services::factors::{
    LocationProfile, orientation_factor, resolve_location, resolve_tilt, shading_factor,
};

// ─── Model constants ─────────────────────────────────────────
pub const PANEL_WATTS: f64 = 400.0;
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const DAYS_PER_YEAR: f64 = 365.0;
/// Share of the cost left after the government incentive (30% credit)
pub const INCENTIVE_MULTIPLIER: f64 = 0.7;
pub const DISCOUNT_RATE: f64 = 0.08;
/// Grid emission factor (kg CO₂/kWh)
pub const GRID_EMISSION_FACTOR: f64 = 0.7;
/// kg CO₂ absorbed by one tree per year
pub const TREE_KG_CO2_PER_YEAR: f64 = 22.0;
/// kg CO₂ emitted by one car per year
pub const CAR_KG_CO2_PER_YEAR: f64 = 4600.0;

/// Runs the full sizing → production → cost → impact pipeline for one site.
///
/// Zero consumption is not an error: it sizes a zero-kW system.
pub fn calculate(params: &SiteParameters) -> Result<SolarCalculationResult> {
    params.validate()?;
    let location = resolve_location(&params.location)?;

    // ── 1. Effective peak sun hours ────────────────────────────
    let peak_sun_hours = derated_sun_hours(location.peak_sun_hours, params);

    // ── 2. Consumption ─────────────────────────────────────────
    let daily_consumption_kwh = params.resolved_monthly_consumption_kwh() / DAYS_PER_MONTH;

    // ── 3. Sizing ──────────────────────────────────────────────
    let pr = params.performance_ratio;
    let efficiency = params.panel_efficiency_pct / 100.0;
    let required_system_size_kw = daily_consumption_kwh / (peak_sun_hours * pr);
    let max_system_size_kw = (params.roof_area_m2 * params.panel_efficiency_pct / 100.0) / 1000.0;
    // never larger than the roof allows
    let system_size_kw = required_system_size_kw.min(max_system_size_kw);

    // ── 4. Panels ──────────────────────────────────────────────
    let panel_count = (system_size_kw * 1000.0 / PANEL_WATTS).ceil() as u32;
    let usable_area_m2 = (panel_count as f64 * PANEL_WATTS) / efficiency / 1000.0;

    // ── 5. Production ──────────────────────────────────────────
    let daily_production_kwh = system_size_kw * peak_sun_hours * pr;
    let monthly_production_kwh = daily_production_kwh * DAYS_PER_MONTH;
    let annual_production_kwh = daily_production_kwh * DAYS_PER_YEAR;

    // ── 6. Financials ──────────────────────────────────────────
    let mut total_system_cost = system_size_kw * params.system_cost_per_kw;
    if params.government_incentives {
        total_system_cost *= INCENTIVE_MULTIPLIER;
    }
    let annual_savings = annual_production_kwh * params.electricity_rate;
    let monthly_savings = annual_savings / 12.0;
    let payback_period = PaybackPeriod::from_ratio(total_system_cost, annual_savings);

    let lifetime = params.system_lifetime_years;
    let roi_pct = if total_system_cost > 0.0 {
        ((annual_savings * lifetime as f64 - total_system_cost) / total_system_cost) * 100.0
    } else {
        0.0
    };
    let net_present_value = net_present_value(
        total_system_cost,
        annual_savings,
        params.rate_increase_pct / 100.0,
        lifetime,
    );
    let financing = match params.budget_preference {
        BudgetPreference::Capex => None,
        BudgetPreference::Financing => Some(amortize(
            total_system_cost,
            params.financing_interest_pct / 100.0,
            params.financing_years,
        )),
    };

    // ── 7. Environmental impact ────────────────────────────────
    let carbon_offset_kg = annual_production_kwh * GRID_EMISSION_FACTOR;
    let trees_equivalent = carbon_offset_kg / TREE_KG_CO2_PER_YEAR;
    let cars_equivalent = carbon_offset_kg / CAR_KG_CO2_PER_YEAR;

    // ── 8. Lifetime production ─────────────────────────────────
    let lifetime_production_kwh = lifetime_production(
        annual_production_kwh,
        params.degradation_rate_pct / 100.0,
        lifetime,
    );

    // ── 9. Seasonal outlook ────────────────────────────────────
    let seasonal = seasonal_outlook(location, params, system_size_kw);

    tracing::trace!(
        peak_sun_hours,
        daily_consumption_kwh,
        required_system_size_kw,
        max_system_size_kw,
        "sizing inputs resolved"
    );
    tracing::debug!(
        location = location.key,
        system_size_kw,
        panel_count,
        annual_production_kwh,
        total_system_cost,
        "solar system calculated"
    );

    Ok(SolarCalculationResult {
        system_size_kw,
        required_system_size_kw,
        max_system_size_kw,
        panel_count,
        usable_area_m2,
        panel_efficiency_pct: params.panel_efficiency_pct,
        daily_production_kwh,
        monthly_production_kwh,
        annual_production_kwh,
        peak_sun_hours,
        seasonal,
        total_system_cost,
        annual_savings,
        monthly_savings,
        payback_period,
        roi_pct,
        net_present_value,
        financing,
        carbon_offset_kg,
        trees_equivalent,
        cars_equivalent,
        performance_ratio: pr,
        degradation_rate_pct: params.degradation_rate_pct,
        lifetime_production_kwh,
    })
}

fn derated_sun_hours(base: f64, params: &SiteParameters) -> f64 {
    base * shading_factor(params.shading)
        * orientation_factor(params.roof_orientation)
        * resolve_tilt(params.roof_tilt_deg)
}

/// Upfront cost against savings that grow with the tariff, discounted at 8%.
pub fn net_present_value(cost: f64, annual_savings: f64, rate_increase: f64, years: u32) -> f64 {
    (1..=years as i32).fold(-cost, |npv, year| {
        let future_value = annual_savings * (1.0 + rate_increase).powi(year);
        npv + future_value / (1.0 + DISCOUNT_RATE).powi(year)
    })
}

/// Sum of yearly output with `(1 - degradation)^(year - 1)` applied.
pub fn lifetime_production(annual_kwh: f64, degradation: f64, years: u32) -> f64 {
    (1..=years as i32)
        .map(|year| annual_kwh * (1.0 - degradation).powi(year - 1))
        .sum()
}

/// Fixed-rate loan with monthly payments.
pub fn amortize(principal: f64, annual_interest: f64, years: u32) -> FinancingSummary {
    let payment_count = years.saturating_mul(12);
    let n = payment_count as f64;
    let r = annual_interest / 12.0;
    let monthly_payment = if r > 0.0 {
        principal * r / (1.0 - (1.0 + r).powf(-n))
    } else {
        principal / n
    };
    let total_paid = monthly_payment * n;
    FinancingSummary {
        principal,
        monthly_payment,
        payment_count,
        total_paid,
        total_interest: total_paid - principal,
    }
}

fn seasonal_outlook(
    location: &LocationProfile,
    params: &SiteParameters,
    system_size_kw: f64,
) -> Vec<SeasonalOutlook> {
    location
        .seasons
        .iter()
        .map(|season| {
            let peak_sun_hours = derated_sun_hours(season.peak_sun_hours, params);
            SeasonalOutlook {
                season: season.name.to_string(),
                months: season.months.to_vec(),
                peak_sun_hours,
                daily_production_kwh: system_size_kw * peak_sun_hours * params.performance_ratio,
            }
        })
        .collect()
}
