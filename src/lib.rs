//! Rooftop solar estimator
//!
//! Two stateless calculators sharing one set of factor tables:
//! [`calculate`] sizes a PV system from site and consumption parameters, and
//! [`measure_rooftop`] turns a drawn map outline into an area and output
//! estimate. Every call is a pure function of its inputs; results are fresh
//! values the caller stores or discards.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use error::{EstimatorError, Result};
pub use models::calculation::{
    FinancingSummary, PaybackPeriod, SeasonalOutlook, SolarCalculationResult,
};
pub use models::measurement::{MeasurementSet, RooftopMeasurement};
pub use models::site::{BudgetPreference, Coordinate, Orientation, Shading, SiteParameters};
pub use services::export::{export_measurements, import_measurements};
pub use services::factors::{
    LocationProfile, resolve_location, resolve_orientation, resolve_shading, resolve_tilt,
};
pub use services::geometry::{
    bounding_box_area, estimated_output_w, measure_rooftop, measure_rooftop_at,
    measure_rooftop_with,
};
pub use services::sizing::calculate;
