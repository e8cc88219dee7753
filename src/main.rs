use rooftop_solar_estimator::config::Config;
use rooftop_solar_estimator::services::{export, factors, geometry, sizing};
use rooftop_solar_estimator::MeasurementSet;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "verbose_log")]
const DEFAULT_FILTER: &str = "debug";
#[cfg(not(feature = "verbose_log"))]
const DEFAULT_FILTER: &str = "info";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    // 1. Load the run file
    let path = std::env::args().nth(1).unwrap_or_else(|| "estimator.json".to_string());
    let config = Config::load(&path).map_err(|e| {
        tracing::error!(path = %path, "failed to load run file: {}", e);
        e
    })?;
    tracing::info!(path = %path, rooftops = config.rooftops.len(), "run file loaded");

    // 2. Size the system
    let site = config.site.clone().unwrap_or_default();
    let location = factors::resolve_location(&site.location)?;
    let result = sizing::calculate(&site)?;
    tracing::info!(
        "{}: {:.2} kW | {} panels | {:.0} kWh/yr",
        location.name,
        result.system_size_kw,
        result.panel_count,
        result.annual_production_kwh
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    // 3. Measure drawn rooftops
    let reference_latitude = config.reference_latitude.unwrap_or(location.latitude);
    let now = chrono::Utc::now();
    let mut set = MeasurementSet::new();
    for (i, outline) in config.rooftops.iter().enumerate() {
        match geometry::measure_rooftop_with(outline, reference_latitude, location.peak_sun_hours, now) {
            Ok(m) => {
                tracing::info!(
                    "rooftop #{}: {:.2} m² | {:.2} kW | {:.1} kWh/yr",
                    i,
                    m.area_m2,
                    m.estimated_output_w / 1000.0,
                    m.annual_energy_kwh()
                );
                set = set.with_measurement(m);
            }
            Err(e) => tracing::warn!("rooftop #{} skipped: {}", i, e),
        }
    }

    // 4. Export
    if !set.is_empty() {
        println!("{}", export::export_measurements(&set)?);
    }
    if let Some(out) = &config.export_path {
        std::fs::write(out, export::export_measurements(&set)?)?;
        tracing::info!(path = %out, measurements = set.len(), "measurements exported");
    }

    Ok(())
}
