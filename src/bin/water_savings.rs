// Lawn conversion water savings report
//
// Usage: water_savings <area_sqft> [target plant type]
//   CONFIG=path/to/config.json  optional JSON config
//   PLANT_DATA, ET_DATA, TIER_RATE  override config values
//   FORMAT=json | json-compact  JSON instead of markdown
//
// Without a target type the demand table and conversion options are printed.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use water_savings_rust::{
    parse_area, EstimatorConfig, JsonFormatter, MarkdownFormatter, PrimaryType, SavingsError,
    SavingsReport, Scenario, WaterSavingsEngine,
};

fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "water_savings_rust=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match std::env::var("CONFIG") {
        Ok(path) => EstimatorConfig::load(Path::new(&path))?,
        Err(_) => EstimatorConfig::default(),
    }
    .apply_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  PLANT_DATA: {:?}", config.plant_reference_path);
    tracing::info!("  ET_DATA: {:?}", config.et_path);
    tracing::info!("  TIER_RATE: {}", config.tier_rate_per_hcf);

    // Reference data problems are fatal: abort with the diagnostic
    let engine = WaterSavingsEngine::load(&config)
        .context("Failed to load reference data; check PLANT_DATA / ET_DATA")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let report = match build_report(&engine, &args) {
        Ok(report) => report,
        Err(e) if e.is_recoverable() => {
            eprintln!("{}", e);
            eprintln!("Please enter a valid number for square footage.");
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e.into()),
    };

    let output = match std::env::var("FORMAT").as_deref() {
        Ok("json") => JsonFormatter::format(&report)?,
        Ok("json-compact") => JsonFormatter::format_compact(&report)?,
        _ => MarkdownFormatter::format(&report),
    };
    println!("{}", output);

    Ok(ExitCode::SUCCESS)
}

fn build_report(engine: &WaterSavingsEngine, args: &[String]) -> Result<SavingsReport, SavingsError> {
    let Some(area_input) = args.first() else {
        return Ok(SavingsReport::overview(engine));
    };
    let area = parse_area(area_input)?;

    let rest = &args[1..];
    if rest.is_empty() {
        return Ok(SavingsReport::overview(engine));
    }
    let target: PrimaryType = rest.join(" ").parse()?;

    SavingsReport::for_scenario(engine, &Scenario::lawn_conversion(area, target)?)
}
