//! Evapotranspiration Aggregator
//!
//! Reduces the periodic reference ET column to one annual depth in inches.
//! Unparseable or missing readings are dropped, never read as zero.

use polars::prelude::*;
use serde::Serialize;

use crate::data::ET_COLUMN;
use crate::error::{PolarsContext, Result, SavingsError};

/// Annual reference evapotranspiration (inches/year)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnualEt {
    pub inches: f64,
    /// Readings that contributed to the sum
    pub observations: usize,
    /// Readings dropped as missing or non-numeric
    pub dropped: usize,
}

/// Parse one ET reading, `None` for blanks, text and non-finite values
pub fn parse_et_reading(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Sum all parseable readings
///
/// # Errors
/// `DataLoad` when no reading survives, or when the surviving readings do
/// not sum to a positive depth. A zero annual ET would silently report
/// zero demand for every plant type.
pub fn sum_readings<'a, I>(readings: I) -> Result<AnnualEt>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut inches = 0.0;
    let mut observations = 0;
    let mut dropped = 0;

    for reading in readings {
        match reading.and_then(parse_et_reading) {
            Some(value) => {
                inches += value;
                observations += 1;
            }
            None => dropped += 1,
        }
    }

    if observations == 0 {
        return Err(SavingsError::data_load(
            "ET table",
            format!("no numeric '{}' readings ({} dropped)", ET_COLUMN, dropped),
        ));
    }

    if inches <= 0.0 {
        return Err(SavingsError::data_load(
            "ET table",
            format!(
                "annual reference ET must be positive, got {} from {} readings",
                inches, observations
            ),
        ));
    }

    Ok(AnnualEt {
        inches,
        observations,
        dropped,
    })
}

/// Aggregate the ET column of a loaded ET table
pub fn aggregate_annual_et(df: &DataFrame) -> Result<AnnualEt> {
    let readings = df
        .column(ET_COLUMN)
        .data_context("ET table")?
        .str()
        .data_context("ET table")?;

    let annual = sum_readings(readings.into_iter())?;

    if annual.dropped > 0 {
        tracing::warn!(dropped = annual.dropped, "Dropped non-numeric ET readings");
    }
    tracing::info!(
        annual_inches = annual.inches,
        observations = annual.observations,
        "Aggregated annual reference ET"
    );

    Ok(annual)
}
