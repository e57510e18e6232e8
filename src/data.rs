//! Reference Data Loader
//!
//! Loads the plant reference table (WUCOLS export) and the periodic reference
//! ET table (CIMIS export) with Polars, trims column names, validates each
//! table against its column contract and applies the inclusion filter.
//!
//! Both tables are static reference material: every failure here is a
//! `DataLoad` error and aborts startup.

use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

use crate::config::EstimatorConfig;
use crate::error::{PolarsContext, Result, SavingsError};
use crate::normalizer::has_any_tag;
use crate::utils::{materialize_with_contract, trim_column_names, SchemaContract};

pub const TYPE_COLUMN: &str = "Type(s)";
pub const PLANT_FACTOR_COLUMN: &str = "Plant_Factor";
pub const BOTANICAL_NAME_COLUMN: &str = "Botanical Name";
pub const ET_COLUMN: &str = "Avg ETo (in)";

pub const PLANT_SCHEMA: SchemaContract = SchemaContract {
    table: "plant reference",
    required: &[TYPE_COLUMN, PLANT_FACTOR_COLUMN],
    optional: &[BOTANICAL_NAME_COLUMN],
};

pub const ET_SCHEMA: SchemaContract = SchemaContract {
    table: "ET table",
    required: &[ET_COLUMN],
    optional: &[],
};

/// Column-normalized reference tables, immutable after loading
#[derive(Debug, Clone)]
pub struct ReferenceData {
    /// Plant rows that passed the inclusion filter (text columns)
    pub plants: DataFrame,

    /// Periodic ET readings (text column, coerced by the aggregator)
    pub et: DataFrame,
}

impl ReferenceData {
    /// Load both tables from the paths in `config`
    pub fn load(config: &EstimatorConfig) -> Result<Self> {
        tracing::info!(
            plants = ?config.plant_reference_path,
            et = ?config.et_path,
            "Loading reference data"
        );

        let plants = read_csv_path(&config.plant_reference_path, PLANT_SCHEMA.table)?;
        let et = read_csv_path(&config.et_path, ET_SCHEMA.table)?;

        Self::from_frames(plants, et, &config.inclusion_tags)
    }

    /// Build from raw frames (headers not yet trimmed)
    pub fn from_frames(plants: DataFrame, et: DataFrame, inclusion_tags: &[String]) -> Result<Self> {
        let plants = prepare_plants(plants, inclusion_tags)?;
        let et = prepare_et(et)?;

        tracing::info!(plants = plants.height(), et_readings = et.height(), "Reference data loaded");

        Ok(Self { plants, et })
    }
}

/// Read a CSV file with every column as text
pub fn read_csv_path(path: &Path, table: &str) -> Result<DataFrame> {
    if !path.exists() {
        return Err(SavingsError::data_load(
            table,
            format!("source file not found: {:?}", path),
        ));
    }

    csv_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .data_context(table)?
        .finish()
        .map_err(|e| SavingsError::data_load(table, format!("unreadable CSV {:?}: {}", path, e)))
}

/// Read CSV bytes already in memory with every column as text
pub fn read_csv_bytes(bytes: impl AsRef<[u8]>, table: &str) -> Result<DataFrame> {
    csv_options()
        .into_reader_with_file_handle(Cursor::new(bytes.as_ref().to_vec()))
        .finish()
        .map_err(|e| SavingsError::data_load(table, format!("unreadable CSV: {}", e)))
}

/// Schema inference is disabled so bucket strings and ET readings arrive as text
fn csv_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
}

/// Trim headers, validate the contract and keep only rows carrying an
/// inclusion tag (native-plant or ornamental-grass designation)
pub fn prepare_plants(mut df: DataFrame, inclusion_tags: &[String]) -> Result<DataFrame> {
    let table = PLANT_SCHEMA.table;
    trim_column_names(&mut df, table)?;
    let df = materialize_with_contract(df, &PLANT_SCHEMA)?;

    if df.height() == 0 {
        return Err(SavingsError::data_load(table, "source has no rows"));
    }

    let types = df.column(TYPE_COLUMN).data_context(table)?.str().data_context(table)?;
    let mask: BooleanChunked = types
        .into_iter()
        .map(|opt| opt.is_some_and(|tags| has_any_tag(tags, inclusion_tags)))
        .collect();

    let filtered = df.filter(&mask).data_context(table)?;
    tracing::debug!(
        before = df.height(),
        after = filtered.height(),
        "Applied inclusion filter"
    );

    if filtered.height() == 0 {
        return Err(SavingsError::data_load(
            table,
            format!("no rows tagged with any of {:?}", inclusion_tags),
        ));
    }

    Ok(filtered)
}

/// Trim headers and validate the ET contract
pub fn prepare_et(mut df: DataFrame) -> Result<DataFrame> {
    let table = ET_SCHEMA.table;
    trim_column_names(&mut df, table)?;
    let df = materialize_with_contract(df, &ET_SCHEMA)?;

    if df.height() == 0 {
        return Err(SavingsError::data_load(table, "source has no rows"));
    }

    Ok(df)
}
