//! Column contracts for reference tables
//!
//! Each source table declares the columns it needs up front. Validation runs
//! once, right after the CSV is parsed, and reports every missing column in a
//! single error instead of failing on the first lookup deep inside a
//! computation.

use polars::prelude::*;
use std::collections::HashSet;

use crate::error::{PolarsContext, Result, SavingsError};

/// Required and optional columns of one source table
#[derive(Debug, Clone, Copy)]
pub struct SchemaContract {
    /// Human-readable table name used in error messages (e.g., "plant reference")
    pub table: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

impl SchemaContract {
    /// Required columns absent from `df`, in contract order
    pub fn missing_columns(&self, df: &DataFrame) -> Vec<&'static str> {
        let actual: HashSet<&str> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();

        self.required
            .iter()
            .copied()
            .filter(|name| !actual.contains(name))
            .collect()
    }

    /// Fail with a single `DataLoad` error listing all missing columns
    pub fn validate(&self, df: &DataFrame) -> Result<()> {
        let missing = self.missing_columns(df);
        if missing.is_empty() {
            return Ok(());
        }

        let available: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();

        Err(SavingsError::data_load(
            self.table,
            format!(
                "missing required column(s) {:?}; available columns: {:?}",
                missing, available
            ),
        ))
    }

    /// Optional columns actually present in `df`
    fn present_optional(&self, df: &DataFrame) -> Vec<&'static str> {
        let actual: HashSet<&str> = df
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();

        self.optional
            .iter()
            .copied()
            .filter(|name| actual.contains(name))
            .collect()
    }
}

/// Trim surrounding whitespace from every column name in place
///
/// Source spreadsheets export headers like `" Avg ETo (in) "`.
pub fn trim_column_names(df: &mut DataFrame, context: &str) -> Result<()> {
    let trimmed: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.trim().to_string())
        .collect();

    df.set_column_names(trimmed.iter().map(|name| name.as_str()))
        .data_context(context)
}

/// Validate `df` against `contract` and project it to the contract's columns
///
/// Every projected column is cast to text; interpretation (bucket lookup,
/// numeric coercion) belongs to the normalizer and aggregator.
///
/// # Returns
/// DataFrame holding the required columns plus whichever optional columns
/// the source provides, in contract order
///
/// # Errors
/// `DataLoad` listing every missing required column
pub fn materialize_with_contract(df: DataFrame, contract: &SchemaContract) -> Result<DataFrame> {
    contract.validate(&df)?;

    let col_exprs: Vec<Expr> = contract
        .required
        .iter()
        .copied()
        .chain(contract.present_optional(&df))
        .map(|name| col(name).cast(DataType::String))
        .collect();

    df.lazy()
        .select(&col_exprs)
        .collect()
        .data_context(contract.table)
}
