//! Error taxonomy for the water savings engine
//!
//! Three failure classes with different lifetimes:
//! - `DataLoad`: reference data or configuration is unusable. Fatal at startup.
//! - `UnknownPlantType`: a lookup key is absent from the demand table. Caller bug.
//! - `InvalidArea`: user-supplied area was rejected. Local and recoverable.

use thiserror::Error;

/// Error type for loading, estimation and scenario evaluation.
#[derive(Debug, Error)]
pub enum SavingsError {
    #[error("reference data error ({context}): {reason}")]
    DataLoad { context: String, reason: String },
    #[error("unknown plant type '{0}'")]
    UnknownPlantType(String),
    #[error("invalid area '{input}': {reason}")]
    InvalidArea { input: String, reason: String },
}

impl SavingsError {
    pub fn data_load(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataLoad {
            context: context.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_area(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArea {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// True when the error is scoped to a single user input and the caller
    /// should prompt again instead of aborting.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidArea { .. })
    }
}

pub type Result<T> = std::result::Result<T, SavingsError>;

/// Attach a loader context to polars failures.
pub(crate) trait PolarsContext<T> {
    fn data_context(self, context: &str) -> Result<T>;
}

impl<T> PolarsContext<T> for polars::prelude::PolarsResult<T> {
    fn data_context(self, context: &str) -> Result<T> {
        self.map_err(|e| SavingsError::data_load(context, e.to_string()))
    }
}
