//! Water Savings Estimator
//!
//! Estimates irrigation water and cost savings from converting lawn to
//! native or drought-tolerant plantings.
//!
//! Pipeline (data flows strictly forward):
//! - `data/`: Reference Data Loader (plant reference + ET tables, Polars)
//! - `normalizer/`: plant factor buckets → coefficients, tags → primary type
//! - `evapotranspiration/`: periodic ET readings → annual ET
//! - `estimator/`: mean coefficient × annual ET → demand per plant type
//! - `savings/`: demand → gallons and dollars for one scenario
//! - `engine/`: runs the pipeline once and serves scenarios read-only
//! - `report/`: thin presenter adapters (markdown, JSON)

pub mod error;
pub mod config;
pub mod utils;
pub mod data;
pub mod normalizer;
pub mod evapotranspiration;
pub mod estimator;
pub mod savings;
pub mod engine;
pub mod report;

// Re-export commonly used types
pub use error::{Result, SavingsError};
pub use config::EstimatorConfig;
pub use data::ReferenceData;
pub use normalizer::{PrimaryType, PlantFactorTable, LAWN_BASELINE};
pub use evapotranspiration::AnnualEt;
pub use estimator::TypeDemand;
pub use savings::{parse_area, SavingsCalculator, SavingsResult, Scenario};
pub use engine::WaterSavingsEngine;
pub use report::{JsonFormatter, MarkdownFormatter, SavingsReport};
