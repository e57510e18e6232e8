//! Water-Use Estimator
//!
//! `demand[type] = mean_coefficient[type] × annual ET`, in inches/year.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::error::{Result, SavingsError};
use crate::evapotranspiration::AnnualEt;
use crate::normalizer::{PlantFactorTable, PrimaryType, LAWN_BASELINE};

/// Annual water demand for one primary type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemandEntry {
    pub primary_type: PrimaryType,
    pub inches_per_year: f64,
}

/// PrimaryType → annual demand (inches/year)
///
/// Built once per loaded data set and read-only afterwards. Only types with
/// at least one surviving reference row have an entry.
#[derive(Debug, Clone)]
pub struct TypeDemand {
    demand: FxHashMap<PrimaryType, f64>,
    annual_et_inches: f64,
}

impl TypeDemand {
    pub fn estimate(factors: &PlantFactorTable, annual_et: &AnnualEt) -> Self {
        let demand = factors
            .iter()
            .map(|(primary_type, factor)| {
                (primary_type, factor.mean_coefficient * annual_et.inches)
            })
            .collect();

        Self {
            demand,
            annual_et_inches: annual_et.inches,
        }
    }

    /// Demand for one type
    ///
    /// # Errors
    /// `UnknownPlantType` if the type has no entry. Never substitutes zero.
    pub fn get(&self, primary_type: PrimaryType) -> Result<f64> {
        self.demand
            .get(&primary_type)
            .copied()
            .ok_or_else(|| SavingsError::UnknownPlantType(primary_type.label().to_string()))
    }

    /// Demand for a type given by name (e.g., a selection from a form)
    pub fn get_by_name(&self, name: &str) -> Result<f64> {
        self.get(name.parse()?)
    }

    pub fn contains(&self, primary_type: PrimaryType) -> bool {
        self.demand.contains_key(&primary_type)
    }

    /// Demand of the lawn baseline
    pub fn baseline_depth(&self) -> Result<f64> {
        self.get(LAWN_BASELINE)
    }

    pub fn annual_et_inches(&self) -> f64 {
        self.annual_et_inches
    }

    /// All entries by descending demand, ties in canonical type order
    pub fn ranked(&self) -> Vec<DemandEntry> {
        let mut entries: Vec<DemandEntry> = self
            .demand
            .iter()
            .map(|(primary_type, inches)| DemandEntry {
                primary_type: *primary_type,
                inches_per_year: *inches,
            })
            .collect();

        entries.sort_by(|a, b| {
            b.inches_per_year
                .total_cmp(&a.inches_per_year)
                .then(a.primary_type.cmp(&b.primary_type))
        });
        entries
    }

    /// Types a lawn can be converted to: everything but the baseline, ranked
    pub fn conversion_options(&self) -> Vec<PrimaryType> {
        self.ranked()
            .into_iter()
            .map(|entry| entry.primary_type)
            .filter(|t| *t != LAWN_BASELINE)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.demand.len()
    }

    pub fn is_empty(&self) -> bool {
        self.demand.is_empty()
    }
}
