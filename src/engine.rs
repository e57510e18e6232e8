//! Water Savings Engine - pipeline coordinator
//!
//! Runs loader → normalizer → ET aggregator → estimator exactly once and keeps
//! the results as immutable values. Every accessor takes `&self`, so one engine
//! can be shared read-only across requests (e.g., behind an `Arc`) while
//! scenario evaluation stays per-call and stateless.

use polars::prelude::DataFrame;
use rustc_hash::FxHashMap;

use crate::config::EstimatorConfig;
use crate::data::ReferenceData;
use crate::error::{Result, SavingsError};
use crate::estimator::TypeDemand;
use crate::evapotranspiration::{aggregate_annual_et, AnnualEt};
use crate::normalizer::{
    normalize_plants, NormalizationSummary, NormalizedPlant, PlantFactorTable, PrimaryType,
    LAWN_BASELINE,
};
use crate::savings::{parse_area, SavingsCalculator, SavingsResult, Scenario};

/// Loaded reference data reduced to everything a scenario needs
#[derive(Debug, Clone)]
pub struct WaterSavingsEngine {
    factors: PlantFactorTable,
    annual_et: AnnualEt,
    demand: TypeDemand,
    summary: NormalizationSummary,
    examples: FxHashMap<PrimaryType, Vec<String>>,
    calculator: SavingsCalculator,
    rate_label: String,
    example_limit: usize,
}

impl WaterSavingsEngine {
    /// Load both source tables and build the engine
    ///
    /// # Errors
    /// `DataLoad` for any configuration or reference data problem. Callers
    /// should abort startup; the data is static and retrying will not help.
    pub fn load(config: &EstimatorConfig) -> Result<Self> {
        config.validate()?;
        let data = ReferenceData::load(config)?;
        Self::from_reference(&data, config)
    }

    /// Build from raw in-memory frames (headers not yet trimmed)
    pub fn from_frames(plants: DataFrame, et: DataFrame, config: &EstimatorConfig) -> Result<Self> {
        config.validate()?;
        let data = ReferenceData::from_frames(plants, et, &config.inclusion_tags)?;
        Self::from_reference(&data, config)
    }

    pub fn from_reference(data: &ReferenceData, config: &EstimatorConfig) -> Result<Self> {
        let (plants, summary) = normalize_plants(&data.plants)?;
        let factors = PlantFactorTable::from_plants(&plants)?;
        let annual_et = aggregate_annual_et(&data.et)?;
        let demand = TypeDemand::estimate(&factors, &annual_et);
        let examples = index_examples(&plants);

        tracing::info!(
            plant_types = demand.len(),
            retained_rows = summary.retained,
            annual_et_inches = annual_et.inches,
            "Water savings engine ready"
        );

        Ok(Self {
            factors,
            annual_et,
            demand,
            summary,
            examples,
            calculator: SavingsCalculator::new(config.tier_rate_per_hcf),
            rate_label: config.rate_label.clone(),
            example_limit: config.example_limit,
        })
    }

    pub fn type_demand(&self) -> &TypeDemand {
        &self.demand
    }

    pub fn plant_factors(&self) -> &PlantFactorTable {
        &self.factors
    }

    pub fn annual_et(&self) -> &AnnualEt {
        &self.annual_et
    }

    pub fn normalization_summary(&self) -> &NormalizationSummary {
        &self.summary
    }

    pub fn calculator(&self) -> &SavingsCalculator {
        &self.calculator
    }

    pub fn rate_label(&self) -> &str {
        &self.rate_label
    }

    pub fn example_limit(&self) -> usize {
        self.example_limit
    }

    pub fn baseline_type(&self) -> PrimaryType {
        LAWN_BASELINE
    }

    /// Types a lawn can be converted to, thirstiest first
    pub fn conversion_options(&self) -> Vec<PrimaryType> {
        self.demand.conversion_options()
    }

    /// Up to `limit` botanical names for `primary_type`, in source order
    ///
    /// # Errors
    /// `UnknownPlantType` if the type has no demand entry.
    pub fn examples(&self, primary_type: PrimaryType, limit: usize) -> Result<&[String]> {
        if !self.demand.contains(primary_type) {
            return Err(SavingsError::UnknownPlantType(primary_type.label().to_string()));
        }

        let names = self
            .examples
            .get(&primary_type)
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        Ok(&names[..names.len().min(limit)])
    }

    /// Evaluate a fully-typed scenario
    pub fn compare(&self, scenario: &Scenario) -> Result<SavingsResult> {
        self.calculator.calculate(&self.demand, scenario)
    }

    /// Evaluate raw form input: area text and a target type name
    ///
    /// # Errors
    /// `InvalidArea` for bad area text (recoverable, re-prompt);
    /// `UnknownPlantType` for a name outside the demand table.
    pub fn evaluate(&self, area_input: &str, target_name: &str) -> Result<SavingsResult> {
        let area = parse_area(area_input)?;
        let target: PrimaryType = target_name.parse()?;
        self.compare(&Scenario::lawn_conversion(area, target)?)
    }
}

fn index_examples(plants: &[NormalizedPlant]) -> FxHashMap<PrimaryType, Vec<String>> {
    let mut examples: FxHashMap<PrimaryType, Vec<String>> = FxHashMap::default();
    for plant in plants {
        if let Some(name) = &plant.botanical_name {
            examples.entry(plant.primary_type).or_default().push(name.clone());
        }
    }
    examples
}
