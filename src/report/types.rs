use serde::{Deserialize, Serialize};

use crate::engine::WaterSavingsEngine;
use crate::error::Result;
use crate::normalizer::{PrimaryType, LAWN_BASELINE};
use crate::savings::{SavingsResult, Scenario};

/// Everything a results view needs, in display order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsReport {
    pub rate_label: String,
    pub tier_rate_per_hcf: f64,
    pub annual_et_inches: f64,
    /// All plant types, thirstiest first (chart data)
    pub demand: Vec<DemandRow>,
    pub conversion_options: Vec<String>,
    pub scenario: Option<ScenarioSummary>,
}

/// One bar of the per-type demand chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandRow {
    pub plant_type: String,
    pub inches_per_year: f64,
    pub plant_count: usize,
}

/// Results for one submitted scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub area_sq_ft: f64,
    pub baseline_type: String,
    /// "Lawn" when the baseline is the lawn stand-in, else the type name
    pub baseline_label: String,
    pub target_type: String,
    pub baseline_gallons: f64,
    pub target_gallons: f64,
    pub gallons_saved: f64,
    pub cost_saved: f64,
    /// Two-bar comparison: current lawn vs. target
    pub comparison: Vec<ComparisonBar>,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonBar {
    pub label: String,
    pub gallons_per_year: f64,
}

impl SavingsReport {
    /// Overview without a scenario (demand table and options only)
    pub fn overview(engine: &WaterSavingsEngine) -> Self {
        let demand = engine
            .type_demand()
            .ranked()
            .into_iter()
            .map(|entry| DemandRow {
                plant_type: entry.primary_type.to_string(),
                inches_per_year: entry.inches_per_year,
                plant_count: engine
                    .plant_factors()
                    .get(entry.primary_type)
                    .map_or(0, |f| f.plant_count),
            })
            .collect();

        Self {
            rate_label: engine.rate_label().to_string(),
            tier_rate_per_hcf: engine.calculator().tier_rate_per_hcf(),
            annual_et_inches: engine.annual_et().inches,
            demand,
            conversion_options: engine
                .conversion_options()
                .iter()
                .map(PrimaryType::to_string)
                .collect(),
            scenario: None,
        }
    }

    /// Overview plus the evaluated scenario
    pub fn for_scenario(engine: &WaterSavingsEngine, scenario: &Scenario) -> Result<Self> {
        let result = engine.compare(scenario)?;
        let examples = engine.examples(scenario.target, engine.example_limit())?.to_vec();

        let mut report = Self::overview(engine);
        report.scenario = Some(ScenarioSummary::new(scenario, &result, examples));
        Ok(report)
    }
}

impl ScenarioSummary {
    pub fn new(scenario: &Scenario, result: &SavingsResult, examples: Vec<String>) -> Self {
        let baseline_label = if scenario.baseline == LAWN_BASELINE {
            "Lawn".to_string()
        } else {
            scenario.baseline.to_string()
        };

        Self {
            area_sq_ft: scenario.area_sq_ft,
            baseline_type: scenario.baseline.to_string(),
            baseline_label: baseline_label.clone(),
            target_type: scenario.target.to_string(),
            baseline_gallons: result.baseline_gallons,
            target_gallons: result.target_gallons,
            gallons_saved: result.gallons_saved,
            cost_saved: result.cost_saved,
            comparison: vec![
                ComparisonBar {
                    label: format!("Current {}", baseline_label),
                    gallons_per_year: result.baseline_gallons,
                },
                ComparisonBar {
                    label: scenario.target.to_string(),
                    gallons_per_year: result.target_gallons,
                },
            ],
            examples,
        }
    }
}
