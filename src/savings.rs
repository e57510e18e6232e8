//! Savings Calculator
//!
//! Converts per-type depth demand into annual volume and cost for one
//! user scenario. Pure: no state is touched, so a rejected input leaves the
//! cached demand table exactly as it was.

use serde::Serialize;

use crate::error::{Result, SavingsError};
use crate::estimator::TypeDemand;
use crate::normalizer::{PrimaryType, LAWN_BASELINE};

/// Gallons in one inch of water over one square foot
pub const GALLONS_PER_SQFT_INCH: f64 = 0.623;

/// Gallons in one hundred cubic feet (HCF), the billing unit
pub const GALLONS_PER_HCF: f64 = 748.0;

/// Parse a user-entered area in square feet
///
/// # Errors
/// `InvalidArea` for blank, non-numeric, non-finite, zero or negative input.
pub fn parse_area(input: &str) -> Result<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SavingsError::invalid_area(input, "area is required"));
    }

    let area: f64 = trimmed
        .parse()
        .map_err(|_| SavingsError::invalid_area(input, "please enter a valid number for square footage"))?;

    validate_area(area).map_err(|_| SavingsError::invalid_area(input, area_problem(area)))
}

/// Check an already-numeric area
pub fn validate_area(area: f64) -> Result<f64> {
    if area.is_finite() && area > 0.0 {
        Ok(area)
    } else {
        Err(SavingsError::invalid_area(area.to_string(), area_problem(area)))
    }
}

fn area_problem(area: f64) -> &'static str {
    if !area.is_finite() {
        "area must be a finite number"
    } else {
        "area must be greater than zero"
    }
}

/// One user comparison: convert `area_sq_ft` from `baseline` to `target`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Scenario {
    pub area_sq_ft: f64,
    pub baseline: PrimaryType,
    pub target: PrimaryType,
}

impl Scenario {
    pub fn new(area_sq_ft: f64, baseline: PrimaryType, target: PrimaryType) -> Result<Self> {
        Ok(Self {
            area_sq_ft: validate_area(area_sq_ft)?,
            baseline,
            target,
        })
    }

    /// Replace lawn with `target`
    pub fn lawn_conversion(area_sq_ft: f64, target: PrimaryType) -> Result<Self> {
        Self::new(area_sq_ft, LAWN_BASELINE, target)
    }
}

/// Annual volumes and cost for one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SavingsResult {
    pub baseline_gallons: f64,
    pub target_gallons: f64,
    /// Negative when the target needs more water than the baseline
    pub gallons_saved: f64,
    pub cost_saved: f64,
}

/// Applies the fixed conversions and the configured tier rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsCalculator {
    tier_rate_per_hcf: f64,
}

impl SavingsCalculator {
    pub fn new(tier_rate_per_hcf: f64) -> Self {
        Self { tier_rate_per_hcf }
    }

    pub fn tier_rate_per_hcf(&self) -> f64 {
        self.tier_rate_per_hcf
    }

    pub fn cost_per_gallon(&self) -> f64 {
        self.tier_rate_per_hcf / GALLONS_PER_HCF
    }

    /// Annual gallons for `depth_inches` of demand over `area_sq_ft`
    pub fn gallons(depth_inches: f64, area_sq_ft: f64) -> f64 {
        depth_inches * area_sq_ft * GALLONS_PER_SQFT_INCH
    }

    /// Evaluate a scenario against the demand table
    ///
    /// # Errors
    /// `UnknownPlantType` if either type is missing from `demand`;
    /// `InvalidArea` if the scenario was built without validation or the
    /// area is so large that a volume overflows.
    pub fn calculate(&self, demand: &TypeDemand, scenario: &Scenario) -> Result<SavingsResult> {
        let area = validate_area(scenario.area_sq_ft)?;
        let baseline_depth = demand.get(scenario.baseline)?;
        let target_depth = demand.get(scenario.target)?;

        let baseline_gallons = Self::gallons(baseline_depth, area);
        let target_gallons = Self::gallons(target_depth, area);
        let gallons_saved = baseline_gallons - target_gallons;
        let cost_saved = gallons_saved * self.cost_per_gallon();

        let all_finite = [baseline_gallons, target_gallons, gallons_saved, cost_saved]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(SavingsError::invalid_area(area.to_string(), "area too large"));
        }

        Ok(SavingsResult {
            baseline_gallons,
            target_gallons,
            gallons_saved,
            cost_saved,
        })
    }

    /// Lawn-to-`target` comparison, the dashboard's only scenario
    pub fn compare_lawn(
        &self,
        demand: &TypeDemand,
        area_sq_ft: f64,
        target: PrimaryType,
    ) -> Result<SavingsResult> {
        self.calculate(demand, &Scenario::lawn_conversion(area_sq_ft, target)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evapotranspiration::AnnualEt;
    use crate::normalizer::{NormalizedPlant, PlantFactorTable};
    use approx::assert_relative_eq;

    fn demand() -> TypeDemand {
        let plants = [
            NormalizedPlant { botanical_name: None, primary_type: PrimaryType::OrnamentalGrass, coefficient: 0.80 },
            NormalizedPlant { botanical_name: None, primary_type: PrimaryType::Shrub, coefficient: 0.20 },
            // Thirstier than lawn
            NormalizedPlant { botanical_name: None, primary_type: PrimaryType::Vine, coefficient: 0.90 },
        ];
        let factors = PlantFactorTable::from_plants(&plants).unwrap();
        let et = AnnualEt { inches: 40.0, observations: 365, dropped: 0 };
        TypeDemand::estimate(&factors, &et)
    }

    #[test]
    fn test_worked_example() {
        let calc = SavingsCalculator::new(5.50);
        let result = calc.compare_lawn(&demand(), 1000.0, PrimaryType::Shrub).unwrap();

        assert_relative_eq!(result.baseline_gallons, 19_936.0, epsilon = 1e-6);
        assert_relative_eq!(result.target_gallons, 4_984.0, epsilon = 1e-6);
        assert_relative_eq!(result.gallons_saved, 14_952.0, epsilon = 1e-6);
        assert_relative_eq!(result.cost_saved, 14_952.0 * 5.50 / 748.0, epsilon = 1e-9);
        assert_relative_eq!(result.cost_saved, 109.94, epsilon = 0.05);
    }

    #[test]
    fn test_linear_in_area() {
        let calc = SavingsCalculator::new(5.50);
        let demand = demand();
        let single = calc.compare_lawn(&demand, 750.0, PrimaryType::Shrub).unwrap();
        let double = calc.compare_lawn(&demand, 1500.0, PrimaryType::Shrub).unwrap();

        assert_eq!(double.baseline_gallons, 2.0 * single.baseline_gallons);
        assert_eq!(double.target_gallons, 2.0 * single.target_gallons);
        assert_eq!(double.gallons_saved, 2.0 * single.gallons_saved);
        assert_eq!(double.cost_saved, 2.0 * single.cost_saved);
    }

    #[test]
    fn test_same_type_saves_exactly_zero() {
        let calc = SavingsCalculator::new(5.50);
        let scenario = Scenario::new(1234.5, PrimaryType::Shrub, PrimaryType::Shrub).unwrap();
        let result = calc.calculate(&demand(), &scenario).unwrap();
        assert_eq!(result.gallons_saved, 0.0);
        assert_eq!(result.cost_saved, 0.0);
    }

    #[test]
    fn test_thirstier_target_gives_negative_savings() {
        let calc = SavingsCalculator::new(5.50);
        let result = calc.compare_lawn(&demand(), 100.0, PrimaryType::Vine).unwrap();
        assert!(result.gallons_saved < 0.0);
        assert!(result.cost_saved < 0.0);
    }

    #[test]
    fn test_unknown_type_is_an_error() {
        let calc = SavingsCalculator::new(5.50);
        let err = calc.compare_lawn(&demand(), 100.0, PrimaryType::Bulb).unwrap_err();
        assert!(matches!(err, SavingsError::UnknownPlantType(_)));
    }

    #[test]
    fn test_parse_area() {
        assert_eq!(parse_area(" 1000 ").unwrap(), 1000.0);
        assert_eq!(parse_area("12.5").unwrap(), 12.5);

        for bad in ["abc", "-5", "0", "", "   ", "NaN", "inf", "1,000"] {
            let err = parse_area(bad).unwrap_err();
            assert!(err.is_recoverable(), "expected InvalidArea for {:?}", bad);
        }
    }

    #[test]
    fn test_overflowing_area_is_rejected() {
        let calc = SavingsCalculator::new(5.50);
        let demand = demand();
        let area = parse_area("1e307").unwrap();

        let err = calc.compare_lawn(&demand, area, PrimaryType::Shrub).unwrap_err();
        assert!(matches!(err, SavingsError::InvalidArea { .. }));
        assert!(err.is_recoverable());

        // Same type on both sides still overflows each volume
        let scenario = Scenario::new(area, PrimaryType::OrnamentalGrass, PrimaryType::OrnamentalGrass).unwrap();
        assert!(calc.calculate(&demand, &scenario).is_err());
    }

    #[test]
    fn test_scenario_rejects_non_positive_area() {
        assert!(Scenario::lawn_conversion(0.0, PrimaryType::Shrub).is_err());
        assert!(Scenario::lawn_conversion(-5.0, PrimaryType::Shrub).is_err());
        assert!(Scenario::lawn_conversion(f64::NAN, PrimaryType::Shrub).is_err());
    }
}
