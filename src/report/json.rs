use crate::report::types::SavingsReport;
use serde_json;

/// JSON formatter for savings reports
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format report as pretty-printed JSON
    pub fn format(report: &SavingsReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(report)
    }

    /// Format report as compact JSON (no whitespace)
    pub fn format_compact(report: &SavingsReport) -> Result<String, serde_json::Error> {
        serde_json::to_string(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::DemandRow;

    fn overview() -> SavingsReport {
        SavingsReport {
            rate_label: "LADWP Tier 2 Residential".to_string(),
            tier_rate_per_hcf: 5.5,
            annual_et_inches: 40.0,
            demand: vec![DemandRow {
                plant_type: "Ornamental Grass".to_string(),
                inches_per_year: 32.0,
                plant_count: 3,
            }],
            conversion_options: vec![],
            scenario: None,
        }
    }

    #[test]
    fn test_format_json() {
        let json = JsonFormatter::format(&overview()).unwrap();

        assert!(json.contains("\"tier_rate_per_hcf\": 5.5"));
        assert!(json.contains("\"plant_type\": \"Ornamental Grass\""));
        assert!(json.contains("\"scenario\": null"));
    }

    #[test]
    fn test_format_compact() {
        let json = JsonFormatter::format_compact(&overview()).unwrap();

        // Compact format should have no newlines (except potentially in strings)
        assert!(!json.contains("\n  "));

        let parsed: SavingsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.demand.len(), 1);
    }
}
