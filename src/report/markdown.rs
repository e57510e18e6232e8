use crate::report::types::{SavingsReport, ScenarioSummary};
use crate::utils::{format_dollars, format_gallons, format_thousands};

/// Markdown formatter for savings reports
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format report as markdown
    pub fn format(report: &SavingsReport) -> String {
        let mut md = String::with_capacity(2048);

        md.push_str("# California Lawn Conversion Water Savings\n\n");

        if let Some(scenario) = &report.scenario {
            Self::format_scenario(&mut md, scenario);
        }

        // Per-type demand (chart data)
        md.push_str("## Annual Water Demand by Plant Type\n\n");
        md.push_str(&format!(
            "Reference ET: {:.2} in/year\n\n",
            report.annual_et_inches
        ));
        md.push_str("| Plant Type | Demand (in/year) | Plants |\n");
        md.push_str("|------------|------------------|--------|\n");
        for row in &report.demand {
            md.push_str(&format!(
                "| {} | {:.2} | {} |\n",
                row.plant_type, row.inches_per_year, row.plant_count
            ));
        }
        md.push('\n');

        if report.scenario.is_none() && !report.conversion_options.is_empty() {
            md.push_str("## Convert To\n\n");
            for option in &report.conversion_options {
                md.push_str(&format!("- {}\n", option));
            }
            md.push('\n');
        }

        md.push_str(&format!(
            "*Water cost calculations use {} rate: {} per HCF*\n\n",
            report.rate_label,
            format_dollars(report.tier_rate_per_hcf)
        ));

        md.push_str("---\n");
        md.push_str("**Data Sources**\n");
        md.push_str("- WUCOLS IV (Water Use Classification of Landscape Species)\n");
        md.push_str("- California CIMIS ETo Data\n");
        md.push_str(&format!("- {} Water Rate Schedule\n", report.rate_label));

        md
    }

    fn format_scenario(md: &mut String, scenario: &ScenarioSummary) {
        md.push_str("## Results\n\n");
        md.push_str(&format!(
            "Converting {} sq ft of {} to {}\n\n",
            format_thousands(scenario.area_sq_ft, 0),
            scenario.baseline_type,
            scenario.target_type
        ));

        md.push_str(&format!(
            "- **Annual {} Use:** {}\n",
            scenario.baseline_label,
            format_gallons(scenario.baseline_gallons)
        ));
        md.push_str(&format!(
            "- **{} Use:** {}\n\n",
            scenario.target_type,
            format_gallons(scenario.target_gallons)
        ));

        if scenario.gallons_saved >= 0.0 {
            md.push_str(&format!(
                "💧 Annual Water Savings: {} gallons\n\n",
                format_thousands(scenario.gallons_saved, 0)
            ));
            md.push_str(&format!(
                "💰 Estimated Annual Cost Savings: {}\n\n",
                format_dollars(scenario.cost_saved)
            ));
        } else {
            md.push_str(&format!(
                "⚠️ {} uses more water than the current {}: {} gallons more per year \
                 ({} more in water cost)\n\n",
                scenario.target_type,
                scenario.baseline_label.to_lowercase(),
                format_thousands(-scenario.gallons_saved, 0),
                format_dollars(-scenario.cost_saved)
            ));
        }

        md.push_str("### Water Use Comparison\n\n");
        md.push_str("| | Gallons per Year |\n");
        md.push_str("|---|---|\n");
        for bar in &scenario.comparison {
            md.push_str(&format!(
                "| {} | {} |\n",
                bar.label,
                format_thousands(bar.gallons_per_year, 0)
            ));
        }
        md.push('\n');

        if !scenario.examples.is_empty() {
            md.push_str(&format!("### Example {} Plants\n\n", scenario.target_type));
            for name in &scenario.examples {
                md.push_str(&format!("- *{}*\n", name));
            }
            md.push('\n');
        }
    }
}
