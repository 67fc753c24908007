//! Rendering of outcome charts

use anyhow::{Context, Result};
use serde::Serialize;
use swroll_domain::{OutcomeChart, TraitRollFormula};

/// Chart of one roll, as printed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollReport {
    pub formula: String,
    /// Success with or without raises
    pub success_probability: f64,
    pub chart: OutcomeChart,
}

impl RollReport {
    pub fn new(formula: &TraitRollFormula, chart: OutcomeChart) -> Self {
        Self {
            formula: formula.to_string(),
            success_probability: chart.success_probability(),
            chart,
        }
    }
}

const SUCCESS_TOTAL_LABEL: &str = "Any success";

/// Outcome labels down the side, one percentage column per roll.
///
/// All reports must share the same tier layout.
pub fn render_table(reports: &[RollReport]) -> String {
    let Some(first) = reports.first() else {
        return String::new();
    };

    let labels: Vec<String> = first.chart.bars().iter().map(|bar| bar.label()).collect();
    let label_width = labels
        .iter()
        .map(String::len)
        .chain(std::iter::once(SUCCESS_TOTAL_LABEL.len()))
        .max()
        .unwrap_or(0);
    let column_width = reports
        .iter()
        .map(|report| report.formula.len())
        .max()
        .unwrap_or(0)
        .max(7);

    let mut lines = Vec::with_capacity(labels.len() + 2);
    let mut header = format!("{:<label_width$}", "");
    for report in reports {
        header.push_str(&format!("  {:>column_width$}", report.formula));
    }
    lines.push(header.trim_end().to_string());

    for (index, label) in labels.iter().enumerate() {
        let mut line = format!("{:<label_width$}", label);
        for report in reports {
            let cell = report
                .chart
                .bars()
                .get(index)
                .map(|bar| format!("{:.1}%", bar.percent()))
                .unwrap_or_default();
            line.push_str(&format!("  {:>column_width$}", cell));
        }
        lines.push(line);
    }

    let mut line = format!("{:<label_width$}", SUCCESS_TOTAL_LABEL);
    for report in reports {
        let cell = format!("{:.1}%", 100.0 * report.success_probability);
        line.push_str(&format!("  {:>column_width$}", cell));
    }
    lines.push(line);

    lines.join("\n")
}

pub fn render_json(reports: &[RollReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("serializing outcome charts")
}
