//! Text and JSON rendering of comparison results
//!
//! All rounding happens here. The core hands over full-precision scores;
//! the verdict printed is taken from the *rounded* score so the sentence
//! never contradicts the number in it.

use iaqrank_core::{
    Comparison, DistributionSummary, MetricScore, ReferenceSet, SensorType, Verdict,
};
use serde::Serialize;

/// `<value><unit>` with a space only for word-like units
pub fn with_unit(value: f64, sensor: SensorType) -> String {
    let unit = sensor.unit();
    if unit.starts_with('%') || unit.starts_with('°') {
        format!("{value}{unit}")
    } else {
        format!("{value} {unit}")
    }
}

/// Round half to even, so 50.5 prints as 50 and 51.5 as 52
fn round_to(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round_ties_even() / factor
}

/// One verdict sentence
pub fn sentence(result: &MetricScore, precision: usize) -> String {
    let reading = with_unit(result.value, result.sensor);
    let label = result.sensor.label();

    match Verdict::from_score(round_to(result.score.score, precision)) {
        Verdict::Better(p) => format!(
            "your {label} reading of {reading} is in the top {p:.precision$}% of buildings!"
        ),
        Verdict::Worse(p) => format!(
            "your {label} reading of {reading} is worse than {p:.precision$}% of buildings."
        ),
    }
}

/// All sentences plus notices for skipped sensors
pub fn render_comparison(comparison: &Comparison, precision: usize) -> String {
    let mut lines: Vec<String> = comparison
        .results
        .iter()
        .map(|r| sentence(r, precision))
        .collect();

    for skipped in &comparison.skipped {
        lines.push(format!("skipped: {skipped}"));
    }

    if comparison.is_empty() {
        lines.push("no comparisons possible with the available reference data".to_string());
    }

    lines.join("\n")
}

#[derive(Serialize)]
struct ComparisonJson<'a> {
    results: &'a [MetricScore],
    skipped: Vec<String>,
}

/// Comparison as pretty JSON
pub fn comparison_json(comparison: &Comparison) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ComparisonJson {
        results: &comparison.results,
        skipped: comparison.skipped.iter().map(ToString::to_string).collect(),
    })
}

#[derive(Serialize)]
struct SummaryRow {
    sensor: SensorType,
    unit: &'static str,
    #[serde(flatten)]
    summary: DistributionSummary,
}

fn summary_rows(references: &ReferenceSet) -> Vec<SummaryRow> {
    references
        .iter()
        .filter_map(|(sensor, dist)| {
            dist.summary().map(|summary| SummaryRow {
                sensor,
                unit: sensor.unit(),
                summary,
            })
        })
        .collect()
}

/// Table of distribution summaries
pub fn render_summary(references: &ReferenceSet) -> String {
    let rows = summary_rows(references);
    if rows.is_empty() {
        return "no reference data available".to_string();
    }

    let mut out = format!(
        "{:<12} {:>8} {:>10} {:>10} {:>10} {:>10}  unit",
        "sensor", "samples", "min", "median", "mean", "max"
    );
    for row in rows {
        let s = row.summary;
        out.push_str(&format!(
            "\n{:<12} {:>8} {:>10.2} {:>10.2} {:>10.2} {:>10.2}  {}",
            row.sensor.key(),
            s.count,
            s.min,
            s.median,
            s.mean,
            s.max,
            row.unit
        ));
    }
    out
}

/// Distribution summaries as pretty JSON
pub fn summary_json(references: &ReferenceSet) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&summary_rows(references))
}
