use crate::models::{ChartPoint, TestResult};

/// Points above this percentage are drawn in the accent colour.
pub const HIGHLIGHT_THRESHOLD: f64 = 80.0;

/// Turns test results into chart points, keeping input order.
///
/// A result with `max_score <= 0` charts as `0%` and is flagged
/// `degenerate`, so it never counts as highlighted.
pub fn project(results: &[TestResult]) -> Vec<ChartPoint> {
    results
        .iter()
        .map(|result| {
            let degenerate = result.max_score <= 0.0;
            ChartPoint {
                label: chart_label(&result.name).to_string(),
                percentage: percentage(result.score, result.max_score),
                display_fraction: format!(
                    "{}/{}",
                    format_score(result.score),
                    format_score(result.max_score)
                ),
                degenerate,
            }
        })
        .collect()
}

/// The part of a test name before the first `:`.
pub fn chart_label(name: &str) -> &str {
    name.split(':').next().unwrap_or(name)
}

pub fn percentage(score: f64, max_score: f64) -> f64 {
    if max_score <= 0.0 {
        return 0.0;
    }
    100.0 * score / max_score
}

fn format_score(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
