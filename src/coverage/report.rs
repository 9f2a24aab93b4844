use std::sync::LazyLock;

use regex::Regex;

// SAFETY: static pattern, checked by tests.
static TOTAL_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*Total.+?([\d.]+)\s*$").expect("valid regex"));

/// Aggregate percentage from the first `Total` line of a coverage report.
///
/// The last number on that line is the total column. `None` when no line
/// matches or the captured text is not a number.
#[must_use]
pub fn parse_total(report: &str) -> Option<f64> {
    let caps = TOTAL_LINE.captures(report)?;
    let total = caps[1].parse::<f64>().ok()?;
    tracing::debug!(total, "parsed coverage total");
    Some(total)
}

/// `total >= threshold`, compared as numbers.
#[must_use]
pub fn meets_threshold(total: f64, threshold: f64) -> bool {
    total >= threshold
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
