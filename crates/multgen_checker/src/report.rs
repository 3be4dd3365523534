//! Text rendering of verification results.
//!
//! Machine-readable lines go to stdout; the human-readable form is meant for
//! diagnostics.

use crate::error::StatsError;
use crate::simulation::SimulationReport;
use crate::stats::ConfidenceInterval;

/// Confidence levels reported for multi-participant runs.
pub const REFERENCE_LEVELS: [f64; 3] = [0.90, 0.95, 0.99];

/// Renders `mean lower upper level`, each in shortest round-trip form.
///
/// # Examples
/// ```
/// use multgen_checker::{interval_line, ConfidenceInterval};
///
/// let ci = ConfidenceInterval { mean: 0.95, lower: 0.9, upper: 1.0, level: 0.99 };
/// assert_eq!(interval_line(&ci), "0.95 0.9 1 0.99");
/// ```
pub fn interval_line(ci: &ConfidenceInterval) -> String {
    format!("{} {} {} {}", ci.mean, ci.lower, ci.upper, ci.level)
}

/// Renders `mean ±half-width level%`, rounded to the precision warranted by
/// the half-width with at most four decimals.
///
/// # Examples
/// ```
/// use multgen_checker::{human_readable, ConfidenceInterval};
///
/// let ci = ConfidenceInterval { mean: 0.95123, lower: 0.93123, upper: 0.97123, level: 0.95 };
/// assert_eq!(human_readable(&ci), "0.95 ±0.02 95%");
/// ```
pub fn human_readable(ci: &ConfidenceInterval) -> String {
    let mut precision = 1e-4;
    let mut decimals: i32 = 4;
    let half = ci.half_width().max(precision);
    while precision * 10.0 <= half {
        precision *= 10.0;
        decimals -= 1;
    }
    let decimals = decimals.max(0) as usize;

    format!(
        "{:.*} ±{:.*} {}%",
        decimals,
        (ci.mean / precision).round() * precision,
        decimals,
        (half / precision).round() * precision,
        percent(ci.level)
    )
}

/// Intervals of the report's realised RTPs at every reference level.
///
/// # Errors
///
/// Returns `StatsError::EmptySample` if no participant placed a stake.
pub fn reference_intervals(
    report: &SimulationReport,
) -> Result<Vec<ConfidenceInterval>, StatsError> {
    REFERENCE_LEVELS
        .iter()
        .map(|&level| report.confidence_interval(level))
        .collect()
}

#[inline]
fn percent(level: f64) -> f64 {
    (level * 1e4).round() / 1e2
}
