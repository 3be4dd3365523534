//! Confidence intervals for realised RTP samples.
//!
//! Small samples (`n <= 30`) use the Student's t distribution with `n - 1`
//! degrees of freedom; larger samples use the standard normal approximation.
//! The critical value is taken at cumulative probability
//! `1 - (1 - level) / 2`, giving a two-sided interval.

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};
use statrs::statistics::Statistics;

use crate::error::StatsError;

/// Largest sample size that uses the Student's t critical value.
pub const SMALL_SAMPLE_LIMIT: usize = 30;

/// Two-sided confidence interval around a sample mean.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfidenceInterval {
    /// Sample mean.
    pub mean: f64,
    /// Lower bound.
    pub lower: f64,
    /// Upper bound.
    pub upper: f64,
    /// Confidence level the bounds were computed at.
    pub level: f64,
}

impl ConfidenceInterval {
    /// Returns `upper - lower`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns half the width, the margin around the mean.
    #[inline]
    pub fn half_width(&self) -> f64 {
        self.width() / 2.0
    }

    /// Returns `true` if `value` lies within the closed interval.
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        (self.lower..=self.upper).contains(&value)
    }
}

/// Computes the mean and a two-sided confidence interval of `values`.
///
/// A single value yields the degenerate interval `[x, x]`.
///
/// # Errors
///
/// - `StatsError::EmptySample` if `values` is empty
/// - `StatsError::InvalidLevel` if `level` is not strictly inside (0, 1)
///
/// # Examples
///
/// ```rust
/// use multgen_checker::confidence_interval;
///
/// let ci = confidence_interval(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.95).unwrap();
/// assert_eq!(ci.mean, 3.0);
/// assert!((ci.lower - 1.037).abs() < 0.01);
/// assert!((ci.upper - 4.963).abs() < 0.01);
/// ```
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn confidence_interval(values: &[f64], level: f64) -> Result<ConfidenceInterval, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptySample);
    }
    if !(level > 0.0 && level < 1.0) {
        return Err(StatsError::InvalidLevel(level));
    }

    let n = values.len();
    if n == 1 {
        let x = values[0];
        return Ok(ConfidenceInterval {
            mean: x,
            lower: x,
            upper: x,
            level,
        });
    }

    let mean = values.iter().mean();
    let std_dev = values.iter().variance().sqrt();
    let standard_error = std_dev / (n as f64).sqrt();
    let margin = critical_value(n, level)? * standard_error;

    Ok(ConfidenceInterval {
        mean,
        lower: mean - margin,
        upper: mean + margin,
        level,
    })
}

/// Two-sided critical value for a sample of size `n >= 2`.
fn critical_value(n: usize, level: f64) -> Result<f64, StatsError> {
    let p = 1.0 - (1.0 - level) / 2.0;

    if n <= SMALL_SAMPLE_LIMIT {
        let t = StudentsT::new(0.0, 1.0, (n - 1) as f64)
            .map_err(|e| StatsError::Distribution(e.to_string()))?;
        Ok(t.inverse_cdf(p))
    } else {
        let z = Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution(e.to_string()))?;
        Ok(z.inverse_cdf(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // ========================================
    // Reference values
    // ========================================

    #[test]
    fn test_small_sample_reference() {
        let ci = confidence_interval(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.95).unwrap();

        assert_relative_eq!(ci.mean, 3.0);
        assert_relative_eq!(ci.lower, 1.037, epsilon = 0.01);
        assert_relative_eq!(ci.upper, 4.963, epsilon = 0.01);
        assert_eq!(ci.level, 0.95);
    }

    #[test]
    fn test_students_t_quantile() {
        // t(0.975; 4) = 2.7764
        assert_relative_eq!(critical_value(5, 0.95).unwrap(), 2.7764, epsilon = 1e-3);
        // t(0.95; 29) = 1.6991
        assert_relative_eq!(critical_value(30, 0.90).unwrap(), 1.6991, epsilon = 1e-3);
    }

    #[test]
    fn test_normal_quantile_above_limit() {
        assert_relative_eq!(critical_value(31, 0.95).unwrap(), 1.95996, epsilon = 1e-4);
        assert_relative_eq!(critical_value(1_000, 0.99).unwrap(), 2.57583, epsilon = 1e-4);
    }

    // ========================================
    // Degenerate inputs
    // ========================================

    #[test]
    fn test_single_value_is_degenerate() {
        for level in [0.01, 0.5, 0.95, 0.999] {
            let ci = confidence_interval(&[0.42], level).unwrap();
            assert_eq!((ci.mean, ci.lower, ci.upper), (0.42, 0.42, 0.42));
        }
    }

    #[test]
    fn test_equal_values_collapse() {
        for level in [0.9, 0.95, 0.99] {
            let ci = confidence_interval(&[7.5, 7.5, 7.5, 7.5], level).unwrap();
            assert_eq!(ci.mean, 7.5);
            assert_eq!(ci.lower, 7.5);
            assert_eq!(ci.upper, 7.5);
        }
    }

    #[test]
    fn test_empty_sample_is_an_error() {
        assert_eq!(
            confidence_interval(&[], 0.95).unwrap_err(),
            StatsError::EmptySample
        );
    }

    #[test]
    fn test_level_outside_unit_interval_is_an_error() {
        for level in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let err = confidence_interval(&[1.0, 2.0], level).unwrap_err();
            assert!(matches!(err, StatsError::InvalidLevel(_)));
        }
    }

    // ========================================
    // Large-sample regime
    // ========================================

    #[test]
    fn test_jittered_large_sample_is_narrow() {
        let mut rng = StdRng::seed_from_u64(100);
        let values: Vec<f64> = (0..1_000)
            .map(|_| 100.0 + rng.gen_range(-0.1..=0.1))
            .collect();

        let ci = confidence_interval(&values, 0.95).unwrap();
        assert!(ci.width() < 0.01, "width {}", ci.width());
        assert!(ci.contains(ci.mean));
        assert_relative_eq!(ci.mean, 100.0, epsilon = 0.01);
    }

    #[test]
    fn test_idempotent() {
        let values = [0.91, 0.97, 0.88, 1.02, 0.95];
        assert_eq!(
            confidence_interval(&values, 0.9),
            confidence_interval(&values, 0.9)
        );
    }
}
