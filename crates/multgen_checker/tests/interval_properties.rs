//! Property tests for the confidence estimator.

use multgen_checker::confidence_interval;
use proptest::prelude::*;

fn sample_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0..2.0f64, 2..80)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_width_grows_with_level(
        values in sample_strategy(),
        a in 0.01..0.99f64,
        b in 0.01..0.99f64,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let narrow = confidence_interval(&values, lo).unwrap();
        let wide = confidence_interval(&values, hi).unwrap();

        prop_assert!(narrow.width() <= wide.width() + 1e-12);
        prop_assert_eq!(narrow.mean, wide.mean);
    }

    #[test]
    fn test_interval_is_centred_on_mean(values in sample_strategy(), level in 0.01..0.99f64) {
        let ci = confidence_interval(&values, level).unwrap();

        prop_assert!(ci.lower <= ci.mean && ci.mean <= ci.upper);
        prop_assert!(((ci.mean - ci.lower) - (ci.upper - ci.mean)).abs() < 1e-9);
    }

    #[test]
    fn test_single_value_for_any_level(x in -1e6..1e6f64, level in 0.0001..0.9999f64) {
        let ci = confidence_interval(&[x], level).unwrap();
        prop_assert_eq!((ci.mean, ci.lower, ci.upper), (x, x, x));
    }

    #[test]
    fn test_invalid_level_is_rejected(values in sample_strategy(), level in 1.0..10.0f64) {
        prop_assert!(confidence_interval(&values, level).is_err());
        prop_assert!(confidence_interval(&values, -level).is_err());
    }
}

/// Alternating `c ± 1` samples keep the spread fixed while `n` grows.
#[test]
fn test_width_shrinks_with_sample_size() {
    let alternating = |n: usize| -> Vec<f64> {
        (0..n)
            .map(|i| if i % 2 == 0 { 9.0 } else { 11.0 })
            .collect()
    };

    let widths: Vec<f64> = (1..=100)
        .map(|half| {
            confidence_interval(&alternating(2 * half), 0.95)
                .unwrap()
                .width()
        })
        .collect();

    assert!(
        widths.windows(2).all(|w| w[1] <= w[0]),
        "widths not monotone: {:?}",
        widths
    );
}
