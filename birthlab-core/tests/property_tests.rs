//! Property tests for comparator invariants.
//!
//! Uses proptest to verify:
//! 1. Verdict consistency: `significant == (p_value < alpha)`
//! 2. Symmetry: swapping the groups and flipping the direction keeps p and negates t
//! 3. Determinism: the same inputs give the same result
//! 4. p-values are probabilities and two-sided p is twice the smaller tail

use birthlab_core::data::GroupSample;
use birthlab_core::stats::{
    compare_samples, interpret_default, Alternative, Histogram, TestOptions, VarianceAssumption,
};
use proptest::prelude::*;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_sample() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec((0.0..10_000.0_f64).prop_map(|v| v.round()), 2..40)
}

fn arb_alternative() -> impl Strategy<Value = Alternative> {
    prop_oneof![
        Just(Alternative::TwoSided),
        Just(Alternative::Greater),
        Just(Alternative::Less),
    ]
}

fn arb_variance() -> impl Strategy<Value = VarianceAssumption> {
    prop_oneof![Just(VarianceAssumption::Pooled), Just(VarianceAssumption::Welch)]
}

fn arb_alpha() -> impl Strategy<Value = f64> {
    0.001..0.999_f64
}

fn options(alternative: Alternative, alpha: f64, variance: VarianceAssumption) -> TestOptions {
    TestOptions {
        alternative,
        alpha,
        variance,
    }
}

fn not_constant(values: &[f64]) -> bool {
    values.iter().any(|&v| v != values[0])
}

// ── 1. Verdict consistency ───────────────────────────────────────────

proptest! {
    /// The significance flag always agrees with the p-value and alpha.
    #[test]
    fn significant_matches_p_below_alpha(
        a in arb_sample(),
        b in arb_sample(),
        alt in arb_alternative(),
        alpha in arb_alpha(),
        variance in arb_variance(),
    ) {
        prop_assume!(not_constant(&a) && not_constant(&b));
        let result = compare_samples(
            &GroupSample::new("A", a),
            &GroupSample::new("B", b),
            &options(alt, alpha, variance),
        ).unwrap();

        prop_assert_eq!(result.significant, result.p_value < alpha);
        prop_assert!((0.0..=1.0).contains(&result.p_value));
        prop_assert!(interpret_default(&result).is_ok());
    }
}

// ── 2. Symmetry ──────────────────────────────────────────────────────

proptest! {
    /// Comparing B to A with the flipped direction is the same hypothesis.
    #[test]
    fn swapping_groups_negates_t_and_keeps_p(
        a in arb_sample(),
        b in arb_sample(),
        alt in arb_alternative(),
        variance in arb_variance(),
    ) {
        prop_assume!(not_constant(&a) && not_constant(&b));
        let forward = compare_samples(
            &GroupSample::new("A", a.clone()),
            &GroupSample::new("B", b.clone()),
            &options(alt, 0.05, variance),
        ).unwrap();
        let backward = compare_samples(
            &GroupSample::new("B", b),
            &GroupSample::new("A", a),
            &options(alt.flipped(), 0.05, variance),
        ).unwrap();

        prop_assert_eq!(forward.t_statistic, -backward.t_statistic);
        prop_assert!((forward.p_value - backward.p_value).abs() < 1e-9);
        prop_assert!((forward.degrees_of_freedom - backward.degrees_of_freedom).abs() < 1e-9);
    }
}

// ── 3. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn same_inputs_same_result(
        a in arb_sample(),
        b in arb_sample(),
        alt in arb_alternative(),
        alpha in arb_alpha(),
    ) {
        prop_assume!(not_constant(&a) || not_constant(&b));
        let opts = options(alt, alpha, VarianceAssumption::Pooled);
        let first = compare_samples(&GroupSample::new("A", a.clone()), &GroupSample::new("B", b.clone()), &opts);
        let second = compare_samples(&GroupSample::new("A", a), &GroupSample::new("B", b), &opts);
        match (first, second) {
            (Ok(x), Ok(y)) => prop_assert_eq!(x, y),
            (Err(x), Err(y)) => prop_assert_eq!(x.to_string(), y.to_string()),
            _ => prop_assert!(false, "one run failed and the other succeeded"),
        }
    }
}

// ── 4. Tail relationships ────────────────────────────────────────────

proptest! {
    /// Two-sided p is twice the smaller one-sided p (capped at 1).
    #[test]
    fn two_sided_is_twice_smaller_tail(a in arb_sample(), b in arb_sample()) {
        prop_assume!(not_constant(&a) && not_constant(&b));
        let run = |alt| compare_samples(
            &GroupSample::new("A", a.clone()),
            &GroupSample::new("B", b.clone()),
            &options(alt, 0.05, VarianceAssumption::Pooled),
        ).unwrap().p_value;

        let two = run(Alternative::TwoSided);
        let greater = run(Alternative::Greater);
        let less = run(Alternative::Less);

        prop_assert!((greater + less - 1.0).abs() < 1e-9);
        prop_assert!((two - (2.0 * greater.min(less)).min(1.0)).abs() < 1e-9);
    }

    /// Histogram counts cover every value and densities integrate to one.
    #[test]
    fn histogram_accounts_for_every_value(values in arb_sample(), bins in 1usize..50) {
        let hist = Histogram::density(&values, bins, None).unwrap();
        prop_assert_eq!(hist.counts.iter().sum::<usize>(), values.len());
        let area: f64 = hist.densities.iter().map(|d| d * hist.bin_width()).sum();
        prop_assert!((area - 1.0).abs() < 1e-9);
    }
}
