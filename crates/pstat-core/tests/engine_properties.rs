//! Property-based tests for formula engine invariants.

use proptest::prelude::*;
use pstat_common::{Error, SeriesOptions};
use pstat_core::formula::{
    binomial_pmf, complement, conditional_probability, exponential_cdf, independence_check,
    normal_cdf, normal_query, poisson_cumulative, poisson_pmf, union_probability, DiscreteMode,
    NormalQuery,
};
use pstat_core::{evaluate, CalculationRequest};
use pstat_math::combination;

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn binomial_pmf_sums_to_one(n in 0i64..=60, p in 0.0f64..=1.0) {
        let total: f64 = (0..=n).map(|k| binomial_pmf(n, p, k).unwrap()).sum();
        prop_assert!(approx_eq(total, 1.0, 1e-9), "sum = {total}");
    }

    #[test]
    fn binomial_pmf_outside_support_is_zero(n in 0i64..=40, p in 0.0f64..=1.0, extra in 1i64..=10) {
        prop_assert_eq!(binomial_pmf(n, p, -extra).unwrap(), 0.0);
        prop_assert_eq!(binomial_pmf(n, p, n + extra).unwrap(), 0.0);
    }

    #[test]
    fn cumulative_modes_partition_the_mass(n in 1i64..=50, p in 0.0f64..=1.0, k in 0i64..=50) {
        let at_most = pstat_core::formula::binomial_cumulative(n, p, k, DiscreteMode::AtMost).unwrap();
        let at_least = pstat_core::formula::binomial_cumulative(n, p, k, DiscreteMode::AtLeast).unwrap();
        let exact = binomial_pmf(n, p, k).unwrap();
        prop_assert!(approx_eq(at_most + at_least - exact, 1.0, 1e-9));
    }

    #[test]
    fn combination_is_symmetric(n in 0u64..=300, k in 0u64..=300) {
        prop_assume!(k <= n);
        let left = combination(n, k);
        let right = combination(n, n - k);
        prop_assert!(approx_eq(left, right, left.abs() * 1e-12));
    }

    #[test]
    fn exponential_cdf_is_monotone(lambda in 0.01f64..50.0, x in 0.0f64..20.0, dx in 0.0f64..5.0) {
        let lo = exponential_cdf(lambda, x).unwrap();
        let hi = exponential_cdf(lambda, x + dx).unwrap();
        prop_assert!(lo <= hi);
        prop_assert!((0.0..=1.0).contains(&hi));
    }

    #[test]
    fn normal_cdf_is_one_half_at_the_mean(mu in -1e3f64..1e3, sigma in 1e-3f64..1e3) {
        prop_assert_eq!(normal_cdf(mu, mu, sigma).unwrap(), 0.5);
    }

    #[test]
    fn inverse_normal_round_trips(mu in -100.0f64..100.0, sigma in 0.1f64..50.0, p in 0.001f64..0.999) {
        let x = normal_query(mu, sigma, &NormalQuery::Inverse { p }).unwrap();
        let back = normal_cdf(x, mu, sigma).unwrap();
        prop_assert!(approx_eq(back, p, 1e-4), "p = {p}, back = {back}");
    }

    #[test]
    fn poisson_mass_converges(lambda in 0.1f64..40.0) {
        let bound = (lambda + 15.0 * lambda.sqrt() + 10.0).ceil() as i64;
        let total: f64 = (0..=bound).map(|k| poisson_pmf(lambda, k).unwrap()).sum();
        prop_assert!(approx_eq(total, 1.0, 1e-8), "sum = {total}");
    }

    #[test]
    fn poisson_tails_cover_the_mass(lambda in 0.1f64..30.0, k in 1i64..=40) {
        let below = poisson_cumulative(lambda, k - 1, DiscreteMode::AtMost).unwrap();
        let tail = poisson_cumulative(lambda, k, DiscreteMode::AtLeast).unwrap();
        prop_assert!(below + tail <= 1.0 + 1e-9);
        prop_assert!(below + tail >= 1.0 - 1e-6);
    }

    #[test]
    fn complement_is_an_involution(p in 0.0f64..=1.0) {
        let twice = complement(complement(p).unwrap()).unwrap();
        prop_assert!(approx_eq(twice, p, 1e-15));
    }

    #[test]
    fn union_stays_in_unit_interval(p_a in 0.0f64..=1.0, p_b in 0.0f64..=1.0, t in 0.0f64..=1.0) {
        let p_ab = t * p_a.min(p_b);
        let value = union_probability(p_a, p_b, p_ab).unwrap();
        prop_assert!((0.0..=1.0).contains(&value));
        prop_assert!(value + 1e-12 >= p_a.max(p_b));
    }

    #[test]
    fn probabilities_outside_unit_interval_are_rejected(p in 1.0001f64..10.0) {
        prop_assert!(matches!(complement(p), Err(Error::Domain(_))));
        prop_assert!(matches!(complement(-p), Err(Error::Domain(_))));
    }
}

#[test]
fn independence_textbook_example() {
    assert!(independence_check(0.5, 0.4, 0.2).unwrap());
    assert!(!independence_check(0.5, 0.4, 0.25).unwrap());
}

#[test]
fn conditional_requires_positive_evidence() {
    assert!(matches!(
        conditional_probability(0.0, 0.0),
        Err(Error::DivisionByZero(_))
    ));
}

#[test]
fn every_section_produces_a_result() {
    let requests = [
        r#"{"formula":"simple","favorable":3,"total":10}"#,
        r#"{"formula":"union","p_a":0.5,"p_b":0.4,"p_ab":0.2}"#,
        r#"{"formula":"independence","p_a":0.5,"p_b":0.4,"p_ab":0.2}"#,
        r#"{"formula":"complement","p":0.3}"#,
        r#"{"formula":"conditional","p_intersection":0.2,"p_b":0.4}"#,
        r#"{"formula":"compound","p_a":0.5,"p_b":0.4}"#,
        r#"{"formula":"contingency","ab":20,"a_not_b":30,"not_a_b":10,"not_a_not_b":40}"#,
        r#"{"formula":"bayes","p_b_given_a":0.9,"p_a":0.01,"p_b":0.1}"#,
        r#"{"formula":"bayes_total","p_a":0.01,"p_b_given_a":0.95,"p_b_given_not_a":0.05}"#,
        r#"{"formula":"binomial","n":10,"p":0.5,"k":3,"mode":"at_least"}"#,
        r#"{"formula":"negative_binomial","r":3,"p":0.5,"x":2}"#,
        r#"{"formula":"poisson","lambda":2,"k":1}"#,
        r#"{"formula":"exponential","lambda":0.5,"mode":"less_than","x":2}"#,
        r#"{"formula":"normal","mu":0,"sigma":1,"mode":"between","a":-1,"b":1}"#,
        r#"{"formula":"factorial","n":10}"#,
        r#"{"formula":"combination","n":10,"k":3}"#,
        r#"{"formula":"permutation","n":10,"r":3}"#,
    ];
    let opts = SeriesOptions::default();
    for json in requests {
        let request: CalculationRequest = serde_json::from_str(json).unwrap();
        let eval = evaluate(&request, &opts).unwrap_or_else(|e| panic!("{json}: {e}"));
        assert!(eval.result.value.is_finite(), "{json}");
        assert!(!eval.result.formula.is_empty(), "{json}");
    }
}
