//! Discrete distributions: binomial, negative binomial, Poisson.
//!
//! Binomial coefficients are taken directly while they fit comfortably in a
//! double and in log space beyond that. The Poisson PMF is always evaluated
//! in log space so `k!` never overflows.

use clap::ValueEnum;
use pstat_common::{
    CalculationResult, ChartData, ChartKind, Count, Error, Evaluation, Probability, Rate, Result,
    SeriesOptions,
};
use pstat_math::{combination, ln_combination, ln_factorial};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::fmt4;
use crate::series::{check_support, discrete_series, display_window, support_len};

/// Largest n for which C(n, k) is computed directly.
const DIRECT_COMBINATION_LIMIT: u64 = 1000;

/// Which part of a discrete distribution to accumulate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DiscreteMode {
    /// P(X = k).
    #[default]
    Exact,
    /// P(X ≥ k).
    AtLeast,
    /// P(X ≤ k).
    AtMost,
}

impl DiscreteMode {
    pub fn symbol(self) -> &'static str {
        match self {
            DiscreteMode::Exact => "=",
            DiscreteMode::AtLeast => "≥",
            DiscreteMode::AtMost => "≤",
        }
    }
}

/// C(n, k) · p^a · q^b.
fn combination_weighted(n: u64, k: u64, p: f64, a: u64, q: f64, b: u64) -> f64 {
    if n <= DIRECT_COMBINATION_LIMIT {
        return combination(n, k) * p.powf(a as f64) * q.powf(b as f64);
    }
    // Skip zero exponents so 0 · ln(0) does not turn into NaN.
    let ln_p = if a == 0 { 0.0 } else { a as f64 * p.ln() };
    let ln_q = if b == 0 { 0.0 } else { b as f64 * q.ln() };
    (ln_combination(n, k) + ln_p + ln_q).exp()
}

fn binomial_term(n: u64, p: f64, k: u64) -> f64 {
    combination_weighted(n, k, p, k, 1.0 - p, n - k)
}

fn poisson_term(lambda: f64, k: u64) -> f64 {
    (k as f64 * lambda.ln() - lambda - ln_factorial(k)).exp()
}

/// P(X = k) for X ~ Binomial(n, p). Zero when k < 0 or k > n.
pub fn binomial_pmf(n: i64, p: f64, k: i64) -> Result<f64> {
    let n = Count::new("n", n)?.get();
    let p = Probability::new("p", p)?.value();
    match u64::try_from(k) {
        Ok(k) if k <= n => Ok(binomial_term(n, p, k)),
        _ => Ok(0.0),
    }
}

/// P(X = k), P(X ≥ k) or P(X ≤ k) for X ~ Binomial(n, p).
pub fn binomial_cumulative(n: i64, p: f64, k: i64, mode: DiscreteMode) -> Result<f64> {
    let n_count = Count::new("n", n)?.get();
    let p = Probability::new("p", p)?.value();
    let range = match mode {
        DiscreteMode::Exact => return binomial_pmf(n, p, k),
        DiscreteMode::AtLeast => {
            let start = k.max(0) as u64;
            if start > n_count {
                return Ok(0.0);
            }
            start..=n_count
        }
        DiscreteMode::AtMost => {
            if k < 0 {
                return Ok(0.0);
            }
            0..=(k as u64).min(n_count)
        }
    };
    check_support("binomial sum", n_count + 1)?;
    let sum: f64 = range.map(|i| binomial_term(n_count, p, i)).sum();
    Ok(sum.clamp(0.0, 1.0))
}

/// P(X = x) failures before the r-th success, success probability p:
/// C(x + r - 1, x) · p^r · (1 - p)^x.
pub fn negative_binomial_pmf(r: i64, p: f64, x: i64) -> Result<f64> {
    if r <= 0 {
        return Err(Error::domain(format!(
            "r must be a positive integer, got {r}"
        )));
    }
    let x = Count::new("x", x)?.get();
    let p = Probability::new("p", p)?.value();
    let r = r as u64;
    Ok(combination_weighted(x + r - 1, x, p, r, 1.0 - p, x))
}

/// P(X = k) = λ^k e^(-λ) / k! for X ~ Poisson(λ).
pub fn poisson_pmf(lambda: f64, k: i64) -> Result<f64> {
    let lambda = Rate::new("lambda", lambda)?.value();
    let k = Count::new("k", k)?.get();
    Ok(poisson_term(lambda, k))
}

/// Last index summed for a Poisson upper tail: `ceil(λ + 10·√λ)`.
///
/// The mass beyond it is negligible for display purposes; the tail sum is a
/// truncation, not the exact infinite series.
pub fn poisson_tail_bound(lambda: f64) -> u64 {
    (lambda + 10.0 * lambda.sqrt()).ceil() as u64
}

/// P(X = k), P(X ≤ k) or P(X ≥ k) for X ~ Poisson(λ).
///
/// `AtLeast` sums from k through [`poisson_tail_bound`] (or just P(X = k)
/// when k is already past the bound).
pub fn poisson_cumulative(lambda: f64, k: i64, mode: DiscreteMode) -> Result<f64> {
    let lambda = Rate::new("lambda", lambda)?.value();
    let k = Count::new("k", k)?.get();
    let (start, end) = match mode {
        DiscreteMode::Exact => return Ok(poisson_term(lambda, k)),
        DiscreteMode::AtMost => (0, k),
        DiscreteMode::AtLeast => (k, poisson_tail_bound(lambda).max(k)),
    };
    check_support("poisson sum", support_len(start, end))?;
    let sum: f64 = (start..=end).map(|i| poisson_term(lambda, i)).sum();
    Ok(sum.clamp(0.0, 1.0))
}

fn sum_formula(mode: DiscreteMode, k: i64, lo: u64, hi: u64, term: &str) -> String {
    format!("P(X {} {k}) = Σ_{{i={lo}}}^{{{hi}}} {term}", mode.symbol())
}

/// The companion series spans the full support 0..=n, narrowed around k when
/// n is too large to tabulate.
pub fn evaluate_binomial(n: i64, p: f64, k: i64, mode: DiscreteMode) -> Result<Evaluation> {
    let value = binomial_cumulative(n, p, k, mode)?;
    let n = n as u64;
    let q = 1.0 - p;
    let formula = match mode {
        DiscreteMode::Exact if k < 0 || k as u64 > n => {
            format!("P(X = {k}) = 0 (k outside 0..={n})")
        }
        DiscreteMode::Exact => format!(
            "P(X = {k}) = C({n}, {k}) × {}^{k} × {}^{}",
            fmt4(p),
            fmt4(q),
            n - k as u64
        ),
        DiscreteMode::AtLeast => sum_formula(
            mode,
            k,
            k.max(0) as u64,
            n,
            &format!("C({n}, i) × {}^i × {}^({n} - i)", fmt4(p), fmt4(q)),
        ),
        DiscreteMode::AtMost => sum_formula(
            mode,
            k,
            0,
            (k.max(0) as u64).min(n),
            &format!("C({n}, i) × {}^i × {}^({n} - i)", fmt4(p), fmt4(q)),
        ),
    };
    debug!(n, p, k, ?mode, value, "binomial");
    let window = display_window(0..=n, k.max(0) as u64);
    let points = discrete_series(window, |i| Ok(binomial_term(n, p, i)))?;
    Ok(Evaluation::new(
        CalculationResult::new(value, formula),
        ChartData::series(ChartKind::Bar, points),
    ))
}

pub fn evaluate_negative_binomial(r: i64, p: f64, x: i64, opts: &SeriesOptions) -> Result<Evaluation> {
    let value = negative_binomial_pmf(r, p, x)?;
    let (r, x) = (r as u64, x as u64);
    let formula = format!(
        "P(X = {x}) = C({}, {x}) × {}^{r} × {}^{x}",
        x + r - 1,
        fmt4(p),
        fmt4(1.0 - p)
    );
    trace!(r, p, x, value, "negative binomial");
    let end = x.saturating_add(opts.discrete_padding);
    let points = discrete_series(display_window(0..=end, x), |i| {
        Ok(combination_weighted(i + r - 1, i, p, r, 1.0 - p, i))
    })?;
    Ok(Evaluation::new(
        CalculationResult::new(value, formula)
            .with_label(format!("{x} failures before success number {r}")),
        ChartData::series(ChartKind::Bar, points),
    ))
}

pub fn evaluate_poisson(
    lambda: f64,
    k: i64,
    mode: DiscreteMode,
    opts: &SeriesOptions,
) -> Result<Evaluation> {
    let value = poisson_cumulative(lambda, k, mode)?;
    let k_u = k as u64;
    let term = format!("({}^i × e^-{}) / i!", fmt4(lambda), fmt4(lambda));
    let mut result = match mode {
        DiscreteMode::Exact => CalculationResult::new(
            value,
            format!(
                "P(X = {k}) = ({}^{k} × e^-{}) / {k}!",
                fmt4(lambda),
                fmt4(lambda)
            ),
        ),
        DiscreteMode::AtMost => CalculationResult::new(value, sum_formula(mode, k, 0, k_u, &term)),
        DiscreteMode::AtLeast => {
            let bound = poisson_tail_bound(lambda).max(k_u);
            CalculationResult::new(value, sum_formula(mode, k, k_u, bound, &term))
                .with_label(format!("tail truncated at i = {bound}"))
        }
    };
    if result.label.is_none() {
        result = result.with_label(format!("mean = variance = {}", fmt4(lambda)));
    }
    debug!(lambda, k, ?mode, value, "poisson");
    let end = k_u
        .max(lambda.ceil() as u64)
        .saturating_add(opts.discrete_padding);
    let points = discrete_series(display_window(0..=end, k_u), |i| Ok(poisson_term(lambda, i)))?;
    Ok(Evaluation::new(result, ChartData::series(ChartKind::Bar, points)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::MAX_DISCRETE_SUPPORT;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn binomial_pmf_reference() {
        // C(10,3) / 2^10 = 120 / 1024
        assert!(approx_eq(binomial_pmf(10, 0.5, 3).unwrap(), 120.0 / 1024.0, 1e-12));
    }

    #[test]
    fn binomial_pmf_outside_support_is_zero() {
        assert_eq!(binomial_pmf(10, 0.5, -1).unwrap(), 0.0);
        assert_eq!(binomial_pmf(10, 0.5, 11).unwrap(), 0.0);
    }

    #[test]
    fn binomial_pmf_degenerate_p() {
        assert_eq!(binomial_pmf(5, 0.0, 0).unwrap(), 1.0);
        assert_eq!(binomial_pmf(5, 0.0, 1).unwrap(), 0.0);
        assert_eq!(binomial_pmf(5, 1.0, 5).unwrap(), 1.0);
    }

    #[test]
    fn binomial_pmf_validates() {
        assert!(matches!(binomial_pmf(-1, 0.5, 0), Err(Error::Domain(_))));
        assert!(matches!(binomial_pmf(5, 1.5, 0), Err(Error::Domain(_))));
    }

    #[test]
    fn binomial_normalizes() {
        for &n in &[0_i64, 1, 7, 30, 200] {
            let total: f64 = (0..=n).map(|k| binomial_pmf(n, 0.37, k).unwrap()).sum();
            assert!(approx_eq(total, 1.0, 1e-9), "n={n} total={total}");
        }
    }

    #[test]
    fn binomial_log_space_path_normalizes() {
        let n = 2_000;
        let total = binomial_cumulative(n, 0.4, 0, DiscreteMode::AtLeast).unwrap();
        assert!(approx_eq(total, 1.0, 1e-9));
        let direct = binomial_pmf(n, 0.4, 800).unwrap();
        assert!(direct > 0.0 && direct < 0.05);
    }

    #[test]
    fn binomial_cumulative_modes() {
        let at_most = binomial_cumulative(10, 0.5, 3, DiscreteMode::AtMost).unwrap();
        let at_least = binomial_cumulative(10, 0.5, 4, DiscreteMode::AtLeast).unwrap();
        assert!(approx_eq(at_most + at_least, 1.0, 1e-12));
        assert!(approx_eq(at_most, 176.0 / 1024.0, 1e-12));
        assert_eq!(binomial_cumulative(10, 0.5, 11, DiscreteMode::AtLeast).unwrap(), 0.0);
        assert_eq!(binomial_cumulative(10, 0.5, -1, DiscreteMode::AtMost).unwrap(), 0.0);
        assert!(approx_eq(
            binomial_cumulative(10, 0.5, -3, DiscreteMode::AtLeast).unwrap(),
            1.0,
            1e-12
        ));
    }

    #[test]
    fn negative_binomial_reference() {
        // r = 3, p = 0.5, x = 2: C(4,2) · 0.5^3 · 0.5^2 = 6 / 32
        assert!(approx_eq(negative_binomial_pmf(3, 0.5, 2).unwrap(), 6.0 / 32.0, 1e-12));
        // r = 1 reduces to geometric: p (1-p)^x
        assert!(approx_eq(negative_binomial_pmf(1, 0.2, 3).unwrap(), 0.2 * 0.8_f64.powi(3), 1e-12));
    }

    #[test]
    fn negative_binomial_validates() {
        assert!(matches!(negative_binomial_pmf(0, 0.5, 1), Err(Error::Domain(_))));
        assert!(matches!(negative_binomial_pmf(2, 0.5, -1), Err(Error::Domain(_))));
        assert!(matches!(negative_binomial_pmf(2, 1.1, 1), Err(Error::Domain(_))));
    }

    #[test]
    fn poisson_pmf_reference() {
        // λ = 3, k = 2: 9 e^-3 / 2
        let expected = 4.5 * (-3.0_f64).exp();
        assert!(approx_eq(poisson_pmf(3.0, 2).unwrap(), expected, 1e-12));
        assert!(approx_eq(poisson_pmf(2.0, 0).unwrap(), (-2.0_f64).exp(), 1e-15));
    }

    #[test]
    fn poisson_pmf_validates() {
        assert!(matches!(poisson_pmf(0.0, 1), Err(Error::Domain(_))));
        assert!(matches!(poisson_pmf(-1.0, 1), Err(Error::Domain(_))));
        assert!(matches!(poisson_pmf(1.0, -1), Err(Error::Domain(_))));
    }

    #[test]
    fn poisson_pmf_large_k_does_not_overflow() {
        let p = poisson_pmf(200.0, 200).unwrap();
        assert!(p.is_finite() && p > 0.02 && p < 0.03);
    }

    #[test]
    fn poisson_tail_bound_policy() {
        assert_eq!(poisson_tail_bound(4.0), 24);
        assert_eq!(poisson_tail_bound(100.0), 200);
    }

    #[test]
    fn poisson_cumulative_modes() {
        let at_most = poisson_cumulative(4.0, 3, DiscreteMode::AtMost).unwrap();
        let at_least = poisson_cumulative(4.0, 4, DiscreteMode::AtLeast).unwrap();
        assert!(approx_eq(at_most + at_least, 1.0, 1e-6));
        let exact = poisson_cumulative(4.0, 2, DiscreteMode::Exact).unwrap();
        assert!(approx_eq(exact, poisson_pmf(4.0, 2).unwrap(), 0.0));
    }

    #[test]
    fn poisson_at_least_past_bound_is_single_term() {
        let k = 40;
        let tail = poisson_cumulative(4.0, k, DiscreteMode::AtLeast).unwrap();
        assert!(approx_eq(tail, poisson_pmf(4.0, k).unwrap(), 0.0));
    }

    #[test]
    fn poisson_huge_rate_tail_is_refused() {
        assert!(matches!(
            poisson_cumulative(1e20, 0, DiscreteMode::AtLeast),
            Err(Error::Domain(_))
        ));
        assert_eq!(poisson_cumulative(1e20, 0, DiscreteMode::Exact).unwrap(), 0.0);
    }

    #[test]
    fn poisson_huge_rate_evaluates_with_capped_series() {
        let eval = evaluate_poisson(1e20, 0, DiscreteMode::Exact, &SeriesOptions::default()).unwrap();
        assert_eq!(eval.result.value, 0.0);
        let chart = eval.chart.unwrap();
        assert_eq!(chart.points.len() as u64, MAX_DISCRETE_SUPPORT);
        assert_eq!(chart.points[0].x, 0.0);
    }

    #[test]
    fn binomial_large_n_keeps_value_and_windows_series() {
        let n = 2_000_000;
        let k = 1_000_000;
        let eval = evaluate_binomial(n, 0.5, k, DiscreteMode::Exact).unwrap();
        assert!(approx_eq(eval.result.value, binomial_pmf(n, 0.5, k).unwrap(), 1e-15));
        let chart = eval.chart.unwrap();
        assert_eq!(chart.points.len() as u64, MAX_DISCRETE_SUPPORT);
        assert!(chart.points.iter().any(|pt| pt.x == k as f64));
        assert!(chart.points.last().unwrap().x <= n as f64);
    }

    #[test]
    fn negative_binomial_large_x_windows_series() {
        let x = 3_000_000;
        let eval = evaluate_negative_binomial(2, 1e-6, x, &SeriesOptions::default()).unwrap();
        let chart = eval.chart.unwrap();
        assert_eq!(chart.points.len() as u64, MAX_DISCRETE_SUPPORT);
        let at_x = chart.points.iter().find(|pt| pt.x == x as f64).unwrap();
        assert!(approx_eq(at_x.y, eval.result.value, 1e-15));
    }

    #[test]
    fn binomial_evaluation_series_spans_support() {
        let eval = evaluate_binomial(10, 0.5, 3, DiscreteMode::Exact).unwrap();
        assert_eq!(eval.result.formula, "P(X = 3) = C(10, 3) × 0.5000^3 × 0.5000^7");
        let chart = eval.chart.unwrap();
        assert_eq!(chart.points.len(), 11);
        assert_eq!(chart.kind, ChartKind::Bar);
    }

    #[test]
    fn poisson_evaluation_series_is_padded() {
        let opts = SeriesOptions::default();
        let eval = evaluate_poisson(2.0, 5, DiscreteMode::Exact, &opts).unwrap();
        assert_eq!(eval.chart.unwrap().points.len(), 9);

        let eval = evaluate_poisson(10.0, 1, DiscreteMode::AtLeast, &opts).unwrap();
        assert_eq!(eval.result.label.as_deref(), Some("tail truncated at i = 42"));
        assert_eq!(eval.chart.unwrap().points.len(), 14);
    }

    #[test]
    fn negative_binomial_evaluation() {
        let eval = evaluate_negative_binomial(3, 0.5, 2, &SeriesOptions::default()).unwrap();
        assert_eq!(eval.result.formula, "P(X = 2) = C(4, 2) × 0.5000^3 × 0.5000^2");
        let chart = eval.chart.unwrap();
        assert_eq!(chart.points.len(), 6);
        assert!(approx_eq(chart.points[2].y, eval.result.value, 1e-15));
    }
}
