//! Factorials, combinations, and permutations.
//!
//! All loops are iterative. `combination` and `permutation` build their
//! result as a running product instead of dividing full factorials, then
//! round to the nearest integer to remove floating-point drift.

use pstat_common::{Error, Result};

/// Largest n whose factorial is finite in f64.
pub const MAX_FACTORIAL_ARG: u64 = 170;

/// Below this, `ln_factorial` sums logarithms exactly; above it uses Stirling.
const LN_FACTORIAL_EXACT_LIMIT: u64 = 256;

/// n! for a non-negative integral n.
///
/// Fails with a domain error for negative, fractional, or non-finite input,
/// and when the result would overflow f64 (n > 170).
pub fn factorial(n: f64) -> Result<f64> {
    if !n.is_finite() || n < 0.0 {
        return Err(Error::domain(format!(
            "factorial is undefined for {n}: argument must be a non-negative integer"
        )));
    }
    if n.fract() != 0.0 {
        return Err(Error::domain(format!(
            "factorial is undefined for {n}: argument must be an integer"
        )));
    }
    if n > MAX_FACTORIAL_ARG as f64 {
        return Err(Error::domain(format!(
            "{n}! overflows a double; maximum argument is {MAX_FACTORIAL_ARG}"
        )));
    }
    let n = n as u64;
    if n <= 1 {
        return Ok(1.0);
    }
    let mut result = 1.0_f64;
    for i in 2..=n {
        result *= i as f64;
    }
    Ok(result)
}

/// ln(n!).
///
/// Exact summation for small n, Stirling series with three correction terms
/// beyond that (relative error well under 1e-15 in that range).
pub fn ln_factorial(n: u64) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    if n < LN_FACTORIAL_EXACT_LIMIT {
        return (2..=n).map(|i| (i as f64).ln()).sum();
    }
    let x = n as f64;
    let x2 = x * x;
    x * x.ln() - x + 0.5 * (2.0 * std::f64::consts::PI * x).ln() + 1.0 / (12.0 * x)
        - 1.0 / (360.0 * x * x2)
        + 1.0 / (1260.0 * x * x2 * x2)
}

/// C(n, k) = n! / (k! (n-k)!), rounded. Zero when k > n.
///
/// May return +inf when the true value exceeds f64 range; use
/// [`ln_combination`] for large arguments.
pub fn combination(n: u64, k: u64) -> f64 {
    if k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    let mut result = 1.0_f64;
    for i in 1..=k {
        result = result * (n - k + i) as f64 / i as f64;
    }
    result.round()
}

/// ln C(n, k). Negative infinity when k > n.
pub fn ln_combination(n: u64, k: u64) -> f64 {
    if k > n {
        return f64::NEG_INFINITY;
    }
    ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)
}

/// P(n, r) = n! / (n-r)!, rounded. Zero when r > n.
pub fn permutation(n: u64, r: u64) -> f64 {
    if r > n {
        return 0.0;
    }
    let mut result = 1.0_f64;
    for i in (n - r + 1)..=n {
        result *= i as f64;
    }
    result.round()
}
