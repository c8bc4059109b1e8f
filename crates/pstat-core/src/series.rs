//! Companion series generation for charts.
//!
//! Discrete distributions are tabulated over an integer range; continuous
//! densities are sampled evenly over a display window.

use std::ops::RangeInclusive;

use pstat_common::{Error, Result, SeriesPoint};

/// Upper bound on the number of discrete points the engine will tabulate.
pub const MAX_DISCRETE_SUPPORT: u64 = 1_000_000;

/// Fail if summing or plotting `len` discrete points is unreasonable.
pub fn check_support(name: &str, len: u64) -> Result<()> {
    if len > MAX_DISCRETE_SUPPORT {
        return Err(Error::domain(format!(
            "{name} spans {len} points; at most {MAX_DISCRETE_SUPPORT} can be evaluated"
        )));
    }
    Ok(())
}

/// Number of integers in `start..=end`, saturating at `u64::MAX`.
pub fn support_len(start: u64, end: u64) -> u64 {
    if start > end {
        return 0;
    }
    (end - start).saturating_add(1)
}

/// Narrow `support` to at most [`MAX_DISCRETE_SUPPORT`] points around `focus`.
///
/// Supports that already fit are returned unchanged. Otherwise the window is
/// centred on `focus` (clamped into the support) and shifted inward where it
/// would run past either end.
pub fn display_window(support: RangeInclusive<u64>, focus: u64) -> RangeInclusive<u64> {
    let (lo, hi) = (*support.start(), *support.end());
    if support_len(lo, hi) <= MAX_DISCRETE_SUPPORT {
        return support;
    }
    let focus = focus.clamp(lo, hi);
    let span = MAX_DISCRETE_SUPPORT - 1;
    let start = focus.saturating_sub(span / 2).max(lo).min(hi - span);
    start..=start + span
}

/// Tabulate `(k, f(k))` for every k in `range`.
pub fn discrete_series<F>(range: RangeInclusive<u64>, f: F) -> Result<Vec<SeriesPoint>>
where
    F: Fn(u64) -> Result<f64>,
{
    let (start, end) = (*range.start(), *range.end());
    if start > end {
        return Ok(Vec::new());
    }
    check_support("display range", support_len(start, end))?;
    range
        .map(|k| f(k).map(|y| SeriesPoint::new(k as f64, y)))
        .collect()
}

/// Sample `f` at `samples` evenly spaced points over `[lo, hi]`, endpoints
/// included. Fewer than two samples is treated as two.
pub fn line_series<F>(lo: f64, hi: f64, samples: usize, f: F) -> Vec<SeriesPoint>
where
    F: Fn(f64) -> f64,
{
    let samples = samples.max(2);
    let step = (hi - lo) / (samples - 1) as f64;
    (0..samples)
        .map(|i| {
            let x = if i == samples - 1 { hi } else { lo + step * i as f64 };
            SeriesPoint::new(x, f(x))
        })
        .collect()
}

/// μ ± `sigmas`·σ.
pub fn normal_window(mu: f64, sigma: f64, sigmas: f64) -> (f64, f64) {
    let half = sigma * sigmas;
    (mu - half, mu + half)
}

/// `[0, max(2·x, 5/λ)]`: twice the queried point, and at least five mean
/// lifetimes so the decay is visible.
///
/// A λ so small that the window is no longer finite is a Domain error.
pub fn exponential_window(lambda: f64, x: f64) -> Result<(f64, f64)> {
    let hi = (2.0 * x).max(5.0 / lambda);
    if !hi.is_finite() {
        return Err(Error::domain(format!(
            "lambda = {lambda:e} gives an unbounded display window"
        )));
    }
    Ok((0.0, hi))
}
