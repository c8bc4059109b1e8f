//! Fixed-iteration bisection.

/// Find x in `[lo, hi]` with `f(x) ≈ target` for a non-decreasing `f`.
///
/// Runs exactly `iterations` halvings and returns the midpoint of the final
/// bracket. If the target lies outside `[f(lo), f(hi)]` the result converges
/// to the nearer endpoint.
pub fn bisect<F>(f: F, target: f64, lo: f64, hi: f64, iterations: u32) -> f64
where
    F: Fn(f64) -> f64,
{
    let (mut lo, mut hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    for _ in 0..iterations {
        let mid = 0.5 * (lo + hi);
        if f(mid) < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
