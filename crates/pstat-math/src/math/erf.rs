//! Error function approximation.
//!
//! Abramowitz & Stegun 7.1.26: a rational approximation in
//! `t = 1 / (1 + p|x|)` with maximum absolute error about 1.5e-7.

const P: f64 = 0.327_591_1;
const A1: f64 = 0.254_829_592;
const A2: f64 = -0.284_496_736;
const A3: f64 = 1.421_413_741;
const A4: f64 = -1.453_152_027;
const A5: f64 = 1.061_405_429;

/// erfc(|x|) for the non-negative half-line, straight from the rational form.
fn upper_tail(x: f64) -> f64 {
    let t = 1.0 / (1.0 + P * x);
    let poly = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t;
    poly * (-x * x).exp()
}

/// erf(x), odd in x, exactly 0 at the origin.
pub fn error_function(x: f64) -> f64 {
    if x == 0.0 {
        return 0.0;
    }
    if x.is_nan() {
        return f64::NAN;
    }
    x.signum() * (1.0 - upper_tail(x.abs()))
}

/// erfc(x) = 1 - erf(x), without cancellation for large positive x.
pub fn complementary_error_function(x: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    if x >= 0.0 {
        upper_tail(x)
    } else {
        2.0 - upper_tail(-x)
    }
}
