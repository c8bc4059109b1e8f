//! Continuous distributions: exponential and normal.

use clap::ValueEnum;
use pstat_common::{
    require_finite, CalculationResult, ChartData, ChartKind, Error, Evaluation, Rate, Result,
    SeriesOptions,
};
use pstat_math::{bisect, complementary_error_function, error_function};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::fmt4;
use crate::series::{exponential_window, line_series, normal_window};

/// Bisection iterations for the inverse normal query.
pub const INVERSE_ITERATIONS: u32 = 60;

/// Half-width, in σ, of the inverse normal search bracket.
pub const INVERSE_SPAN_SIGMAS: f64 = 10.0;

// ── Exponential ─────────────────────────────────────────────────────────

fn non_negative(name: &str, x: f64) -> Result<f64> {
    let x = require_finite(name, x)?;
    if x < 0.0 {
        return Err(Error::domain(format!(
            "{name} must be non-negative for an exponential variable, got {x}"
        )));
    }
    Ok(x)
}

/// f(x) = λ e^(-λx).
pub fn exponential_pdf(lambda: f64, x: f64) -> Result<f64> {
    let lambda = Rate::new("lambda", lambda)?.value();
    let x = non_negative("x", x)?;
    Ok(lambda * (-lambda * x).exp())
}

/// F(x) = 1 - e^(-λx).
pub fn exponential_cdf(lambda: f64, x: f64) -> Result<f64> {
    let lambda = Rate::new("lambda", lambda)?.value();
    let x = non_negative("x", x)?;
    Ok(-(-lambda * x).exp_m1())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ExponentialMode {
    /// Density f(x).
    Density,
    /// P(X < x).
    LessThan,
    /// P(X > x).
    GreaterThan,
    /// P(a < X < b).
    Between,
}

/// What to compute for an exponential variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ExponentialQuery {
    Density { x: f64 },
    LessThan { x: f64 },
    GreaterThan { x: f64 },
    Between { a: f64, b: f64 },
}

impl ExponentialQuery {
    /// Build a query from a mode, a point, and an optional upper bound.
    ///
    /// `Between` uses `x` as the lower bound and requires `b`.
    pub fn from_parts(mode: ExponentialMode, x: f64, b: Option<f64>) -> Result<Self> {
        Ok(match mode {
            ExponentialMode::Density => ExponentialQuery::Density { x },
            ExponentialMode::LessThan => ExponentialQuery::LessThan { x },
            ExponentialMode::GreaterThan => ExponentialQuery::GreaterThan { x },
            ExponentialMode::Between => {
                let b = b.ok_or_else(|| {
                    Error::domain("between requires an upper bound b")
                })?;
                ExponentialQuery::Between { a: x, b }
            }
        })
    }

    pub fn mode(&self) -> ExponentialMode {
        match self {
            ExponentialQuery::Density { .. } => ExponentialMode::Density,
            ExponentialQuery::LessThan { .. } => ExponentialMode::LessThan,
            ExponentialQuery::GreaterThan { .. } => ExponentialMode::GreaterThan,
            ExponentialQuery::Between { .. } => ExponentialMode::Between,
        }
    }

    fn upper_point(&self) -> f64 {
        match *self {
            ExponentialQuery::Density { x }
            | ExponentialQuery::LessThan { x }
            | ExponentialQuery::GreaterThan { x } => x,
            ExponentialQuery::Between { b, .. } => b,
        }
    }
}

/// Density, lower tail, upper tail, or interval probability.
pub fn exponential_query(lambda: f64, query: &ExponentialQuery) -> Result<f64> {
    match *query {
        ExponentialQuery::Density { x } => exponential_pdf(lambda, x),
        ExponentialQuery::LessThan { x } => exponential_cdf(lambda, x),
        ExponentialQuery::GreaterThan { x } => {
            let lambda = Rate::new("lambda", lambda)?.value();
            let x = non_negative("x", x)?;
            Ok((-lambda * x).exp())
        }
        ExponentialQuery::Between { a, b } => {
            let lambda = Rate::new("lambda", lambda)?.value();
            let a = non_negative("a", a)?;
            let b = non_negative("b", b)?;
            if b < a {
                return Err(Error::range(format!(
                    "upper bound b ({b}) must not be below lower bound a ({a})"
                )));
            }
            Ok((-lambda * a).exp() - (-lambda * b).exp())
        }
    }
}

pub fn evaluate_exponential(
    lambda: f64,
    query: &ExponentialQuery,
    opts: &SeriesOptions,
) -> Result<Evaluation> {
    let value = exponential_query(lambda, query)?;
    let l = fmt4(lambda);
    let formula = match *query {
        ExponentialQuery::Density { x } => {
            format!("f({x4}) = {l} × e^(-{l} × {x4})", x4 = fmt4(x))
        }
        ExponentialQuery::LessThan { x } => {
            format!("P(X < {x4}) = 1 - e^(-{l} × {x4})", x4 = fmt4(x))
        }
        ExponentialQuery::GreaterThan { x } => {
            format!("P(X > {x4}) = e^(-{l} × {x4})", x4 = fmt4(x))
        }
        ExponentialQuery::Between { a, b } => format!(
            "P({a4} < X < {b4}) = e^(-{l} × {a4}) - e^(-{l} × {b4})",
            a4 = fmt4(a),
            b4 = fmt4(b)
        ),
    };
    let label = match query.mode() {
        ExponentialMode::Density => "density, not a probability".to_string(),
        _ => format!("mean = 1/λ = {}", fmt4(1.0 / lambda)),
    };
    debug!(lambda, ?query, value, "exponential");

    let (lo, hi) = exponential_window(lambda, query.upper_point())?;
    let points = line_series(lo, hi, opts.line_samples, |x| lambda * (-lambda * x).exp());
    Ok(Evaluation::new(
        CalculationResult::new(value, formula).with_label(label),
        ChartData::series(ChartKind::Line, points),
    ))
}

// ── Normal ──────────────────────────────────────────────────────────────

const SQRT_2PI: f64 = 2.506_628_274_631_000_7;

fn standard_cdf(z: f64) -> f64 {
    if z < 0.0 {
        0.5 * complementary_error_function(-z / std::f64::consts::SQRT_2)
    } else {
        0.5 * (1.0 + error_function(z / std::f64::consts::SQRT_2))
    }
}

fn density(x: f64, mu: f64, sigma: f64) -> f64 {
    let z = (x - mu) / sigma;
    (-0.5 * z * z).exp() / (sigma * SQRT_2PI)
}

struct NormalParams {
    mu: f64,
    sigma: f64,
}

impl NormalParams {
    fn new(mu: f64, sigma: f64) -> Result<Self> {
        Ok(Self {
            mu: require_finite("mu", mu)?,
            sigma: Rate::new("sigma", sigma)?.value(),
        })
    }

    fn cdf(&self, x: f64) -> f64 {
        standard_cdf(self.z(x))
    }

    fn z(&self, x: f64) -> f64 {
        (x - self.mu) / self.sigma
    }
}

/// Normal density at x.
pub fn normal_pdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    let params = NormalParams::new(mu, sigma)?;
    let x = require_finite("x", x)?;
    Ok(density(x, params.mu, params.sigma))
}

/// P(X ≤ x) = ½ [1 + erf((x - μ) / (σ√2))].
pub fn normal_cdf(x: f64, mu: f64, sigma: f64) -> Result<f64> {
    let params = NormalParams::new(mu, sigma)?;
    let x = require_finite("x", x)?;
    Ok(params.cdf(x))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum NormalMode {
    /// P(X < x).
    LessThan,
    /// P(X > x).
    GreaterThan,
    /// P(a < X < b).
    Between,
    /// x such that P(X < x) = p.
    Inverse,
}

/// What to compute for a normal variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum NormalQuery {
    LessThan { x: f64 },
    GreaterThan { x: f64 },
    Between { a: f64, b: f64 },
    Inverse { p: f64 },
}

impl NormalQuery {
    /// Build a query from a mode and whichever parameters were supplied.
    ///
    /// `Between` uses `x` as the lower bound and `b` as the upper bound.
    pub fn from_parts(
        mode: NormalMode,
        x: Option<f64>,
        b: Option<f64>,
        p: Option<f64>,
    ) -> Result<Self> {
        let need = |value: Option<f64>, name: &str| {
            value.ok_or_else(|| Error::domain(format!("{name} is required for this query")))
        };
        Ok(match mode {
            NormalMode::LessThan => NormalQuery::LessThan { x: need(x, "x")? },
            NormalMode::GreaterThan => NormalQuery::GreaterThan { x: need(x, "x")? },
            NormalMode::Between => NormalQuery::Between {
                a: need(x, "x (lower bound)")?,
                b: need(b, "b (upper bound)")?,
            },
            NormalMode::Inverse => NormalQuery::Inverse { p: need(p, "p")? },
        })
    }

    pub fn mode(&self) -> NormalMode {
        match self {
            NormalQuery::LessThan { .. } => NormalMode::LessThan,
            NormalQuery::GreaterThan { .. } => NormalMode::GreaterThan,
            NormalQuery::Between { .. } => NormalMode::Between,
            NormalQuery::Inverse { .. } => NormalMode::Inverse,
        }
    }
}

/// Tail, interval, or inverse query for X ~ N(μ, σ²).
///
/// For `Inverse` the returned value is the quantile x, found by
/// [`INVERSE_ITERATIONS`] bisection steps over μ ± 10σ; callers should
/// expect the accuracy of the error-function approximation, not an exact
/// closed form.
pub fn normal_query(mu: f64, sigma: f64, query: &NormalQuery) -> Result<f64> {
    let params = NormalParams::new(mu, sigma)?;
    match *query {
        NormalQuery::LessThan { x } => Ok(params.cdf(require_finite("x", x)?)),
        NormalQuery::GreaterThan { x } => {
            let z = params.z(require_finite("x", x)?);
            Ok(standard_cdf(-z))
        }
        NormalQuery::Between { a, b } => {
            let a = require_finite("a", a)?;
            let b = require_finite("b", b)?;
            if b < a {
                return Err(Error::range(format!(
                    "upper bound b ({b}) must not be below lower bound a ({a})"
                )));
            }
            Ok((params.cdf(b) - params.cdf(a)).max(0.0))
        }
        NormalQuery::Inverse { p } => {
            let p = require_finite("p", p)?;
            if p <= 0.0 || p >= 1.0 {
                return Err(Error::domain(format!(
                    "p must lie strictly between 0 and 1 for an inverse query, got {p}"
                )));
            }
            let span = INVERSE_SPAN_SIGMAS * params.sigma;
            Ok(bisect(
                |x| params.cdf(x),
                p,
                params.mu - span,
                params.mu + span,
                INVERSE_ITERATIONS,
            ))
        }
    }
}

pub fn evaluate_normal(
    mu: f64,
    sigma: f64,
    query: &NormalQuery,
    opts: &SeriesOptions,
) -> Result<Evaluation> {
    let value = normal_query(mu, sigma, query)?;
    let z = |x: f64| (x - mu) / sigma;
    let (result, marks) = match *query {
        NormalQuery::LessThan { x } => (
            CalculationResult::new(
                value,
                format!(
                    "P(X < {x4}) = Φ(({x4} - {}) / {}) = Φ({})",
                    fmt4(mu),
                    fmt4(sigma),
                    fmt4(z(x)),
                    x4 = fmt4(x)
                ),
            ),
            vec![x],
        ),
        NormalQuery::GreaterThan { x } => (
            CalculationResult::new(
                value,
                format!("P(X > {}) = 1 - Φ({})", fmt4(x), fmt4(z(x))),
            ),
            vec![x],
        ),
        NormalQuery::Between { a, b } => (
            CalculationResult::new(
                value,
                format!(
                    "P({} < X < {}) = Φ({}) - Φ({})",
                    fmt4(a),
                    fmt4(b),
                    fmt4(z(b)),
                    fmt4(z(a))
                ),
            ),
            vec![a, b],
        ),
        NormalQuery::Inverse { p } => (
            CalculationResult::new(
                value,
                format!(
                    "x = μ + σ·Φ⁻¹(p) = {} + {} × {}",
                    fmt4(mu),
                    fmt4(sigma),
                    fmt4(z(value))
                ),
            )
            .with_label(format!(
                "P(X < x) = {}; bisection, {INVERSE_ITERATIONS} iterations",
                fmt4(p)
            )),
            vec![value],
        ),
    };
    debug!(mu, sigma, ?query, value, "normal");

    let (mut lo, mut hi) = normal_window(mu, sigma, opts.normal_window_sigmas);
    for mark in marks {
        lo = lo.min(mark);
        hi = hi.max(mark);
    }
    let points = line_series(lo, hi, opts.line_samples, |x| density(x, mu, sigma));
    Ok(Evaluation::new(result, ChartData::series(ChartKind::Line, points)))
}
