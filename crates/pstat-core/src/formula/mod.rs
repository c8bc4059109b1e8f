//! Formula evaluation engine.
//!
//! Each topic module exposes two layers:
//! - scalar functions (`binomial_pmf`, `conditional_probability`, ...) that
//!   validate their inputs and return a number
//! - `evaluate_*` functions that wrap the scalar in a [`CalculationResult`]
//!   with a substituted formula string and build the companion chart
//!
//! Everything here is pure: no I/O, no shared state.
//!
//! [`CalculationResult`]: pstat_common::CalculationResult

pub mod bayes;
pub mod conditional;
pub mod continuous;
pub mod discrete;
pub mod elementary;

pub use bayes::{bayes_posterior, bayes_with_total_probability, TotalProbabilityPosterior};
pub use conditional::{conditional_probability, contingency_table_query, ContingencyOutcome};
pub use continuous::{
    exponential_cdf, exponential_pdf, exponential_query, normal_cdf, normal_pdf, normal_query,
    ExponentialMode, ExponentialQuery, NormalMode, NormalQuery,
};
pub use discrete::{
    binomial_cumulative, binomial_pmf, negative_binomial_pmf, poisson_cumulative, poisson_pmf,
    poisson_tail_bound, DiscreteMode,
};
pub use elementary::{
    complement, compound_probability, independence_check, simple_probability, union_probability,
    SimpleOutcome,
};

/// Absolute tolerance for "equal" probabilities.
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Four-decimal rendering used inside formula strings.
pub(crate) fn fmt4(value: f64) -> String {
    format!("{value:.4}")
}
