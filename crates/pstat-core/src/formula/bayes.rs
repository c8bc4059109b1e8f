//! Bayes' theorem, directly and via the law of total probability.

use pstat_common::{
    CalculationResult, ChartData, ChartKind, Error, Evaluation, Probability, Result,
};
use tracing::trace;

use super::{fmt4, PROBABILITY_TOLERANCE};

/// P(A|B) = P(B|A) · P(A) / P(B).
pub fn bayes_posterior(p_b_given_a: f64, p_a: f64, p_b: f64) -> Result<f64> {
    let p_b_given_a = Probability::new("p_b_given_a", p_b_given_a)?.value();
    let p_a = Probability::new("p_a", p_a)?.value();
    let p_b = Probability::new("p_b", p_b)?;
    if p_b.is_zero() {
        return Err(Error::division_by_zero("P(B) cannot be 0"));
    }
    let p_b = p_b.value();
    let joint = p_b_given_a * p_a;
    if joint > p_b + PROBABILITY_TOLERANCE {
        return Err(Error::range(format!(
            "P(B|A) × P(A) ({joint}) cannot exceed P(B) ({p_b})"
        )));
    }
    Ok((joint / p_b).min(1.0))
}

/// Posterior with the evidence probability it was normalized by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalProbabilityPosterior {
    /// P(B) = P(B|A)P(A) + P(B|¬A)(1 - P(A)).
    pub p_b: f64,
    /// P(A|B).
    pub posterior: f64,
}

/// Bayes over the binary partition {A, ¬A}.
pub fn bayes_with_total_probability(
    p_a: f64,
    p_b_given_a: f64,
    p_b_given_not_a: f64,
) -> Result<TotalProbabilityPosterior> {
    let p_a = Probability::new("p_a", p_a)?;
    let p_b_given_a = Probability::new("p_b_given_a", p_b_given_a)?.value();
    let p_b_given_not_a = Probability::new("p_b_given_not_a", p_b_given_not_a)?.value();

    let joint = p_b_given_a * p_a.value();
    let p_b = joint + p_b_given_not_a * p_a.complement().value();
    if p_b == 0.0 {
        return Err(Error::division_by_zero(
            "total probability of the evidence P(B) is 0",
        ));
    }
    Ok(TotalProbabilityPosterior {
        p_b,
        posterior: (joint / p_b).min(1.0),
    })
}

pub fn evaluate_bayes(p_b_given_a: f64, p_a: f64, p_b: f64) -> Result<Evaluation> {
    let value = bayes_posterior(p_b_given_a, p_a, p_b)?;
    trace!(p_b_given_a, p_a, p_b, value, "bayes posterior");
    let result = CalculationResult::new(
        value,
        format!(
            "P(A|B) = [P(B|A) × P(A)] / P(B) = [{} × {}] / {}",
            fmt4(p_b_given_a),
            fmt4(p_a),
            fmt4(p_b)
        ),
    );
    let chart = ChartData::categories(
        ChartKind::Bar,
        vec![
            ("P(B|A)", p_b_given_a),
            ("P(A)", p_a),
            ("P(B)", p_b),
            ("P(A|B)", value),
        ],
    );
    Ok(Evaluation::new(result, chart))
}

pub fn evaluate_bayes_total(p_a: f64, p_b_given_a: f64, p_b_given_not_a: f64) -> Result<Evaluation> {
    let outcome = bayes_with_total_probability(p_a, p_b_given_a, p_b_given_not_a)?;
    trace!(p_b = outcome.p_b, posterior = outcome.posterior, "bayes via total probability");
    let result = CalculationResult::new(
        outcome.posterior,
        format!(
            "P(A|B) = P(B|A)P(A) / [P(B|A)P(A) + P(B|¬A)(1 - P(A))] = ({} × {}) / {}",
            fmt4(p_b_given_a),
            fmt4(p_a),
            fmt4(outcome.p_b)
        ),
    )
    .with_label(format!("P(B) = {}", fmt4(outcome.p_b)));
    let chart = ChartData::categories(
        ChartKind::Bar,
        vec![
            ("P(A)", p_a),
            ("P(B|A)", p_b_given_a),
            ("P(B|¬A)", p_b_given_not_a),
            ("P(B)", outcome.p_b),
            ("P(A|B)", outcome.posterior),
        ],
    );
    Ok(Evaluation::new(result, chart))
}
