//! Elementary probability: classical ratio, union, independence, complement,
//! and compound (independent intersection).

use pstat_common::{
    CalculationResult, ChartData, ChartKind, Error, Evaluation, Probability, Result,
};
use tracing::trace;

use super::{fmt4, PROBABILITY_TOLERANCE};

/// Classical probability plus the counts drawn in its pie chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleOutcome {
    pub probability: f64,
    pub favorable: u64,
    pub unfavorable: u64,
}

/// P(A) = favorable / total.
pub fn simple_probability(favorable: u64, total: u64) -> Result<SimpleOutcome> {
    if total == 0 {
        return Err(Error::range("total must be greater than zero"));
    }
    if favorable > total {
        return Err(Error::range(format!(
            "favorable ({favorable}) cannot exceed total ({total})"
        )));
    }
    Ok(SimpleOutcome {
        probability: favorable as f64 / total as f64,
        favorable,
        unfavorable: total - favorable,
    })
}

/// P(A ∪ B) = P(A) + P(B) - P(A ∩ B).
pub fn union_probability(p_a: f64, p_b: f64, p_ab: f64) -> Result<f64> {
    let p_a = Probability::new("p_a", p_a)?.value();
    let p_b = Probability::new("p_b", p_b)?.value();
    let p_ab = Probability::new("p_ab", p_ab)?.value();
    if p_ab > p_a.min(p_b) + PROBABILITY_TOLERANCE {
        return Err(Error::range(format!(
            "P(A ∩ B) ({p_ab}) cannot exceed P(A) ({p_a}) or P(B) ({p_b})"
        )));
    }
    Ok((p_a + p_b - p_ab).clamp(0.0, 1.0))
}

/// True when P(A)·P(B) equals P(A ∩ B) within 1e-9.
pub fn independence_check(p_a: f64, p_b: f64, p_ab: f64) -> Result<bool> {
    let p_a = Probability::new("p_a", p_a)?.value();
    let p_b = Probability::new("p_b", p_b)?.value();
    let p_ab = Probability::new("p_ab", p_ab)?.value();
    Ok((p_a * p_b - p_ab).abs() < PROBABILITY_TOLERANCE)
}

/// P(A') = 1 - P(A).
pub fn complement(p: f64) -> Result<f64> {
    Ok(Probability::new("p", p)?.complement().value())
}

/// P(A ∩ B) = P(A) × P(B); the caller asserts independence.
pub fn compound_probability(p_a: f64, p_b: f64) -> Result<f64> {
    let p_a = Probability::new("p_a", p_a)?.value();
    let p_b = Probability::new("p_b", p_b)?.value();
    Ok(p_a * p_b)
}

pub fn evaluate_simple(favorable: u64, total: u64) -> Result<Evaluation> {
    let outcome = simple_probability(favorable, total)?;
    trace!(favorable, total, p = outcome.probability, "simple probability");
    let result = CalculationResult::new(
        outcome.probability,
        format!("P(A) = {favorable} / {total}"),
    )
    .with_label(format!("{} unfavorable outcomes", outcome.unfavorable));
    let chart = ChartData::categories(
        ChartKind::Pie,
        vec![
            ("Favorable", outcome.favorable as f64),
            ("Unfavorable", outcome.unfavorable as f64),
        ],
    );
    Ok(Evaluation::new(result, chart))
}

pub fn evaluate_union(p_a: f64, p_b: f64, p_ab: f64) -> Result<Evaluation> {
    let value = union_probability(p_a, p_b, p_ab)?;
    let result = CalculationResult::new(
        value,
        format!(
            "P(A ∪ B) = P(A) + P(B) - P(A ∩ B) = {} + {} - {}",
            fmt4(p_a),
            fmt4(p_b),
            fmt4(p_ab)
        ),
    );
    let chart = ChartData::categories(
        ChartKind::Bar,
        vec![("P(A)", p_a), ("P(B)", p_b), ("P(A ∩ B)", p_ab), ("P(A ∪ B)", value)],
    );
    Ok(Evaluation::new(result, chart))
}

pub fn evaluate_independence(p_a: f64, p_b: f64, p_ab: f64) -> Result<Evaluation> {
    let independent = independence_check(p_a, p_b, p_ab)?;
    let product = p_a * p_b;
    let result = CalculationResult::new(
        if independent { 1.0 } else { 0.0 },
        format!(
            "P(A) × P(B) = {} × {} = {} vs P(A ∩ B) = {}",
            fmt4(p_a),
            fmt4(p_b),
            fmt4(product),
            fmt4(p_ab)
        ),
    )
    .with_label(if independent { "independent" } else { "dependent" });
    let chart = ChartData::categories(
        ChartKind::Bar,
        vec![("P(A) × P(B)", product), ("P(A ∩ B)", p_ab)],
    );
    Ok(Evaluation::new(result, chart))
}

pub fn evaluate_complement(p: f64) -> Result<Evaluation> {
    let value = complement(p)?;
    let result = CalculationResult::new(value, format!("P(A') = 1 - P(A) = 1 - {}", fmt4(p)));
    let chart = ChartData::categories(ChartKind::Pie, vec![("P(A)", p), ("P(A')", value)]);
    Ok(Evaluation::new(result, chart))
}

pub fn evaluate_compound(p_a: f64, p_b: f64) -> Result<Evaluation> {
    let value = compound_probability(p_a, p_b)?;
    let result = CalculationResult::new(
        value,
        format!("P(A ∩ B) = P(A) × P(B) = {} × {}", fmt4(p_a), fmt4(p_b)),
    );
    let chart = ChartData::categories(
        ChartKind::Bar,
        vec![("P(A)", p_a), ("P(B)", p_b), ("P(A ∩ B)", value)],
    );
    Ok(Evaluation::new(result, chart))
}
