//! Conditional probability and two-way contingency tables.

use pstat_common::{
    CalculationResult, ChartData, ChartKind, Error, Evaluation, Probability, Result,
};
use tracing::trace;

use super::{fmt4, PROBABILITY_TOLERANCE};

/// P(A|B) = P(A ∩ B) / P(B).
pub fn conditional_probability(p_intersection: f64, p_b: f64) -> Result<f64> {
    let p_intersection = Probability::new("p_intersection", p_intersection)?.value();
    let p_b = Probability::new("p_b", p_b)?;
    if p_b.is_zero() {
        return Err(Error::division_by_zero("P(B) cannot be 0"));
    }
    let p_b = p_b.value();
    if p_intersection > p_b + PROBABILITY_TOLERANCE {
        return Err(Error::range(format!(
            "P(A ∩ B) ({p_intersection}) cannot exceed P(B) ({p_b})"
        )));
    }
    Ok((p_intersection / p_b).min(1.0))
}

/// Probabilities derived from a 2×2 table of counts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContingencyOutcome {
    pub total: u64,
    pub p_a: f64,
    pub p_b: f64,
    pub p_intersection: f64,
    /// P(A|B).
    pub conditional: f64,
}

/// Derive P(A), P(B), P(A ∩ B) and P(A|B) from the four cell counts.
///
/// Cells are `A∩B`, `A∩¬B`, `¬A∩B`, `¬A∩¬B`.
pub fn contingency_table_query(
    ab: u64,
    a_not_b: u64,
    not_a_b: u64,
    not_a_not_b: u64,
) -> Result<ContingencyOutcome> {
    let total = [ab, a_not_b, not_a_b, not_a_not_b]
        .iter()
        .try_fold(0_u64, |acc, &c| acc.checked_add(c))
        .ok_or_else(|| Error::domain("contingency table counts overflow"))?;
    if total == 0 {
        return Err(Error::division_by_zero("contingency table is empty"));
    }
    let n = total as f64;
    let p_a = (ab + a_not_b) as f64 / n;
    let p_b = (ab + not_a_b) as f64 / n;
    let p_intersection = ab as f64 / n;
    if ab + not_a_b == 0 {
        return Err(Error::division_by_zero("no observations fall in B, P(B) is 0"));
    }
    let conditional = ab as f64 / (ab + not_a_b) as f64;
    Ok(ContingencyOutcome {
        total,
        p_a,
        p_b,
        p_intersection,
        conditional,
    })
}

pub fn evaluate_conditional(p_intersection: f64, p_b: f64) -> Result<Evaluation> {
    let value = conditional_probability(p_intersection, p_b)?;
    trace!(p_intersection, p_b, value, "conditional probability");
    let result = CalculationResult::new(
        value,
        format!(
            "P(A|B) = P(A ∩ B) / P(B) = {} / {}",
            fmt4(p_intersection),
            fmt4(p_b)
        ),
    );
    let chart = ChartData::categories(
        ChartKind::Bar,
        vec![("P(A ∩ B)", p_intersection), ("P(B)", p_b), ("P(A|B)", value)],
    );
    Ok(Evaluation::new(result, chart))
}

pub fn evaluate_contingency(
    ab: u64,
    a_not_b: u64,
    not_a_b: u64,
    not_a_not_b: u64,
) -> Result<Evaluation> {
    let outcome = contingency_table_query(ab, a_not_b, not_a_b, not_a_not_b)?;
    let result = CalculationResult::new(
        outcome.conditional,
        format!(
            "P(A|B) = n(A ∩ B) / n(B) = {ab} / {} = {} / {}",
            ab + not_a_b,
            fmt4(outcome.p_intersection),
            fmt4(outcome.p_b)
        ),
    )
    .with_label(format!(
        "n = {}, P(A) = {}, P(B) = {}, P(A ∩ B) = {}",
        outcome.total,
        fmt4(outcome.p_a),
        fmt4(outcome.p_b),
        fmt4(outcome.p_intersection)
    ));
    let chart = ChartData::categories(
        ChartKind::Bar,
        vec![
            ("P(A)", outcome.p_a),
            ("P(B)", outcome.p_b),
            ("P(A ∩ B)", outcome.p_intersection),
            ("P(A|B)", outcome.conditional),
        ],
    );
    Ok(Evaluation::new(result, chart))
}
