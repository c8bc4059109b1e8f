//! Typed calculation requests.
//!
//! A [`CalculationRequest`] is the unit of work shared by the subcommands and
//! the batch reader: one variant per calculator, tagged by `formula` in JSON.
//! Counts arrive as plain numbers and are checked for integrality here, so a
//! JSON `2.5` for `n` is rejected the same way a CLI `--n 2.5` is.

use pstat_common::{
    require_integer, CalculationResult, Count, Error, Evaluation, Result, SeriesOptions,
};
use pstat_math::{combination, factorial, permutation};
use serde::{Deserialize, Serialize};

use crate::chart::ChartId;
use crate::formula::{
    bayes, conditional, continuous, discrete, elementary, DiscreteMode, ExponentialQuery,
    NormalQuery,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum CalculationRequest {
    Simple {
        favorable: f64,
        total: f64,
    },
    Union {
        p_a: f64,
        p_b: f64,
        p_ab: f64,
    },
    Independence {
        p_a: f64,
        p_b: f64,
        p_ab: f64,
    },
    Complement {
        p: f64,
    },
    Conditional {
        p_intersection: f64,
        p_b: f64,
    },
    Compound {
        p_a: f64,
        p_b: f64,
    },
    Contingency {
        ab: f64,
        a_not_b: f64,
        not_a_b: f64,
        not_a_not_b: f64,
    },
    Bayes {
        p_b_given_a: f64,
        p_a: f64,
        p_b: f64,
    },
    BayesTotal {
        p_a: f64,
        p_b_given_a: f64,
        p_b_given_not_a: f64,
    },
    Binomial {
        n: f64,
        p: f64,
        k: f64,
        #[serde(default)]
        mode: DiscreteMode,
    },
    NegativeBinomial {
        r: f64,
        p: f64,
        x: f64,
    },
    Poisson {
        lambda: f64,
        k: f64,
        #[serde(default)]
        mode: DiscreteMode,
    },
    Exponential {
        lambda: f64,
        #[serde(flatten)]
        query: ExponentialQuery,
    },
    Normal {
        mu: f64,
        sigma: f64,
        #[serde(flatten)]
        query: NormalQuery,
    },
    Factorial {
        n: f64,
    },
    Combination {
        n: f64,
        k: f64,
    },
    Permutation {
        n: f64,
        r: f64,
    },
}

impl CalculationRequest {
    /// Chart slot this request renders into.
    pub fn section(&self) -> ChartId {
        match self {
            CalculationRequest::Simple { .. } => ChartId::Simple,
            CalculationRequest::Union { .. } => ChartId::Union,
            CalculationRequest::Independence { .. } => ChartId::Independence,
            CalculationRequest::Complement { .. } => ChartId::Complement,
            CalculationRequest::Conditional { .. } => ChartId::Conditional,
            CalculationRequest::Compound { .. } => ChartId::Compound,
            CalculationRequest::Contingency { .. } => ChartId::Contingency,
            CalculationRequest::Bayes { .. } | CalculationRequest::BayesTotal { .. } => {
                ChartId::Bayes
            }
            CalculationRequest::Binomial { .. } => ChartId::Binomial,
            CalculationRequest::NegativeBinomial { .. } => ChartId::NegativeBinomial,
            CalculationRequest::Poisson { .. } => ChartId::Poisson,
            CalculationRequest::Exponential { .. } => ChartId::Exponential,
            CalculationRequest::Normal { .. } => ChartId::Normal,
            CalculationRequest::Factorial { .. }
            | CalculationRequest::Combination { .. }
            | CalculationRequest::Permutation { .. } => ChartId::Combinatorics,
        }
    }

    /// False where the value is a count, a density, a quantile or a verdict.
    pub fn yields_probability(&self) -> bool {
        match self {
            CalculationRequest::Independence { .. }
            | CalculationRequest::Factorial { .. }
            | CalculationRequest::Combination { .. }
            | CalculationRequest::Permutation { .. } => false,
            CalculationRequest::Exponential { query, .. } => {
                !matches!(query, ExponentialQuery::Density { .. })
            }
            CalculationRequest::Normal { query, .. } => {
                !matches!(query, NormalQuery::Inverse { .. })
            }
            _ => true,
        }
    }

    /// True for the discrete and continuous distribution calculators.
    pub fn is_distribution(&self) -> bool {
        matches!(
            self,
            CalculationRequest::Binomial { .. }
                | CalculationRequest::NegativeBinomial { .. }
                | CalculationRequest::Poisson { .. }
                | CalculationRequest::Exponential { .. }
                | CalculationRequest::Normal { .. }
        )
    }
}

fn count(name: &str, value: f64) -> Result<u64> {
    Ok(Count::from_f64(name, value)?.get())
}

fn finite_scalar(value: f64, formula: String) -> Result<Evaluation> {
    if !value.is_finite() {
        return Err(Error::domain(format!("{formula} overflows a 64-bit float")));
    }
    Ok(Evaluation::scalar(CalculationResult::new(value, formula)))
}

/// Run one request through the engine.
pub fn evaluate(request: &CalculationRequest, opts: &SeriesOptions) -> Result<Evaluation> {
    match *request {
        CalculationRequest::Simple { favorable, total } => {
            elementary::evaluate_simple(count("favorable", favorable)?, count("total", total)?)
        }
        CalculationRequest::Union { p_a, p_b, p_ab } => elementary::evaluate_union(p_a, p_b, p_ab),
        CalculationRequest::Independence { p_a, p_b, p_ab } => {
            elementary::evaluate_independence(p_a, p_b, p_ab)
        }
        CalculationRequest::Complement { p } => elementary::evaluate_complement(p),
        CalculationRequest::Conditional { p_intersection, p_b } => {
            conditional::evaluate_conditional(p_intersection, p_b)
        }
        CalculationRequest::Compound { p_a, p_b } => elementary::evaluate_compound(p_a, p_b),
        CalculationRequest::Contingency {
            ab,
            a_not_b,
            not_a_b,
            not_a_not_b,
        } => conditional::evaluate_contingency(
            count("ab", ab)?,
            count("a_not_b", a_not_b)?,
            count("not_a_b", not_a_b)?,
            count("not_a_not_b", not_a_not_b)?,
        ),
        CalculationRequest::Bayes {
            p_b_given_a,
            p_a,
            p_b,
        } => bayes::evaluate_bayes(p_b_given_a, p_a, p_b),
        CalculationRequest::BayesTotal {
            p_a,
            p_b_given_a,
            p_b_given_not_a,
        } => bayes::evaluate_bayes_total(p_a, p_b_given_a, p_b_given_not_a),
        CalculationRequest::Binomial { n, p, k, mode } => discrete::evaluate_binomial(
            require_integer("n", n)?,
            p,
            require_integer("k", k)?,
            mode,
        ),
        CalculationRequest::NegativeBinomial { r, p, x } => discrete::evaluate_negative_binomial(
            require_integer("r", r)?,
            p,
            require_integer("x", x)?,
            opts,
        ),
        CalculationRequest::Poisson { lambda, k, mode } => {
            discrete::evaluate_poisson(lambda, require_integer("k", k)?, mode, opts)
        }
        CalculationRequest::Exponential { lambda, ref query } => {
            continuous::evaluate_exponential(lambda, query, opts)
        }
        CalculationRequest::Normal {
            mu,
            sigma,
            ref query,
        } => continuous::evaluate_normal(mu, sigma, query, opts),
        CalculationRequest::Factorial { n } => {
            let value = factorial(n)?;
            finite_scalar(value, format!("{n}!"))
        }
        CalculationRequest::Combination { n, k } => {
            let (n, k) = (count("n", n)?, count("k", k)?);
            finite_scalar(combination(n, k), format!("C({n}, {k}) = {n}! / ({k}! × ({n} - {k})!)"))
        }
        CalculationRequest::Permutation { n, r } => {
            let (n, r) = (count("n", n)?, count("r", r)?);
            finite_scalar(permutation(n, r), format!("P({n}, {r}) = {n}! / ({n} - {r})!"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pstat_common::ChartKind;

    fn parse(json: &str) -> CalculationRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn parses_tagged_requests() {
        assert_eq!(
            parse(r#"{"formula":"simple","favorable":3,"total":10}"#),
            CalculationRequest::Simple {
                favorable: 3.0,
                total: 10.0
            }
        );
        assert_eq!(
            parse(r#"{"formula":"binomial","n":10,"p":0.5,"k":3}"#),
            CalculationRequest::Binomial {
                n: 10.0,
                p: 0.5,
                k: 3.0,
                mode: DiscreteMode::Exact
            }
        );
    }

    #[test]
    fn parses_flattened_queries() {
        let request = parse(r#"{"formula":"normal","mu":0,"sigma":1,"mode":"inverse","p":0.975}"#);
        assert_eq!(
            request,
            CalculationRequest::Normal {
                mu: 0.0,
                sigma: 1.0,
                query: NormalQuery::Inverse { p: 0.975 }
            }
        );
        let request =
            parse(r#"{"formula":"exponential","lambda":0.5,"mode":"between","a":1,"b":2}"#);
        assert_eq!(request.section(), ChartId::Exponential);
    }

    #[test]
    fn unknown_formula_is_rejected() {
        let result: std::result::Result<CalculationRequest, _> =
            serde_json::from_str(r#"{"formula":"gamma","k":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn fractional_counts_are_domain_errors() {
        let request = CalculationRequest::Binomial {
            n: 10.5,
            p: 0.5,
            k: 3.0,
            mode: DiscreteMode::Exact,
        };
        let err = evaluate(&request, &SeriesOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Domain(_)));
    }

    #[test]
    fn simple_request_builds_pie_chart() {
        let request = CalculationRequest::Simple {
            favorable: 3.0,
            total: 10.0,
        };
        let eval = evaluate(&request, &SeriesOptions::default()).unwrap();
        assert_eq!(eval.result.value, 0.3);
        assert_eq!(eval.chart.unwrap().kind, ChartKind::Pie);
    }

    #[test]
    fn combinatorics_are_scalar() {
        let opts = SeriesOptions::default();
        let eval = evaluate(&CalculationRequest::Combination { n: 5.0, k: 2.0 }, &opts).unwrap();
        assert_eq!(eval.result.value, 10.0);
        assert!(eval.chart.is_none());
        let eval = evaluate(&CalculationRequest::Permutation { n: 5.0, r: 2.0 }, &opts).unwrap();
        assert_eq!(eval.result.value, 20.0);
        let eval = evaluate(&CalculationRequest::Factorial { n: 5.0 }, &opts).unwrap();
        assert_eq!(eval.result.value, 120.0);
    }

    #[test]
    fn overflowing_combination_is_reported() {
        let err = evaluate(
            &CalculationRequest::Combination { n: 2000.0, k: 1000.0 },
            &SeriesOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Domain(_)));
    }

    #[test]
    fn huge_poisson_rate_evaluates() {
        let eval = evaluate(
            &CalculationRequest::Poisson {
                lambda: 1e20,
                k: 0.0,
                mode: DiscreteMode::Exact,
            },
            &SeriesOptions::default(),
        )
        .unwrap();
        assert_eq!(eval.result.value, 0.0);
        let points = eval.chart.unwrap().points.len() as u64;
        assert!(points <= crate::series::MAX_DISCRETE_SUPPORT);

        let err = evaluate(
            &CalculationRequest::Poisson {
                lambda: 1e20,
                k: 0.0,
                mode: DiscreteMode::AtLeast,
            },
            &SeriesOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Domain(_)));
    }

    #[test]
    fn large_binomial_is_not_limited_by_its_chart() {
        let eval = evaluate(
            &CalculationRequest::Binomial {
                n: 2_000_000.0,
                p: 0.5,
                k: 1_000_000.0,
                mode: DiscreteMode::Exact,
            },
            &SeriesOptions::default(),
        )
        .unwrap();
        assert!(eval.result.value > 0.0005 && eval.result.value < 0.0006);
    }

    #[test]
    fn bayes_variants_share_a_section() {
        let direct = CalculationRequest::Bayes {
            p_b_given_a: 0.9,
            p_a: 0.01,
            p_b: 0.1,
        };
        let total = CalculationRequest::BayesTotal {
            p_a: 0.01,
            p_b_given_a: 0.95,
            p_b_given_not_a: 0.05,
        };
        assert_eq!(direct.section(), total.section());
        assert!(!direct.is_distribution());
    }

    #[test]
    fn quantiles_and_densities_are_not_probabilities() {
        let inverse = CalculationRequest::Normal {
            mu: 0.0,
            sigma: 1.0,
            query: NormalQuery::Inverse { p: 0.5 },
        };
        let density = CalculationRequest::Exponential {
            lambda: 1.0,
            query: ExponentialQuery::Density { x: 0.1 },
        };
        assert!(!inverse.yields_probability());
        assert!(!density.yields_probability());
        assert!(CalculationRequest::Complement { p: 0.2 }.yields_probability());
    }
}
