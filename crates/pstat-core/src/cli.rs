//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pstat_common::{OutputFormat, Result};

use crate::formula::{DiscreteMode, ExponentialMode, ExponentialQuery, NormalMode, NormalQuery};
use crate::request::CalculationRequest;

/// pstat - probability and statistics calculator.
#[derive(Parser, Debug)]
#[command(name = "pstat", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, value_enum, default_value_t, env = "PSTAT_FORMAT")]
    pub format: OutputFormat,

    /// Settings file (overrides PSTAT_CONFIG and the user config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// P(A) = favorable / total
    Simple {
        #[arg(long)]
        favorable: f64,
        #[arg(long)]
        total: f64,
    },

    /// P(A ∪ B) = P(A) + P(B) - P(A ∩ B)
    Union(PairWithIntersection),

    /// Check whether P(A ∩ B) = P(A) × P(B)
    Independence(PairWithIntersection),

    /// P(A') = 1 - P(A)
    Complement {
        #[arg(long)]
        p: f64,
    },

    /// P(A|B) = P(A ∩ B) / P(B)
    Conditional {
        #[arg(long)]
        p_intersection: f64,
        #[arg(long)]
        p_b: f64,
    },

    /// P(A ∩ B) = P(A) × P(B) for independent events
    Compound {
        #[arg(long)]
        p_a: f64,
        #[arg(long)]
        p_b: f64,
    },

    /// P(A|B) from a 2×2 table of counts
    Contingency {
        /// Count of A and B
        #[arg(long)]
        ab: f64,
        /// Count of A and not B
        #[arg(long)]
        a_not_b: f64,
        /// Count of not A and B
        #[arg(long)]
        not_a_b: f64,
        /// Count of neither
        #[arg(long)]
        not_a_not_b: f64,
    },

    /// Bayes' theorem with a known P(B)
    Bayes {
        #[arg(long)]
        p_b_given_a: f64,
        #[arg(long)]
        p_a: f64,
        #[arg(long)]
        p_b: f64,
    },

    /// Bayes' theorem with P(B) from total probability over {A, ¬A}
    BayesTotal {
        #[arg(long)]
        p_a: f64,
        #[arg(long)]
        p_b_given_a: f64,
        #[arg(long)]
        p_b_given_not_a: f64,
    },

    /// Binomial distribution
    Binomial {
        /// Number of trials
        #[arg(long)]
        n: f64,
        /// Success probability per trial
        #[arg(long)]
        p: f64,
        /// Number of successes
        #[arg(long, allow_negative_numbers = true)]
        k: f64,
        #[arg(long, value_enum, default_value_t)]
        mode: DiscreteMode,
    },

    /// Negative binomial: x failures before the r-th success
    NegativeBinomial {
        #[arg(long)]
        r: f64,
        #[arg(long)]
        p: f64,
        #[arg(long)]
        x: f64,
    },

    /// Poisson distribution
    Poisson {
        /// Mean rate λ
        #[arg(long)]
        lambda: f64,
        #[arg(long)]
        k: f64,
        #[arg(long, value_enum, default_value_t)]
        mode: DiscreteMode,
    },

    /// Exponential distribution
    Exponential {
        /// Rate λ
        #[arg(long)]
        lambda: f64,
        #[arg(long, value_enum, default_value = "less-than")]
        mode: ExponentialMode,
        /// Point, or lower bound for `between`
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Upper bound for `between`
        #[arg(long, allow_negative_numbers = true)]
        b: Option<f64>,
    },

    /// Normal distribution, including the inverse (quantile) query
    Normal {
        #[arg(long, allow_negative_numbers = true)]
        mu: f64,
        #[arg(long)]
        sigma: f64,
        #[arg(long, value_enum, default_value = "less-than")]
        mode: NormalMode,
        /// Point, or lower bound for `between`
        #[arg(long, allow_negative_numbers = true)]
        x: Option<f64>,
        /// Upper bound for `between`
        #[arg(long, allow_negative_numbers = true)]
        b: Option<f64>,
        /// Target cumulative probability for `inverse`
        #[arg(long)]
        p: Option<f64>,
    },

    /// n!
    Factorial {
        #[arg(long, allow_negative_numbers = true)]
        n: f64,
    },

    /// C(n, k)
    Combination {
        #[arg(long)]
        n: f64,
        #[arg(long)]
        k: f64,
    },

    /// P(n, r)
    Permutation {
        #[arg(long)]
        n: f64,
        #[arg(long)]
        r: f64,
    },

    /// Evaluate JSON-lines requests from a file or stdin
    Batch {
        /// Input file; `-` or omitted reads stdin
        input: Option<PathBuf>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PairWithIntersection {
    #[arg(long)]
    pub p_a: f64,
    #[arg(long)]
    pub p_b: f64,
    #[arg(long)]
    pub p_ab: f64,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the resolved settings and where they came from
    Show,
}

impl Command {
    /// The single calculation this command asks for, if it is a calculator.
    pub fn to_request(&self) -> Result<Option<CalculationRequest>> {
        let request = match *self {
            Command::Simple { favorable, total } => CalculationRequest::Simple { favorable, total },
            Command::Union(PairWithIntersection { p_a, p_b, p_ab }) => {
                CalculationRequest::Union { p_a, p_b, p_ab }
            }
            Command::Independence(PairWithIntersection { p_a, p_b, p_ab }) => {
                CalculationRequest::Independence { p_a, p_b, p_ab }
            }
            Command::Complement { p } => CalculationRequest::Complement { p },
            Command::Conditional { p_intersection, p_b } => {
                CalculationRequest::Conditional { p_intersection, p_b }
            }
            Command::Compound { p_a, p_b } => CalculationRequest::Compound { p_a, p_b },
            Command::Contingency {
                ab,
                a_not_b,
                not_a_b,
                not_a_not_b,
            } => CalculationRequest::Contingency {
                ab,
                a_not_b,
                not_a_b,
                not_a_not_b,
            },
            Command::Bayes {
                p_b_given_a,
                p_a,
                p_b,
            } => CalculationRequest::Bayes {
                p_b_given_a,
                p_a,
                p_b,
            },
            Command::BayesTotal {
                p_a,
                p_b_given_a,
                p_b_given_not_a,
            } => CalculationRequest::BayesTotal {
                p_a,
                p_b_given_a,
                p_b_given_not_a,
            },
            Command::Binomial { n, p, k, mode } => CalculationRequest::Binomial { n, p, k, mode },
            Command::NegativeBinomial { r, p, x } => CalculationRequest::NegativeBinomial { r, p, x },
            Command::Poisson { lambda, k, mode } => CalculationRequest::Poisson { lambda, k, mode },
            Command::Exponential { lambda, mode, x, b } => CalculationRequest::Exponential {
                lambda,
                query: ExponentialQuery::from_parts(mode, x, b)?,
            },
            Command::Normal {
                mu,
                sigma,
                mode,
                x,
                b,
                p,
            } => CalculationRequest::Normal {
                mu,
                sigma,
                query: NormalQuery::from_parts(mode, x, b, p)?,
            },
            Command::Factorial { n } => CalculationRequest::Factorial { n },
            Command::Combination { n, k } => CalculationRequest::Combination { n, k },
            Command::Permutation { n, r } => CalculationRequest::Permutation { n, r },
            Command::Batch { .. } | Command::Config { .. } => return Ok(None),
        };
        Ok(Some(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pstat").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn binomial_defaults_to_exact() {
        let cli = parse(&["binomial", "--n", "10", "--p", "0.5", "--k", "3"]);
        let request = cli.command.to_request().unwrap().unwrap();
        assert_eq!(
            request,
            CalculationRequest::Binomial {
                n: 10.0,
                p: 0.5,
                k: 3.0,
                mode: DiscreteMode::Exact
            }
        );
    }

    #[test]
    fn normal_inverse_and_negative_mean() {
        let cli = parse(&[
            "normal", "--mu", "-2", "--sigma", "1", "--mode", "inverse", "--p", "0.5",
        ]);
        let request = cli.command.to_request().unwrap().unwrap();
        assert_eq!(
            request,
            CalculationRequest::Normal {
                mu: -2.0,
                sigma: 1.0,
                query: NormalQuery::Inverse { p: 0.5 }
            }
        );
    }

    #[test]
    fn between_without_upper_bound_is_rejected() {
        let cli = parse(&["exponential", "--lambda", "1", "--mode", "between", "--x", "1"]);
        assert!(cli.command.to_request().is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["complement", "--p", "0.2", "--format", "json", "-vv"]);
        assert!(cli.global.format.is_json());
        assert_eq!(cli.global.verbose, 2);
    }

    #[test]
    fn batch_is_not_a_single_request() {
        let cli = parse(&["batch", "requests.jsonl"]);
        assert!(cli.command.to_request().unwrap().is_none());
    }
}
