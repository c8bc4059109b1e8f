//! Validated input types.
//!
//! Every formula that needs a domain invariant goes through these
//! constructors, so a probability is checked the same way whether it feeds a
//! union, a Bayes posterior, or a binomial PMF. Each constructor takes the
//! parameter name so error messages point at the offending field.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// Reject NaN and infinite values.
pub fn require_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::domain(format!("{name} must be a finite number, got {value}")))
    }
}

/// Convert a parsed user number into a signed integer.
///
/// Used where negative integers are meaningful (e.g. a PMF is zero for k < 0).
pub fn require_integer(name: &str, value: f64) -> Result<i64> {
    let value = require_finite(name, value)?;
    if value.fract() != 0.0 {
        return Err(Error::domain(format!("{name} must be an integer, got {value}")));
    }
    if value.abs() > u32::MAX as f64 {
        return Err(Error::domain(format!("{name} is too large, got {value}")));
    }
    Ok(value as i64)
}

/// A probability in the closed interval [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Probability(f64);

impl Probability {
    pub fn new(name: &str, value: f64) -> Result<Self> {
        let value = require_finite(name, value)?;
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::domain(format!(
                "{name} must be between 0 and 1, got {value}"
            )));
        }
        Ok(Probability(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// 1 - p.
    pub fn complement(self) -> Probability {
        Probability(1.0 - self.0)
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

/// A non-negative integer count (trials, successes, failures).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Count(u64);

impl Count {
    pub fn new(name: &str, value: i64) -> Result<Self> {
        u64::try_from(value)
            .map(Count)
            .map_err(|_| Error::domain(format!("{name} must be a non-negative integer, got {value}")))
    }

    /// Convert a parsed user number into a count.
    ///
    /// Fails for negative, fractional, or non-finite values.
    pub fn from_f64(name: &str, value: f64) -> Result<Self> {
        let value = require_finite(name, value)?;
        if value < 0.0 || value.fract() != 0.0 {
            return Err(Error::domain(format!(
                "{name} must be a non-negative integer, got {value}"
            )));
        }
        if value > u32::MAX as f64 {
            return Err(Error::domain(format!("{name} is too large, got {value}")));
        }
        Ok(Count(value as u64))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl From<u32> for Count {
    fn from(value: u32) -> Self {
        Count(u64::from(value))
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strictly positive real: a rate (lambda) or a scale (sigma).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rate(f64);

impl Rate {
    pub fn new(name: &str, value: f64) -> Result<Self> {
        let value = require_finite(name, value)?;
        if value <= 0.0 {
            return Err(Error::domain(format!("{name} must be positive, got {value}")));
        }
        Ok(Rate(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
