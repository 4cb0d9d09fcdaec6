//! Aggregation functions
//!
//! Pure reducers over a numeric sequence, selected by name through [`Operation`].
//!
//! - **sum**: arithmetic sum, `0.0` for an empty sequence
//! - **avg**: `sum / len`, NaN for an empty sequence
//! - **min** / **max**: extreme values, NaN for an empty sequence
//!
//! All reducers are deterministic and side-effect free. Results over the same
//! multiset of values agree regardless of order, up to floating-point rounding
//! in the last bits (sum order is not fixed across files).
//!
//! # Example
//!
//! ```
//! use colstat::stats::Operation;
//!
//! let op: Operation = "avg".parse().unwrap();
//! assert_eq!(op.apply(&[10.0, 20.0, 15.0, 30.0, 45.0, 50.0, 100.0, 30.0]), 37.5);
//! ```

pub mod aggregator;

use crate::error::ColstatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signature shared by every aggregation function
pub type StatsFunc = fn(&[f64]) -> f64;

/// Arithmetic sum of all values
pub fn sum(data: &[f64]) -> f64 {
    data.iter().sum()
}

/// Arithmetic mean (NaN when `data` is empty)
pub fn avg(data: &[f64]) -> f64 {
    sum(data) / data.len() as f64
}

/// Smallest value (NaN when `data` is empty)
pub fn min(data: &[f64]) -> f64 {
    data.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

/// Largest value (NaN when `data` is empty)
pub fn max(data: &[f64]) -> f64 {
    data.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Named aggregation selected for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Sum,
    Avg,
    Min,
    Max,
}

impl Operation {
    /// Every recognized operation, in the order they are documented
    pub const ALL: [Operation; 4] = [Operation::Sum, Operation::Avg, Operation::Min, Operation::Max];

    /// Name used on the command line and in output
    pub fn name(self) -> &'static str {
        match self {
            Operation::Sum => "sum",
            Operation::Avg => "avg",
            Operation::Min => "min",
            Operation::Max => "max",
        }
    }

    /// Reducer implementing this operation
    pub fn func(self) -> StatsFunc {
        match self {
            Operation::Sum => sum,
            Operation::Avg => avg,
            Operation::Min => min,
            Operation::Max => max,
        }
    }

    /// Apply this operation to a sequence
    pub fn apply(self, data: &[f64]) -> f64 {
        (self.func())(data)
    }

    /// Whether the result is defined for an empty sequence
    pub fn defined_on_empty(self) -> bool {
        matches!(self, Operation::Sum)
    }
}

impl Default for Operation {
    fn default() -> Self {
        Operation::Sum
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = ColstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| ColstatError::InvalidOperation(s.to_string()))
    }
}
