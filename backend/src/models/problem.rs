//! Transportation problem model
//!
//! A problem is the three caller-supplied collections the allocator works on:
//! - Supply capacity per origin
//! - Demand requirement per destination
//! - Unit shipping cost per origin-destination lane
//!
//! Validation runs once, before any allocation work starts. Nothing is clamped
//! or coerced: an offending value is reported with its exact position.
//!
//! # Critical Invariants
//!
//! 1. At least one origin and one destination
//! 2. Cost grid is exactly `origins × destinations`
//! 3. Every supply, demand and cost entry is finite and non-negative

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Position of a single input value, used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Supply(usize),
    Demand(usize),
    Cost { row: usize, col: usize },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Supply(i) => write!(f, "supply[{}]", i),
            Location::Demand(j) => write!(f, "demand[{}]", j),
            Location::Cost { row, col } => write!(f, "cost[{}][{}]", row, col),
        }
    }
}

/// Errors raised while validating a transportation problem
#[derive(Debug, Error, PartialEq)]
pub enum ProblemError {
    #[error("Supply must list at least one origin")]
    EmptySupply,

    #[error("Demand must list at least one destination")]
    EmptyDemand,

    #[error("Shape mismatch: cost has {actual} rows, expected {expected} (one per origin)")]
    RowCountMismatch { expected: usize, actual: usize },

    #[error("Shape mismatch: cost row {row} has {actual} columns, expected {expected} (one per destination)")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid input: {location} is negative ({value})")]
    NegativeValue { location: Location, value: f64 },

    #[error("Invalid input: {location} is not a finite number ({value})")]
    NonFiniteValue { location: Location, value: f64 },
}

impl ProblemError {
    /// True for errors about the dimensions of the inputs rather than their values
    pub fn is_shape_mismatch(&self) -> bool {
        matches!(
            self,
            ProblemError::EmptySupply
                | ProblemError::EmptyDemand
                | ProblemError::RowCountMismatch { .. }
                | ProblemError::ColumnCountMismatch { .. }
        )
    }

    /// Offending value position, when the error is about a single entry
    pub fn location(&self) -> Option<Location> {
        match self {
            ProblemError::NegativeValue { location, .. }
            | ProblemError::NonFiniteValue { location, .. } => Some(*location),
            _ => None,
        }
    }
}

/// A validated transportation problem
///
/// Fields are private so a `TransportProblem` can only exist in a valid state.
/// Deserialization goes through the same validation as [`TransportProblem::new`].
///
/// # Example
/// ```
/// use vogel_transport_core_rs::TransportProblem;
///
/// let problem = TransportProblem::new(
///     vec![20.0, 30.0],
///     vec![25.0, 25.0],
///     vec![vec![4.0, 6.0], vec![5.0, 3.0]],
/// ).unwrap();
///
/// assert_eq!(problem.num_origins(), 2);
/// assert_eq!(problem.total_supply(), 50.0);
/// assert!(problem.is_balanced(0.01));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProblem")]
pub struct TransportProblem {
    supply: Vec<f64>,
    demand: Vec<f64>,
    cost: Vec<Vec<f64>>,
}

/// Unvalidated wire form of a problem
#[derive(Deserialize)]
struct RawProblem {
    supply: Vec<f64>,
    demand: Vec<f64>,
    cost: Vec<Vec<f64>>,
}

impl TryFrom<RawProblem> for TransportProblem {
    type Error = ProblemError;

    fn try_from(raw: RawProblem) -> Result<Self, Self::Error> {
        TransportProblem::new(raw.supply, raw.demand, raw.cost)
    }
}

impl TransportProblem {
    /// Create a problem, rejecting bad shapes first and then bad values
    ///
    /// # Errors
    ///
    /// - `EmptySupply` / `EmptyDemand` if either side has no entries
    /// - `RowCountMismatch` / `ColumnCountMismatch` if the cost grid disagrees
    ///   with the supply and demand lengths
    /// - `NonFiniteValue` for NaN or infinite entries
    /// - `NegativeValue` for entries below zero
    pub fn new(
        supply: Vec<f64>,
        demand: Vec<f64>,
        cost: Vec<Vec<f64>>,
    ) -> Result<Self, ProblemError> {
        if supply.is_empty() {
            return Err(ProblemError::EmptySupply);
        }
        if demand.is_empty() {
            return Err(ProblemError::EmptyDemand);
        }
        if cost.len() != supply.len() {
            return Err(ProblemError::RowCountMismatch {
                expected: supply.len(),
                actual: cost.len(),
            });
        }
        for (row, costs) in cost.iter().enumerate() {
            if costs.len() != demand.len() {
                return Err(ProblemError::ColumnCountMismatch {
                    row,
                    expected: demand.len(),
                    actual: costs.len(),
                });
            }
        }

        for (i, &value) in supply.iter().enumerate() {
            check_value(Location::Supply(i), value)?;
        }
        for (j, &value) in demand.iter().enumerate() {
            check_value(Location::Demand(j), value)?;
        }
        for (row, costs) in cost.iter().enumerate() {
            for (col, &value) in costs.iter().enumerate() {
                check_value(Location::Cost { row, col }, value)?;
            }
        }

        Ok(Self {
            supply,
            demand,
            cost,
        })
    }

    /// Number of origins (rows)
    pub fn num_origins(&self) -> usize {
        self.supply.len()
    }

    /// Number of destinations (columns)
    pub fn num_destinations(&self) -> usize {
        self.demand.len()
    }

    pub fn supply(&self) -> &[f64] {
        &self.supply
    }

    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    pub fn cost(&self) -> &[Vec<f64>] {
        &self.cost
    }

    /// Unit cost of shipping from `origin` to `destination`
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn unit_cost(&self, origin: usize, destination: usize) -> f64 {
        self.cost[origin][destination]
    }

    pub fn total_supply(&self) -> f64 {
        self.supply.iter().sum()
    }

    pub fn total_demand(&self) -> f64 {
        self.demand.iter().sum()
    }

    /// Whether total supply and total demand agree within `tolerance`
    ///
    /// Imbalanced problems are still accepted by the allocator; this is
    /// informational only.
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        (self.total_supply() - self.total_demand()).abs() <= tolerance
    }
}

fn check_value(location: Location, value: f64) -> Result<(), ProblemError> {
    if !value.is_finite() {
        return Err(ProblemError::NonFiniteValue { location, value });
    }
    if value < 0.0 {
        return Err(ProblemError::NegativeValue { location, value });
    }
    Ok(())
}
