//! Allocator engine - Vogel's Approximation Method
//!
//! Runs the penalty-scan / allocate loop over working copies of supply and
//! demand until one side is exhausted.
//!
//! # Loop (one iteration)
//!
//! ```text
//! 1. Penalties   rows then columns, gap between two cheapest active costs
//! 2. Selection   strictly greatest penalty, first-seen wins ties
//! 3. Cell        cheapest active lane in the winning line, lowest index on ties
//! 4. Allocate    qty = min(remaining supply, remaining demand), overwrite cell
//! 5. Check       stop once either remaining total is at or below tolerance
//! ```
//!
//! Each iteration exhausts at least one line, so a balanced `R × C` problem
//! takes at most `R + C - 1` iterations.
//!
//! # Critical Invariants
//!
//! - **Non-negative remainders**: remaining supply and demand never go below 0
//! - **Conservation**: row sums never exceed supply, column sums never exceed demand
//! - **Determinism**: identical inputs give bit-identical output
//!
//! # Example
//!
//! ```rust
//! use vogel_transport_core_rs::{Allocator, AllocatorConfig, TransportProblem};
//!
//! let problem = TransportProblem::new(
//!     vec![20.0, 30.0],
//!     vec![25.0, 25.0],
//!     vec![vec![4.0, 6.0], vec![5.0, 3.0]],
//! ).unwrap();
//!
//! let allocator = Allocator::new(AllocatorConfig::default()).unwrap();
//! let result = allocator.run(&problem).unwrap();
//!
//! assert_eq!(result.allocation.rows(), &[vec![20.0, 0.0], vec![5.0, 25.0]]);
//! assert_eq!(result.total_cost(&problem), 180.0);
//! ```

use crate::allocator::penalty::{choose_cell, compute_penalties, select_penalty, Axis};
use crate::models::allocation::AllocationMatrix;
use crate::models::event::{Event, EventLog};
use crate::models::problem::{ProblemError, TransportProblem};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Remaining totals at or below this are treated as exhausted
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Errors that can occur while setting up or running an allocation
#[derive(Debug, Error, PartialEq)]
pub enum AllocationError {
    #[error("Problem error: {0}")]
    Problem(#[from] ProblemError),

    #[error("Invalid tolerance: {0} (must be finite and non-negative)")]
    InvalidTolerance(f64),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Allocator configuration
///
/// # Example
/// ```
/// use vogel_transport_core_rs::AllocatorConfig;
///
/// let config: AllocatorConfig = serde_json::from_str("{}").unwrap();
/// assert_eq!(config.tolerance, 0.01);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Floating-point safety margin for "exhausted"
    ///
    /// A line is active while its remaining quantity is above this value, and
    /// the loop stops once either remaining total falls to or below it.
    pub tolerance: f64,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl AllocatorConfig {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Reject tolerances that would make the activity test meaningless
    pub fn validate(&self) -> Result<(), AllocationError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(AllocationError::InvalidTolerance(self.tolerance));
        }
        Ok(())
    }
}

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Remaining supply or remaining demand fell to the tolerance
    Exhausted,

    /// Both totals are above tolerance, but no single line is, so no penalty
    /// can be formed (e.g. many rounding remnants spread across lines)
    NoActiveLanes,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exhausted => write!(f, "exhausted"),
            Termination::NoActiveLanes => write!(f, "no_active_lanes"),
        }
    }
}

/// Outcome of one allocator run
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationResult {
    /// Shipment plan, same shape as the cost grid
    pub allocation: AllocationMatrix,

    /// Number of allocation steps performed
    pub iterations: usize,

    /// Supply left at each origin (non-zero only for imbalanced problems or
    /// rounding remnants)
    pub remaining_supply: Vec<f64>,

    /// Demand left unmet at each destination
    pub remaining_demand: Vec<f64>,

    pub termination: Termination,

    /// Step-by-step trace of the run
    pub events: EventLog,
}

impl AllocationResult {
    /// Element-wise product sum of the allocation and the problem's costs
    pub fn total_cost(&self, problem: &TransportProblem) -> f64 {
        self.allocation.total_cost(problem.cost())
    }

    pub fn total_remaining_supply(&self) -> f64 {
        self.remaining_supply.iter().sum()
    }

    pub fn total_remaining_demand(&self) -> f64 {
        self.remaining_demand.iter().sum()
    }
}

/// Vogel's Approximation Method allocator
///
/// Holds only configuration; every [`Allocator::run`] owns its own working
/// state, so one allocator can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    config: AllocatorConfig,
}

impl Allocator {
    /// Create an allocator
    ///
    /// # Errors
    ///
    /// Returns `InvalidTolerance` if the tolerance is negative or not finite.
    pub fn new(config: AllocatorConfig) -> Result<Self, AllocationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    pub fn tolerance(&self) -> f64 {
        self.config.tolerance
    }

    /// Validate raw inputs and run
    pub fn allocate(
        &self,
        supply: &[f64],
        demand: &[f64],
        cost: &[Vec<f64>],
    ) -> Result<AllocationResult, AllocationError> {
        let problem = TransportProblem::new(supply.to_vec(), demand.to_vec(), cost.to_vec())?;
        self.run(&problem)
    }

    /// Run the allocation loop on a validated problem
    ///
    /// Imbalanced problems are not an error: the loop stops when the smaller
    /// side is exhausted and the other side's remainder is reported in
    /// [`AllocationResult::remaining_supply`] / [`AllocationResult::remaining_demand`].
    pub fn run(&self, problem: &TransportProblem) -> Result<AllocationResult, AllocationError> {
        let tolerance = self.config.tolerance;
        let cost = problem.cost();

        let mut remaining_supply = problem.supply().to_vec();
        let mut remaining_demand = problem.demand().to_vec();
        let mut allocation =
            AllocationMatrix::zeros(problem.num_origins(), problem.num_destinations());
        let mut events = EventLog::new();
        let mut iterations = 0;

        if !problem.is_balanced(tolerance) {
            log::debug!(
                "imbalanced problem: supply {} vs demand {}; remainder will stay unallocated",
                problem.total_supply(),
                problem.total_demand()
            );
        }

        let termination = loop {
            if total(&remaining_supply) <= tolerance || total(&remaining_demand) <= tolerance {
                break Termination::Exhausted;
            }

            let penalties =
                compute_penalties(cost, &remaining_supply, &remaining_demand, tolerance);
            let Some(winner) = select_penalty(&penalties) else {
                break Termination::NoActiveLanes;
            };
            let Some((row, col)) = choose_cell(
                &winner,
                cost,
                &remaining_supply,
                &remaining_demand,
                tolerance,
            ) else {
                break Termination::NoActiveLanes;
            };

            events.log(Event::PenaltySelected {
                iteration: iterations,
                axis: winner.axis,
                index: winner.index,
                penalty: winner.penalty,
            });

            let quantity = remaining_supply[row].min(remaining_demand[col]);
            allocation.set(row, col, quantity);
            remaining_supply[row] -= quantity;
            remaining_demand[col] -= quantity;

            log::trace!(
                "iteration {}: {} {} penalty {} -> cell ({}, {}) qty {}",
                iterations,
                winner.axis,
                winner.index,
                winner.penalty,
                row,
                col,
                quantity
            );
            events.log(Event::CellAllocated {
                iteration: iterations,
                row,
                col,
                quantity,
                unit_cost: cost[row][col],
            });

            iterations += 1;
        };

        let leftover_supply = total(&remaining_supply);
        let leftover_demand = total(&remaining_demand);
        events.log(Event::Terminated {
            iterations,
            reason: termination,
            remaining_supply: leftover_supply,
            remaining_demand: leftover_demand,
        });
        log::debug!(
            "allocation finished after {} iterations ({}); leftover supply {}, demand {}",
            iterations,
            termination,
            leftover_supply,
            leftover_demand
        );

        Ok(AllocationResult {
            allocation,
            iterations,
            remaining_supply,
            remaining_demand,
            termination,
            events,
        })
    }
}

/// Allocate with the default configuration and return only the plan
///
/// # Example
/// ```
/// use vogel_transport_core_rs::allocate;
///
/// let plan = allocate(&[10.0], &[10.0], &[vec![3.0]]).unwrap();
/// assert_eq!(plan.get(0, 0), 10.0);
/// ```
pub fn allocate(
    supply: &[f64],
    demand: &[f64],
    cost: &[Vec<f64>],
) -> Result<AllocationMatrix, AllocationError> {
    Allocator::default()
        .allocate(supply, demand, cost)
        .map(|result| result.allocation)
}

fn total(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Winning axis of each iteration, in order
pub fn selection_trace(events: &EventLog) -> Vec<(Axis, usize)> {
    events
        .events()
        .iter()
        .filter_map(|e| match e {
            Event::PenaltySelected { axis, index, .. } => Some((*axis, *index)),
            _ => None,
        })
        .collect()
}
