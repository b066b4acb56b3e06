//! Plan report
//!
//! Numeric summary of a finished run, in the shape a front-end needs to show
//! it: total cost and volume, what each origin shipped, what each destination
//! received, and whatever was left over. Rendering is up to the caller.

use crate::allocator::engine::{AllocationError, AllocationResult, AllocatorConfig, Termination};
use crate::allocator::fingerprint::{allocation_hash, problem_hash};
use crate::models::allocation::AllocationMatrix;
use crate::models::problem::TransportProblem;
use serde::{Deserialize, Serialize};

/// Summary of one allocation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    /// Currency symbol shown next to costs (e.g. "€", "$", "MAD")
    pub currency: String,

    /// Origin labels `F1..FR`
    pub origin_labels: Vec<String>,

    /// Destination labels `C1..CC`
    pub destination_labels: Vec<String>,

    pub allocation: AllocationMatrix,

    /// Element-wise product sum of allocation and unit costs
    pub total_cost: f64,

    /// Total supply offered (the volume available to ship)
    pub total_volume: f64,

    pub total_shipped: f64,

    /// Row sums of the allocation
    pub shipped_by_origin: Vec<f64>,

    /// Column sums of the allocation
    pub delivered_by_destination: Vec<f64>,

    /// Supply left at each origin after the run
    pub unallocated_supply: Vec<f64>,

    /// Demand left unmet at each destination after the run
    pub unmet_demand: Vec<f64>,

    pub iterations: usize,
    pub termination: Termination,

    /// SHA256 of the problem and the config it ran under
    pub problem_hash: String,

    /// SHA256 of the allocation matrix
    pub allocation_hash: String,
}

impl PlanReport {
    /// Summarize `result`, which must come from running `problem` under `config`
    pub fn build(
        problem: &TransportProblem,
        config: &AllocatorConfig,
        result: &AllocationResult,
        currency: impl Into<String>,
    ) -> Result<Self, AllocationError> {
        let allocation = result.allocation.clone();

        Ok(Self {
            currency: currency.into(),
            origin_labels: labels("F", problem.num_origins()),
            destination_labels: labels("C", problem.num_destinations()),
            total_cost: result.total_cost(problem),
            total_volume: problem.total_supply(),
            total_shipped: allocation.total_shipped(),
            shipped_by_origin: allocation.row_sums(),
            delivered_by_destination: allocation.col_sums(),
            unallocated_supply: result.remaining_supply.clone(),
            unmet_demand: result.remaining_demand.clone(),
            iterations: result.iterations,
            termination: result.termination,
            problem_hash: problem_hash(problem, config)?,
            allocation_hash: allocation_hash(&allocation)?,
            allocation,
        })
    }

    /// Total cost with thousands separators, two decimals and the currency
    pub fn formatted_total_cost(&self) -> String {
        format_amount(self.total_cost, &self.currency)
    }

    /// Whether anything was left on either side
    pub fn has_leftover(&self, tolerance: f64) -> bool {
        self.unallocated_supply.iter().sum::<f64>() > tolerance
            || self.unmet_demand.iter().sum::<f64>() > tolerance
    }

    pub fn to_json(&self) -> Result<String, AllocationError> {
        serde_json::to_string_pretty(self).map_err(|e| {
            AllocationError::SerializationError(format!("Report serialization failed: {}", e))
        })
    }
}

/// `prefix1..prefixN`
fn labels(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|n| format!("{}{}", prefix, n)).collect()
}

/// Render an amount as `1,234,567.89 SYM` (symbol omitted when empty)
///
/// # Example
/// ```
/// use vogel_transport_core_rs::report::format_amount;
///
/// assert_eq!(format_amount(1234.5, "€"), "1,234.50 €");
/// ```
pub fn format_amount(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    if currency.is_empty() {
        format!("{}{}.{}", sign, grouped, fraction)
    } else {
        format!("{}{}.{} {}", sign, grouped, fraction, currency)
    }
}
