//! Penalty scan and cell choice
//!
//! A line (row or column) is *active* while its remaining quantity is above the
//! tolerance. Each iteration:
//!
//! 1. Every active line gets a penalty from the costs of its active
//!    counterparts: the gap between the two cheapest, or the single cost when
//!    only one counterpart is left. Inactive lines, and active lines with no
//!    active counterpart, get [`SENTINEL_PENALTY`].
//! 2. The greatest penalty wins. Candidates are scanned rows first, then
//!    columns, each in index order, and only a strictly greater value replaces
//!    the current best, so the first-seen record wins ties.
//! 3. Within the winning line, the cheapest active counterpart is chosen, again
//!    first-seen (lowest index) on ties.
//!
//! All comparisons are strict `>` / `<` in a single linear pass; no sorting is
//! involved, so the tie order never depends on a sort's stability.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Penalty given to a line that can never be selected
pub const SENTINEL_PENALTY: f64 = -1.0;

/// Which kind of line a penalty belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// An origin (row of the cost grid)
    Row,
    /// A destination (column of the cost grid)
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Penalty of one line for the current iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyRecord {
    pub penalty: f64,
    pub axis: Axis,
    pub index: usize,
}

impl PenaltyRecord {
    pub fn sentinel(axis: Axis, index: usize) -> Self {
        Self {
            penalty: SENTINEL_PENALTY,
            axis,
            index,
        }
    }

    /// Sentinel records mark lines that must not be selected
    pub fn is_sentinel(&self) -> bool {
        self.penalty < 0.0
    }
}

/// Penalty of a line given the costs of its active counterparts
///
/// - Two or more costs: second smallest minus smallest
/// - Exactly one cost: that cost
/// - No costs: [`SENTINEL_PENALTY`]
///
/// # Example
/// ```
/// use vogel_transport_core_rs::allocator::penalty::line_penalty;
///
/// assert_eq!(line_penalty([6.0, 4.0, 9.0]), 2.0);
/// assert_eq!(line_penalty([7.0]), 7.0);
/// assert_eq!(line_penalty(std::iter::empty()), -1.0);
/// ```
pub fn line_penalty(costs: impl IntoIterator<Item = f64>) -> f64 {
    let mut smallest: Option<f64> = None;
    let mut second: Option<f64> = None;

    for cost in costs {
        match smallest {
            Some(min) if cost < min => {
                second = Some(min);
                smallest = Some(cost);
            }
            Some(_) => {
                if second.map_or(true, |s| cost < s) {
                    second = Some(cost);
                }
            }
            None => smallest = Some(cost),
        }
    }

    match (smallest, second) {
        (Some(min), Some(next)) => next - min,
        (Some(only), None) => only,
        _ => SENTINEL_PENALTY,
    }
}

/// Penalty records for all rows (index order) followed by all columns (index order)
pub fn compute_penalties(
    cost: &[Vec<f64>],
    remaining_supply: &[f64],
    remaining_demand: &[f64],
    tolerance: f64,
) -> Vec<PenaltyRecord> {
    let mut records = Vec::with_capacity(remaining_supply.len() + remaining_demand.len());

    for (i, &supply) in remaining_supply.iter().enumerate() {
        if supply > tolerance {
            let costs = remaining_demand
                .iter()
                .enumerate()
                .filter(|&(_, &demand)| demand > tolerance)
                .map(|(j, _)| cost[i][j]);
            records.push(PenaltyRecord {
                penalty: line_penalty(costs),
                axis: Axis::Row,
                index: i,
            });
        } else {
            records.push(PenaltyRecord::sentinel(Axis::Row, i));
        }
    }

    for (j, &demand) in remaining_demand.iter().enumerate() {
        if demand > tolerance {
            let costs = remaining_supply
                .iter()
                .enumerate()
                .filter(|&(_, &supply)| supply > tolerance)
                .map(|(i, _)| cost[i][j]);
            records.push(PenaltyRecord {
                penalty: line_penalty(costs),
                axis: Axis::Column,
                index: j,
            });
        } else {
            records.push(PenaltyRecord::sentinel(Axis::Column, j));
        }
    }

    records
}

/// Record with the strictly greatest penalty, first-seen on ties
///
/// Returns `None` when every record is a sentinel.
pub fn select_penalty(records: &[PenaltyRecord]) -> Option<PenaltyRecord> {
    let mut best: Option<PenaltyRecord> = None;
    for record in records {
        if best.map_or(true, |b| record.penalty > b.penalty) {
            best = Some(*record);
        }
    }
    best.filter(|b| !b.is_sentinel())
}

/// Index of the cheapest active entry, lowest index on ties
fn cheapest(entries: impl Iterator<Item = (usize, f64, f64)>, tolerance: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, unit_cost, remaining) in entries {
        if remaining <= tolerance {
            continue;
        }
        if best.map_or(true, |(_, c)| unit_cost < c) {
            best = Some((index, unit_cost));
        }
    }
    best.map(|(index, _)| index)
}

/// Cheapest active column in `row`
pub fn cheapest_column(
    cost: &[Vec<f64>],
    row: usize,
    remaining_demand: &[f64],
    tolerance: f64,
) -> Option<usize> {
    let entries = remaining_demand
        .iter()
        .enumerate()
        .map(|(j, &demand)| (j, cost[row][j], demand));
    cheapest(entries, tolerance)
}

/// Cheapest active row in `col`
pub fn cheapest_row(
    cost: &[Vec<f64>],
    col: usize,
    remaining_supply: &[f64],
    tolerance: f64,
) -> Option<usize> {
    let entries = remaining_supply
        .iter()
        .enumerate()
        .map(|(i, &supply)| (i, cost[i][col], supply));
    cheapest(entries, tolerance)
}

/// Lane `(row, col)` to allocate for the winning record
pub fn choose_cell(
    record: &PenaltyRecord,
    cost: &[Vec<f64>],
    remaining_supply: &[f64],
    remaining_demand: &[f64],
    tolerance: f64,
) -> Option<(usize, usize)> {
    match record.axis {
        Axis::Row => cheapest_column(cost, record.index, remaining_demand, tolerance)
            .map(|col| (record.index, col)),
        Axis::Column => cheapest_row(cost, record.index, remaining_supply, tolerance)
            .map(|row| (row, record.index)),
    }
}
