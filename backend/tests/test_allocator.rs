//! Allocator Scenario Tests
//!
//! End-to-end runs of Vogel's Approximation Method on small, hand-checked
//! problems.
//!
//! Critical behaviors tested:
//! - Exact allocations for known problems (including the textbook 3×4)
//! - First-seen tie-break on penalties and on cell choice
//! - Imbalanced problems stop when the smaller side is exhausted
//! - Iteration bound and determinism

use vogel_transport_core_rs::allocator::selection_trace;
use vogel_transport_core_rs::{
    allocate, AllocationResult, Allocator, AllocatorConfig, Axis, Event, Termination,
    TransportProblem,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Build a validated problem from borrowed rows
fn problem(supply: &[f64], demand: &[f64], cost: &[&[f64]]) -> TransportProblem {
    TransportProblem::new(
        supply.to_vec(),
        demand.to_vec(),
        cost.iter().map(|row| row.to_vec()).collect(),
    )
    .expect("test problem should be valid")
}

/// Run with the default configuration
fn run(problem: &TransportProblem) -> AllocationResult {
    Allocator::default().run(problem).unwrap()
}

fn rows(result: &AllocationResult) -> Vec<Vec<f64>> {
    result.allocation.rows().to_vec()
}

// ============================================================================
// Known Allocations
// ============================================================================

#[test]
fn test_single_cell() {
    let p = problem(&[10.0], &[10.0], &[&[3.0]]);
    let result = run(&p);

    assert_eq!(rows(&result), vec![vec![10.0]]);
    assert_eq!(result.total_cost(&p), 30.0);
    assert_eq!(result.iterations, 1);
}

#[test]
fn test_balanced_two_by_two() {
    let p = problem(&[20.0, 30.0], &[25.0, 25.0], &[&[4.0, 6.0], &[5.0, 3.0]]);
    let result = run(&p);

    // Column 1 has the largest gap (6 - 3), so lane (1,1) is filled first
    assert_eq!(rows(&result), vec![vec![20.0, 0.0], vec![5.0, 25.0]]);

    let expected_cost: f64 = 20.0 * 4.0 + 5.0 * 5.0 + 25.0 * 3.0;
    assert_eq!(result.total_cost(&p), expected_cost);
    assert_eq!(result.total_cost(&p), 180.0);
}

#[test]
fn test_textbook_three_by_four() {
    let p = problem(
        &[7.0, 9.0, 18.0],
        &[5.0, 8.0, 7.0, 14.0],
        &[
            &[19.0, 30.0, 50.0, 10.0],
            &[70.0, 30.0, 40.0, 60.0],
            &[40.0, 8.0, 70.0, 20.0],
        ],
    );
    let result = run(&p);

    assert_eq!(
        rows(&result),
        vec![
            vec![5.0, 0.0, 0.0, 2.0],
            vec![0.0, 0.0, 7.0, 2.0],
            vec![0.0, 8.0, 0.0, 10.0],
        ]
    );
    assert_eq!(result.total_cost(&p), 779.0);
    assert_eq!(result.iterations, 6);
    assert_eq!(
        selection_trace(&result.events),
        vec![
            (Axis::Column, 1),
            (Axis::Column, 0),
            (Axis::Row, 2),
            (Axis::Column, 3),
            (Axis::Column, 3),
            (Axis::Row, 1),
        ]
    );
}

#[test]
fn test_three_by_four_mixed_winners() {
    let p = problem(
        &[50.0, 60.0, 25.0],
        &[30.0, 40.0, 35.0, 30.0],
        &[
            &[3.0, 1.0, 7.0, 4.0],
            &[2.0, 6.0, 5.0, 9.0],
            &[8.0, 3.0, 3.0, 2.0],
        ],
    );
    let result = run(&p);

    assert_eq!(
        rows(&result),
        vec![
            vec![0.0, 40.0, 0.0, 10.0],
            vec![30.0, 0.0, 30.0, 0.0],
            vec![0.0, 0.0, 5.0, 20.0],
        ]
    );
    assert_eq!(result.total_cost(&p), 345.0);
}

#[test]
fn test_fractional_quantities() {
    let p = problem(&[12.5, 7.5], &[5.25, 14.75], &[&[2.0, 5.0], &[4.0, 1.0]]);
    let result = run(&p);

    assert_eq!(rows(&result), vec![vec![5.25, 7.25], vec![0.0, 7.5]]);
    assert_eq!(result.total_cost(&p), 54.25);
}

#[test]
fn test_free_function_returns_plan_only() {
    let plan = allocate(
        &[20.0, 30.0],
        &[25.0, 25.0],
        &[vec![4.0, 6.0], vec![5.0, 3.0]],
    )
    .unwrap();

    assert_eq!(plan.rows(), &[vec![20.0, 0.0], vec![5.0, 25.0]]);
}

// ============================================================================
// Tie-Break Rules
// ============================================================================

#[test]
fn test_zero_cost_tie_picks_lower_column() {
    let p = problem(&[10.0], &[5.0, 5.0], &[&[0.0, 0.0]]);
    let result = run(&p);

    // All penalties are 0: row 0 is seen first, and its cheapest column ties
    assert_eq!(result.events.allocated_cells(), vec![(0, 0), (0, 1)]);
    assert_eq!(rows(&result), vec![vec![5.0, 5.0]]);
    assert_eq!(result.total_cost(&p), 0.0);
}

#[test]
fn test_equal_penalties_prefer_rows_then_lower_index() {
    let p = problem(
        &[40.0, 40.0],
        &[30.0, 20.0, 30.0],
        &[&[2.0, 2.0, 9.0], &[2.0, 2.0, 1.0]],
    );
    let result = run(&p);

    // After column 2 is filled, every penalty is 0 and row 0 wins the scan
    assert_eq!(
        selection_trace(&result.events),
        vec![
            (Axis::Column, 2),
            (Axis::Row, 0),
            (Axis::Row, 0),
            (Axis::Row, 1),
        ]
    );
    assert_eq!(
        rows(&result),
        vec![vec![30.0, 10.0, 0.0], vec![0.0, 10.0, 30.0]]
    );
}

#[test]
fn test_tied_column_minimum_goes_to_lower_row() {
    let p = problem(&[10.0, 10.0], &[10.0, 10.0], &[&[1.0, 4.0], &[1.0, 4.0]]);
    let result = run(&p);

    // Column 0 ties at 1.0 (penalty 0); the row scan reaches row 0 first
    assert_eq!(
        selection_trace(&result.events),
        vec![(Axis::Row, 0), (Axis::Row, 1)]
    );
    assert_eq!(result.events.allocated_cells(), vec![(0, 0), (1, 1)]);
    assert_eq!(rows(&result), vec![vec![10.0, 0.0], vec![0.0, 10.0]]);
}

#[test]
fn test_single_active_counterpart_uses_cost_as_penalty() {
    let p = problem(&[10.0, 5.0], &[15.0], &[&[1.0], &[2.0]]);
    let result = run(&p);

    // Row penalties fall back to the lone cost: row 1 (2.0) beats column 0 (1.0)
    let first = &result.events.events()[0];
    assert_eq!(
        first,
        &Event::PenaltySelected {
            iteration: 0,
            axis: Axis::Row,
            index: 1,
            penalty: 2.0,
        }
    );
    assert_eq!(rows(&result), vec![vec![10.0], vec![5.0]]);
}

// ============================================================================
// Imbalanced Problems
// ============================================================================

#[test]
fn test_excess_supply_left_unallocated() {
    let p = problem(&[30.0, 20.0], &[10.0, 10.0], &[&[1.0, 2.0], &[3.0, 4.0]]);
    let result = run(&p);

    assert_eq!(rows(&result), vec![vec![10.0, 0.0], vec![0.0, 10.0]]);
    assert_eq!(result.remaining_supply, vec![20.0, 10.0]);
    assert_eq!(result.remaining_demand, vec![0.0, 0.0]);
    assert_eq!(result.total_cost(&p), 50.0);
    assert_eq!(result.termination, Termination::Exhausted);
}

#[test]
fn test_default_form_values() {
    // Three suppliers of 100, three clients of 75, every lane costs 5
    let p = problem(
        &[100.0, 100.0, 100.0],
        &[75.0, 75.0, 75.0],
        &[&[5.0, 5.0, 5.0], &[5.0, 5.0, 5.0], &[5.0, 5.0, 5.0]],
    );
    let result = run(&p);

    assert_eq!(
        rows(&result),
        vec![
            vec![75.0, 25.0, 0.0],
            vec![0.0, 50.0, 50.0],
            vec![0.0, 0.0, 25.0],
        ]
    );
    assert_eq!(result.total_cost(&p), 1125.0);
    assert_eq!(result.remaining_supply, vec![0.0, 0.0, 75.0]);
}

#[test]
fn test_excess_demand_no_negative_or_nan() {
    let p = problem(
        &[8.0, 4.0],
        &[10.0, 10.0, 10.0],
        &[&[3.0, 1.0, 4.0], &[1.0, 5.0, 9.0]],
    );
    let result = run(&p);

    for row in result.allocation.rows() {
        for &q in row {
            assert!(q.is_finite() && q >= 0.0);
        }
    }
    for &left in result.remaining_supply.iter().chain(&result.remaining_demand) {
        assert!(left.is_finite() && left >= 0.0);
    }
    assert_eq!(result.allocation.total_shipped(), 12.0);
    assert_eq!(result.total_remaining_demand(), 18.0);
}

// ============================================================================
// Tolerance, Bounds, Determinism
// ============================================================================

#[test]
fn test_remainder_within_tolerance_is_not_chased() {
    // 0.005 of supply is left after demand is met; it stays put
    let p = problem(&[10.005], &[10.0], &[&[2.0]]);
    let result = run(&p);

    assert_eq!(result.iterations, 1);
    assert_eq!(result.allocation.get(0, 0), 10.0);
}

#[test]
fn test_custom_tolerance_ignores_small_lines() {
    let allocator = Allocator::new(AllocatorConfig::with_tolerance(1.0)).unwrap();
    let p = problem(&[0.5, 10.0], &[10.5], &[&[1.0], &[9.0]]);
    let result = allocator.run(&p).unwrap();

    // Origin 0 is at or below tolerance, so only origin 1 ships
    assert_eq!(rows(&result), vec![vec![0.0], vec![10.0]]);
    assert_eq!(result.termination, Termination::Exhausted);
}

#[test]
fn test_iteration_bound_balanced() {
    let p = problem(
        &[7.0, 9.0, 18.0],
        &[5.0, 8.0, 7.0, 14.0],
        &[
            &[19.0, 30.0, 50.0, 10.0],
            &[70.0, 30.0, 40.0, 60.0],
            &[40.0, 8.0, 70.0, 20.0],
        ],
    );
    let result = run(&p);

    assert!(result.iterations <= p.num_origins() + p.num_destinations() - 1);
    assert!(result.allocation.occupied_cells() <= result.iterations);
}

#[test]
fn test_runs_are_bit_identical() {
    let p = problem(
        &[12.5, 7.5, 3.3],
        &[5.25, 14.75, 3.3],
        &[&[2.0, 5.0, 1.1], &[4.0, 1.0, 0.7], &[3.3, 3.3, 3.3]],
    );

    let first = run(&p);
    let second = run(&p);

    let bits = |r: &AllocationResult| -> Vec<u64> {
        r.allocation
            .rows()
            .iter()
            .flatten()
            .map(|q| q.to_bits())
            .collect()
    };
    assert_eq!(bits(&first), bits(&second));
    assert_eq!(first.events, second.events);
}

#[test]
fn test_allocator_shared_across_threads() {
    let allocator = std::sync::Arc::new(Allocator::default());
    let p = problem(&[20.0, 30.0], &[25.0, 25.0], &[&[4.0, 6.0], &[5.0, 3.0]]);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let allocator = allocator.clone();
            let p = p.clone();
            std::thread::spawn(move || allocator.run(&p).unwrap().allocation)
        })
        .collect();

    for handle in handles {
        let plan = handle.join().unwrap();
        assert_eq!(plan.rows(), &[vec![20.0, 0.0], vec![5.0, 25.0]]);
    }
}
