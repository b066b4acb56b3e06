//! Vogel Transport Core - Rust Engine
//!
//! Initial feasible solutions for the transportation problem using Vogel's
//! Approximation Method (VAM).
//!
//! # Architecture
//!
//! - **models**: Domain types (TransportProblem, AllocationMatrix, EventLog)
//! - **allocator**: The VAM loop, penalty rules, fingerprints
//! - **report**: Numeric plan summary for front-ends
//!
//! # Critical Invariants
//!
//! 1. Inputs are validated once, before the loop; nothing is clamped
//! 2. Ties resolve first-seen (rows before columns, lowest index first)
//! 3. No state outlives a single call

// Module declarations
pub mod allocator;
pub mod models;
pub mod report;

// Re-exports for convenience
pub use allocator::{
    allocate, AllocationError, AllocationResult, Allocator, AllocatorConfig, Axis, Termination,
    DEFAULT_TOLERANCE,
};
pub use models::{
    allocation::AllocationMatrix,
    event::{Event, EventLog},
    problem::{Location, ProblemError, TransportProblem},
};
pub use report::PlanReport;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn vogel_transport_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::allocator::PyAllocator>()?;
    m.add_function(wrap_pyfunction!(ffi::allocator::allocate, m)?)?;
    Ok(())
}
