//! Allocator - Vogel's Approximation Method
//!
//! See `engine.rs` for the allocation loop and `penalty.rs` for the penalty
//! scan, selection and tie-break rules.

pub mod engine;
pub mod fingerprint;
pub mod penalty;

// Re-export main types for convenience
pub use engine::{
    allocate, selection_trace, AllocationError, AllocationResult, Allocator, AllocatorConfig,
    Termination, DEFAULT_TOLERANCE,
};
pub use fingerprint::{allocation_hash, compute_config_hash, problem_hash};
pub use penalty::{Axis, PenaltyRecord, SENTINEL_PENALTY};
