//! Domain models for the transport planner

pub mod allocation;
pub mod event;
pub mod problem;

// Re-exports
pub use allocation::AllocationMatrix;
pub use event::{Event, EventLog};
pub use problem::{Location, ProblemError, TransportProblem};
