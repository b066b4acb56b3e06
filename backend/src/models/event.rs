//! Event logging for allocation tracing and auditing.
//!
//! Every step the allocator takes is recorded as an [`Event`]. The log makes a
//! run inspectable after the fact:
//! - Which penalty won each iteration (and on which axis)
//! - Which lane received stock, how much, and at what unit cost
//! - Why the loop stopped and what was left over
//!
//! # Example
//!
//! ```rust
//! use vogel_transport_core_rs::models::Event;
//! use vogel_transport_core_rs::allocator::Axis;
//!
//! let event = Event::PenaltySelected {
//!     iteration: 0,
//!     axis: Axis::Column,
//!     index: 1,
//!     penalty: 3.0,
//! };
//!
//! println!("Event at iteration {:?}: {:?}", event.iteration(), event);
//! ```

use crate::allocator::{Axis, Termination};

/// Allocation event capturing one decision of the run.
///
/// Events are logged in the order they occur. Per-iteration events carry the
/// zero-based iteration number.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A row or column won the penalty scan
    PenaltySelected {
        iteration: usize,
        axis: Axis,
        index: usize,
        penalty: f64,
    },

    /// A lane received its allocation
    CellAllocated {
        iteration: usize,
        row: usize,
        col: usize,
        quantity: f64,
        unit_cost: f64,
    },

    /// The loop stopped
    Terminated {
        iterations: usize,
        reason: Termination,
        remaining_supply: f64,
        remaining_demand: f64,
    },
}

impl Event {
    /// Iteration the event belongs to (`None` for the closing event)
    pub fn iteration(&self) -> Option<usize> {
        match self {
            Event::PenaltySelected { iteration, .. } => Some(*iteration),
            Event::CellAllocated { iteration, .. } => Some(*iteration),
            Event::Terminated { .. } => None,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::PenaltySelected { .. } => "PenaltySelected",
            Event::CellAllocated { .. } => "CellAllocated",
            Event::Terminated { .. } => "Terminated",
        }
    }

    /// Lane touched by the event, if any
    pub fn cell(&self) -> Option<(usize, usize)> {
        match self {
            Event::CellAllocated { row, col, .. } => Some((*row, *col)),
            _ => None,
        }
    }
}

/// Event log for storing and querying allocation events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific iteration
    pub fn events_at_iteration(&self, iteration: usize) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.iteration() == Some(iteration))
            .collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Lanes in the order they were allocated
    pub fn allocated_cells(&self) -> Vec<(usize, usize)> {
        self.events.iter().filter_map(Event::cell).collect()
    }
}
