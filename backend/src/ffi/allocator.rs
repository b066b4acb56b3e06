//! PyO3 wrapper for Allocator
//!
//! This module provides the Python interface to the Rust allocator.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{allocation_error_to_py, parse_allocator_config, plan_report_to_py};
use crate::allocator::Allocator as RustAllocator;
use crate::models::TransportProblem;
use crate::report::PlanReport;

/// Python wrapper for Rust Allocator
///
/// # Example (from Python)
///
/// ```python
/// from vogel_transport_core_rs import Allocator
///
/// allocator = Allocator({"tolerance": 0.01})
/// plan = allocator.allocate(
///     [20, 30],
///     [25, 25],
///     [[4, 6], [5, 3]],
///     currency="€",
/// )
/// print(plan["formatted_total_cost"])  # 180.00 €
/// ```
#[pyclass(name = "Allocator")]
pub struct PyAllocator {
    inner: RustAllocator,
}

#[pymethods]
impl PyAllocator {
    /// Create an allocator from an optional configuration dict
    ///
    /// # Errors
    ///
    /// Raises ValueError if the tolerance is negative or not finite.
    #[new]
    #[pyo3(signature = (config=None))]
    fn new(config: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
        let rust_config = match config {
            Some(dict) => parse_allocator_config(dict)?,
            None => Default::default(),
        };
        let inner = RustAllocator::new(rust_config).map_err(allocation_error_to_py)?;
        Ok(PyAllocator { inner })
    }

    /// Run Vogel's Approximation Method
    ///
    /// # Returns
    ///
    /// Dictionary with the allocation matrix, totals, per-line flows and
    /// leftovers (see `plan_report_to_py`).
    ///
    /// # Errors
    ///
    /// Raises ValueError naming the offending field for shape mismatches and
    /// negative or non-finite values.
    #[pyo3(signature = (supply, demand, cost, currency=None))]
    fn allocate(
        &self,
        py: Python,
        supply: Vec<f64>,
        demand: Vec<f64>,
        cost: Vec<Vec<f64>>,
        currency: Option<String>,
    ) -> PyResult<Py<PyDict>> {
        let problem = TransportProblem::new(supply, demand, cost)
            .map_err(|e| allocation_error_to_py(e.into()))?;
        let result = self.inner.run(&problem).map_err(allocation_error_to_py)?;
        let currency = currency.unwrap_or_default();
        let report = PlanReport::build(&problem, self.inner.config(), &result, currency)
            .map_err(allocation_error_to_py)?;

        plan_report_to_py(py, &report)
    }

    /// Configured tolerance
    #[getter]
    fn tolerance(&self) -> f64 {
        self.inner.tolerance()
    }
}

/// Module-level shortcut: allocate with an optional tolerance
#[pyfunction]
#[pyo3(signature = (supply, demand, cost, tolerance=None, currency=None))]
pub fn allocate(
    py: Python,
    supply: Vec<f64>,
    demand: Vec<f64>,
    cost: Vec<Vec<f64>>,
    tolerance: Option<f64>,
    currency: Option<String>,
) -> PyResult<Py<PyDict>> {
    let mut config = crate::allocator::AllocatorConfig::default();
    if let Some(tolerance) = tolerance {
        config.tolerance = tolerance;
    }
    let allocator = PyAllocator {
        inner: RustAllocator::new(config).map_err(allocation_error_to_py)?,
    };
    allocator.allocate(py, supply, demand, cost, currency)
}
