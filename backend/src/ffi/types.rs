//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList, etc.)

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::allocator::{AllocationError, AllocatorConfig, DEFAULT_TOLERANCE};
use crate::report::PlanReport;

/// Extract a field with a default value if missing.
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    for<'py> T: FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Convert Python dict to AllocatorConfig
///
/// Missing keys fall back to the Rust defaults. Range checks are left to
/// [`AllocatorConfig::validate`] so the message matches the Rust API.
pub fn parse_allocator_config(py_config: &Bound<'_, PyDict>) -> PyResult<AllocatorConfig> {
    let tolerance: f64 = extract_with_default(py_config, "tolerance", DEFAULT_TOLERANCE)?;
    Ok(AllocatorConfig { tolerance })
}

/// Map a Rust allocation error to a Python exception
///
/// Input problems are the caller's fault (`ValueError`); anything else is a
/// `RuntimeError`.
pub fn allocation_error_to_py(err: AllocationError) -> PyErr {
    match err {
        AllocationError::Problem(_) | AllocationError::InvalidTolerance(_) => {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
        }
        AllocationError::SerializationError(_) => {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(err.to_string())
        }
    }
}

/// Convert PlanReport to Python dict
pub fn plan_report_to_py(py: Python, report: &PlanReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);

    dict.set_item("allocation", report.allocation.rows().to_vec())?;
    dict.set_item("origin_labels", report.origin_labels.clone())?;
    dict.set_item("destination_labels", report.destination_labels.clone())?;

    // Totals
    dict.set_item("total_cost", report.total_cost)?;
    dict.set_item("formatted_total_cost", report.formatted_total_cost())?;
    dict.set_item("total_volume", report.total_volume)?;
    dict.set_item("total_shipped", report.total_shipped)?;
    dict.set_item("currency", report.currency.as_str())?;

    // Per-line flows
    dict.set_item("shipped_by_origin", report.shipped_by_origin.clone())?;
    dict.set_item("delivered_by_destination", report.delivered_by_destination.clone())?;
    dict.set_item("unallocated_supply", report.unallocated_supply.clone())?;
    dict.set_item("unmet_demand", report.unmet_demand.clone())?;

    // Run metadata
    dict.set_item("iterations", report.iterations)?;
    dict.set_item("termination", report.termination.to_string())?;
    dict.set_item("problem_hash", report.problem_hash.as_str())?;
    dict.set_item("allocation_hash", report.allocation_hash.as_str())?;

    Ok(dict.into())
}
