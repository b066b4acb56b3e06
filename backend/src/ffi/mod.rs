//! Python bindings (feature `pyo3`)
//!
//! Exposes the allocator to a Python front-end. Inputs arrive as plain lists
//! and dicts; results go back as dicts.

pub mod allocator;
pub mod types;
