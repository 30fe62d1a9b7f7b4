//! Python bindings via PyO3
//!
//! This module provides the JSON-based Python interface for rapid_phrasegraph.

pub mod json;

use pyo3::prelude::*;

/// Register all Python functions
pub fn register_module(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    m.add_function(wrap_pyfunction!(json::extract_from_json, m)?)?;
    m.add_function(wrap_pyfunction!(json::extract_batch_from_json, m)?)?;

    Ok(())
}
