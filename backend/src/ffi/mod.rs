//! FFI layer (PyO3)
//!
//! Compiled only with the `pyo3` cargo feature. Exposes the external
//! step/reset/state contract to Python session drivers.

pub mod orchestrator;
pub mod types;
