//! Type conversion utilities for the FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict).

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::models::state::StateSnapshot;
use crate::orchestrator::{HospitalSimConfig, StepResult};

/// Extract a field from a Python dict, falling back to a default when the
/// key is missing. Type-conversion failures are still errors.
fn extract_with_default<'py, T: FromPyObject<'py>>(
    dict: &Bound<'py, PyDict>,
    key: &str,
    default: T,
) -> PyResult<T> {
    match dict.get_item(key)? {
        Some(value) => value.extract(),
        None => Ok(default),
    }
}

/// Convert a Python dict to a [`HospitalSimConfig`].
///
/// Every field is optional; missing fields take the reference defaults.
pub fn parse_sim_config(py_config: &Bound<'_, PyDict>) -> PyResult<HospitalSimConfig> {
    let defaults = HospitalSimConfig::default();

    Ok(HospitalSimConfig {
        initial_patients: extract_with_default(
            py_config,
            "initial_patients",
            defaults.initial_patients,
        )?,
        initial_beds: extract_with_default(py_config, "initial_beds", defaults.initial_beds)?,
        mean_arrivals_weekday: extract_with_default(
            py_config,
            "mean_arrivals_weekday",
            defaults.mean_arrivals_weekday,
        )?,
        mean_arrivals_weekend: extract_with_default(
            py_config,
            "mean_arrivals_weekend",
            defaults.mean_arrivals_weekend,
        )?,
        mean_length_of_stay: extract_with_default(
            py_config,
            "mean_length_of_stay",
            defaults.mean_length_of_stay,
        )?,
        max_bed_change: extract_with_default(py_config, "max_bed_change", defaults.max_bed_change)?,
        delay_to_change_beds: extract_with_default(
            py_config,
            "delay_to_change_beds",
            defaults.delay_to_change_beds,
        )?,
        rng_seed: extract_with_default(py_config, "rng_seed", defaults.rng_seed)?,
    })
}

/// Convert a [`StateSnapshot`] to a Python dict.
pub fn snapshot_to_py(py: Python<'_>, snapshot: &StateSnapshot) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("simulation_time", snapshot.simulation_time)?;
    dict.set_item("num_beds", snapshot.num_beds)?;
    dict.set_item("num_patients", snapshot.num_patients)?;
    dict.set_item("num_patients_overflow", snapshot.num_patients_overflow)?;
    dict.set_item("utilization", snapshot.utilization)?;
    Ok(dict.unbind())
}

/// Convert a [`StepResult`] to a Python dict.
pub fn step_result_to_py(py: Python<'_>, result: &StepResult) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("simulation_time", result.simulation_time)?;
    dict.set_item("events_processed", result.events_processed)?;
    Ok(dict.unbind())
}
