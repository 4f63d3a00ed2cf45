//! PyO3 wrapper for the simulation facade
//!
//! The Python session driver's contract: `reset` at episode start, one
//! `step` per decision, `get_current_state` for the state record, and
//! `halted` for the liveness query.

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{parse_sim_config, snapshot_to_py, step_result_to_py};
use crate::orchestrator::{HospitalSim as RustHospitalSim, SimulationError};

fn to_py_err(err: SimulationError) -> PyErr {
    match err {
        SimulationError::InvalidConfig(_) | SimulationError::InvalidAction { .. } => {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
        }
        SimulationError::ZeroBeds => {
            PyErr::new::<pyo3::exceptions::PyZeroDivisionError, _>(err.to_string())
        }
        _ => PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(err.to_string()),
    }
}

/// Python wrapper for the Rust simulator.
///
/// # Example (from Python)
///
/// ```python
/// from hospital_simulator_core_rs import HospitalSim
///
/// sim = HospitalSim.new({"initial_beds": 200, "initial_patients": 0})
/// sim.step(0)
/// state = sim.get_current_state()
/// print(state["utilization"])
/// ```
#[pyclass(name = "HospitalSim")]
pub struct PyHospitalSim {
    inner: RustHospitalSim,
}

#[pymethods]
impl PyHospitalSim {
    /// Create a simulator from a configuration dict.
    ///
    /// All keys are optional: `initial_patients`, `initial_beds`,
    /// `mean_arrivals_weekday`, `mean_arrivals_weekend`,
    /// `mean_length_of_stay`, `max_bed_change`, `delay_to_change_beds`,
    /// `rng_seed`.
    #[staticmethod]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let rust_config = parse_sim_config(config)?;
        let inner = RustHospitalSim::new(rust_config).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Start a fresh episode: new clock at time zero, `initial_patients`
    /// pre-loaded patients, `initial_beds` beds.
    fn reset(&mut self, initial_patients: u32, initial_beds: i64) -> PyResult<()> {
        self.inner
            .reset(initial_patients, initial_beds)
            .map_err(to_py_err)
    }

    /// Advance one simulated day, requesting a bed-count change of `delta`.
    ///
    /// Raises ValueError when `|delta|` exceeds the configured limit.
    fn step(&mut self, py: Python<'_>, delta: i64) -> PyResult<Py<PyDict>> {
        let result = self.inner.step(delta).map_err(to_py_err)?;
        step_result_to_py(py, &result)
    }

    /// The five-field state record for the current instant.
    ///
    /// Raises ZeroDivisionError when the hospital has zero beds.
    fn get_current_state(&self, py: Python<'_>) -> PyResult<Py<PyDict>> {
        let snapshot = self.inner.get_current_state().map_err(to_py_err)?;
        snapshot_to_py(py, &snapshot)
    }

    /// Always False: the simulation never self-terminates.
    fn halted(&self) -> bool {
        self.inner.halted()
    }

    /// Current simulated time in days.
    fn simulation_time(&self) -> f64 {
        self.inner.now()
    }
}
