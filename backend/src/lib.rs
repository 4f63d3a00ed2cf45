//! Hospital Simulator Core - Rust Engine
//!
//! Discrete-event hospital bed-occupancy simulator with deterministic
//! execution and externally controlled capacity.
//!
//! # Architecture
//!
//! - **core**: Virtual clock and calendar helpers
//! - **models**: Domain types (HospitalState, StateSnapshot)
//! - **processes**: Cooperative process continuations (patients, arrivals,
//!   bed changes)
//! - **orchestrator**: Facade, driving loop, and checkpointing
//! - **rng**: Deterministic random number generation
//!
//! # Critical Invariants
//!
//! 1. Bed counts are i64 and may go negative; patient counts are u32
//! 2. All randomness is deterministic (seeded RNG)
//! 3. Simultaneous wake-ups resolve in scheduling order (FIFO)
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod processes;
pub mod rng;

// Re-exports for convenience
pub use models::{HospitalState, StateSnapshot};
pub use orchestrator::{
    Checkpoint, HospitalSim, HospitalSimConfig, SimulationError, StepResult, TIME_STEP,
};
pub use rng::RngManager;

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn hospital_simulator_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::orchestrator::PyHospitalSim>()?;
    Ok(())
}
