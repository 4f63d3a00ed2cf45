//! Simulation facade
//!
//! Owns the clock, the process arena, the hospital counters, and the RNG,
//! and exposes the external `reset` / `step` / `get_current_state` /
//! `halted` contract consumed by control loops and plotting front ends.

pub mod checkpoint;
pub mod engine;

pub use checkpoint::Checkpoint;
pub use engine::{HospitalSim, HospitalSimConfig, SimulationError, StepResult, TIME_STEP};
