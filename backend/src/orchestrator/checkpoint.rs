//! Checkpoint - save/load simulation state
//!
//! Serializes the complete simulator (config, clock with its pending
//! wake-ups, process arena, counters, RNG state) so a run can pause and
//! resume. A restored simulator continues bit-identically to one that was
//! never interrupted: the wake-up ordering keys travel with the events, and
//! the RNG state is a single u64.
//!
//! This is state save/restore, not trajectory history. Past snapshots are
//! not retained.

use serde::{Deserialize, Serialize};

use crate::core::clock::VirtualClock;
use crate::models::state::HospitalState;
use crate::orchestrator::engine::{HospitalSim, HospitalSimConfig, SimulationError};
use crate::processes::ProcessTable;
use crate::rng::RngManager;

/// Complete simulator state at one instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Configuration the simulator was built with (embedded verbatim so a
    /// restore cannot silently pair state with a different parameterization)
    pub config: HospitalSimConfig,

    /// Virtual clock, including every pending wake-up and the sequence
    /// counter
    pub clock: VirtualClock,

    /// All suspended process continuations
    pub processes: ProcessTable,

    /// Hospital counters
    pub state: HospitalState,

    /// RNG state (CRITICAL for determinism)
    pub rng: RngManager,
}

impl Checkpoint {
    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, SimulationError> {
        serde_json::to_string(self).map_err(|e| SimulationError::Checkpoint(e.to_string()))
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(json).map_err(|e| SimulationError::Checkpoint(e.to_string()))
    }
}

impl HospitalSim {
    /// Capture the complete current state.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            config: self.config().clone(),
            clock: self.clock_snapshot(),
            processes: self.processes_snapshot(),
            state: self.state().clone(),
            rng: self.rng_snapshot(),
        }
    }

    /// Rebuild a simulator from a checkpoint.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidConfig`] if the embedded configuration
    /// fails validation (e.g. a checkpoint edited by hand).
    pub fn restore(checkpoint: Checkpoint) -> Result<Self, SimulationError> {
        Self::from_parts(
            checkpoint.config,
            checkpoint.clock,
            checkpoint.processes,
            checkpoint.state,
            checkpoint.rng,
        )
    }
}
