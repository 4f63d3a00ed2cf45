//! Simulation engine
//!
//! The [`HospitalSim`] facade drives the discrete-event kernel:
//!
//! ```text
//! step(delta):
//! 1. Validate |delta| against max_bed_change (reject before any mutation)
//! 2. Spawn a bed-change process carrying delta
//! 3. Zero the per-step overflow counter
//! 4. Advance the clock by exactly one day, resuming every process whose
//!    wake-up falls inside the day (boundary inclusive)
//! ```
//!
//! Resumed processes mutate the counters and may spawn or reschedule other
//! processes; data flows back out only through [`get_current_state`].
//!
//! # Determinism
//!
//! All randomness goes through the seeded xorshift64* [`RngManager`], and
//! wake-ups at equal times run in scheduling order. Same seed + same call
//! sequence = bit-identical trajectories.
//!
//! [`get_current_state`]: HospitalSim::get_current_state
//!
//! # Example
//!
//! ```rust
//! use hospital_simulator_core_rs::{HospitalSim, HospitalSimConfig};
//!
//! let config = HospitalSimConfig {
//!     initial_patients: 0,
//!     initial_beds: 200,
//!     ..Default::default()
//! };
//!
//! let mut sim = HospitalSim::new(config).unwrap();
//! for _ in 0..7 {
//!     let snapshot = sim.get_current_state().unwrap();
//!     let delta = if snapshot.utilization >= 0.9 { 25 } else { 0 };
//!     sim.step(delta).unwrap();
//! }
//! assert_eq!(sim.now(), 7.0);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::clock::{ClockError, ProcessId, VirtualClock};
use crate::models::state::{HospitalState, StateSnapshot};
use crate::processes::{
    ArrivalProcess, BedChangeProcess, PatientProcess, Process, ProcessCtx, ProcessTable,
    Transition,
};
use crate::rng::RngManager;

/// Length of one step in simulated days.
pub const TIME_STEP: f64 = 1.0;

// ============================================================================
// Configuration
// ============================================================================

/// Complete simulation configuration.
///
/// Defaults mirror the reference parameterization: a 200-bed hospital with
/// ~90 weekday / ~120 weekend arrivals per day and a 3-day mean stay, where
/// capacity can move by at most 25 beds per day and a change takes 1 day to
/// take effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalSimConfig {
    /// Patients already in the hospital when the simulation starts
    pub initial_patients: u32,

    /// Bed capacity at start
    pub initial_beds: i64,

    /// Mean patient arrivals per weekday
    pub mean_arrivals_weekday: f64,

    /// Mean patient arrivals per weekend day
    pub mean_arrivals_weekend: f64,

    /// Mean length of stay in days (exponential)
    pub mean_length_of_stay: f64,

    /// Largest bed-count change accepted per step (magnitude)
    pub max_bed_change: i64,

    /// Days between a bed-change request and its effect
    pub delay_to_change_beds: f64,

    /// RNG seed for deterministic replay
    pub rng_seed: u64,
}

impl Default for HospitalSimConfig {
    fn default() -> Self {
        Self {
            initial_patients: 0,
            initial_beds: 200,
            mean_arrivals_weekday: 90.0,
            mean_arrivals_weekend: 120.0,
            mean_length_of_stay: 3.0,
            max_bed_change: 25,
            delay_to_change_beds: 1.0,
            rng_seed: 0,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Simulation error types.
///
/// All failures are local and synchronous; there is no I/O and no retry
/// semantics. The facade validates the one externally supplied input
/// (`delta`) before scheduling anything, so a rejected action never
/// partially mutates state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Configuration validation error
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Requested bed-count change exceeds the configured magnitude bound
    #[error("bed change {delta} exceeds the per-step limit of {max}")]
    InvalidAction { delta: i64, max: i64 },

    /// Utilization is undefined while the hospital has zero beds
    #[error("utilization undefined: hospital has zero beds")]
    ZeroBeds,

    /// Kernel invariant violation (negative suspension delay)
    #[error(transparent)]
    Clock(#[from] ClockError),

    /// Checkpoint serialization or restore failure
    #[error("checkpoint error: {0}")]
    Checkpoint(String),
}

// ============================================================================
// Facade
// ============================================================================

/// Result of a single step.
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Simulated time after the step, in days
    pub simulation_time: f64,

    /// Number of process resumptions executed during the step
    pub events_processed: usize,
}

/// Hospital bed-occupancy simulator.
///
/// Owns all simulation state. The only shared mutable resource is the
/// hospital counter block, and processes touch it only while running, so
/// the single-threaded resumption discipline is the concurrency control.
pub struct HospitalSim {
    config: HospitalSimConfig,
    clock: VirtualClock,
    processes: ProcessTable,
    state: HospitalState,
    rng: RngManager,
}

impl HospitalSim {
    /// Create a simulator and run its initial reset.
    ///
    /// The RNG is seeded exactly once here; later [`reset`] calls keep the
    /// stream rolling so multi-episode drivers stay deterministic
    /// end-to-end.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidConfig`] when a parameter is out of range.
    ///
    /// [`reset`]: HospitalSim::reset
    pub fn new(config: HospitalSimConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let mut sim = Self {
            rng: RngManager::new(config.rng_seed),
            clock: VirtualClock::new(),
            processes: ProcessTable::new(),
            state: HospitalState::new(config.initial_beds),
            config,
        };
        let (initial_patients, initial_beds) =
            (sim.config.initial_patients, sim.config.initial_beds);
        sim.reset(initial_patients, initial_beds)?;
        Ok(sim)
    }

    fn validate_config(config: &HospitalSimConfig) -> Result<(), SimulationError> {
        if config.initial_beds < 0 {
            return Err(SimulationError::InvalidConfig(
                "initial_beds must be non-negative".to_string(),
            ));
        }
        if config.max_bed_change < 0 {
            return Err(SimulationError::InvalidConfig(
                "max_bed_change must be non-negative".to_string(),
            ));
        }
        if !(config.mean_length_of_stay > 0.0) || !config.mean_length_of_stay.is_finite() {
            return Err(SimulationError::InvalidConfig(
                "mean_length_of_stay must be positive and finite".to_string(),
            ));
        }
        if !(config.mean_arrivals_weekday >= 0.0) || !config.mean_arrivals_weekday.is_finite() {
            return Err(SimulationError::InvalidConfig(
                "mean_arrivals_weekday must be non-negative and finite".to_string(),
            ));
        }
        if !(config.mean_arrivals_weekend >= 0.0) || !config.mean_arrivals_weekend.is_finite() {
            return Err(SimulationError::InvalidConfig(
                "mean_arrivals_weekend must be non-negative and finite".to_string(),
            ));
        }
        if !(config.delay_to_change_beds >= 0.0) || !config.delay_to_change_beds.is_finite() {
            return Err(SimulationError::InvalidConfig(
                "delay_to_change_beds must be non-negative and finite".to_string(),
            ));
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Current simulated time in days.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// The configuration this simulator was built with.
    pub fn config(&self) -> &HospitalSimConfig {
        &self.config
    }

    /// Direct read access to the counters (snapshots are preferred).
    pub fn state(&self) -> &HospitalState {
        &self.state
    }

    /// Number of live (suspended) processes.
    pub fn active_processes(&self) -> usize {
        self.processes.active()
    }

    /// Liveness query for session drivers. This simulation never
    /// self-terminates.
    pub fn halted(&self) -> bool {
        false
    }

    // ========================================================================
    // External contract
    // ========================================================================

    /// Discard the clock and every process, then rebuild the initial state.
    ///
    /// Creates a fresh clock at time zero, sets `num_beds` to
    /// `initial_beds` with no patients, spawns `initial_patients`
    /// initial-batch patient processes followed by the arrival generator,
    /// and settles all time-zero events, so initial admissions and
    /// overflows are visible immediately after this call. Pending wake-ups
    /// from the previous episode are defeated wholesale by the discard;
    /// individual events are never cancelled.
    pub fn reset(&mut self, initial_patients: u32, initial_beds: i64) -> Result<(), SimulationError> {
        if initial_beds < 0 {
            return Err(SimulationError::InvalidConfig(
                "initial_beds must be non-negative".to_string(),
            ));
        }

        self.clock = VirtualClock::new();
        self.processes = ProcessTable::new();
        self.state = HospitalState::new(initial_beds);

        for _ in 0..initial_patients {
            self.spawn(Process::Patient(PatientProcess::new(true)))?;
        }
        self.spawn(Process::Arrivals(ArrivalProcess::new()))?;

        self.run_until(0.0)?;
        Ok(())
    }

    /// Advance the simulation by one day, applying `delta` beds after the
    /// configured delay.
    ///
    /// The overflow counter is zeroed at the start of every step, so a
    /// snapshot taken after the step reports overflow for that day only.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidAction`] when `|delta| > max_bed_change`;
    /// the rejection happens before anything is scheduled, leaving time and
    /// state untouched.
    pub fn step(&mut self, delta: i64) -> Result<StepResult, SimulationError> {
        if delta.abs() > self.config.max_bed_change {
            return Err(SimulationError::InvalidAction {
                delta,
                max: self.config.max_bed_change,
            });
        }

        self.spawn(Process::BedChange(BedChangeProcess::new(delta)))?;
        self.state.num_patients_overflow = 0;

        let target = self.clock.now() + TIME_STEP;
        let events_processed = self.run_until(target)?;

        Ok(StepResult {
            simulation_time: self.clock.now(),
            events_processed,
        })
    }

    /// Snapshot the current counters.
    ///
    /// # Errors
    ///
    /// [`SimulationError::ZeroBeds`] when `num_beds == 0`. Utilization is
    /// a fail condition there, not a sentinel.
    pub fn get_current_state(&self) -> Result<StateSnapshot, SimulationError> {
        let utilization = self
            .state
            .utilization()
            .ok_or(SimulationError::ZeroBeds)?;

        Ok(StateSnapshot {
            simulation_time: self.clock.now(),
            num_beds: self.state.num_beds,
            num_patients: self.state.num_patients,
            num_patients_overflow: self.state.num_patients_overflow,
            utilization,
        })
    }

    // ========================================================================
    // Checkpoint support
    // ========================================================================

    pub(crate) fn clock_snapshot(&self) -> VirtualClock {
        self.clock.clone()
    }

    pub(crate) fn processes_snapshot(&self) -> ProcessTable {
        self.processes.clone()
    }

    pub(crate) fn rng_snapshot(&self) -> RngManager {
        self.rng.clone()
    }

    pub(crate) fn from_parts(
        config: HospitalSimConfig,
        clock: VirtualClock,
        processes: ProcessTable,
        state: HospitalState,
        rng: RngManager,
    ) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;
        Ok(Self {
            config,
            clock,
            processes,
            state,
            rng,
        })
    }

    // ========================================================================
    // Kernel driving loop
    // ========================================================================

    /// Spawn a process, scheduled at the current instant.
    fn spawn(&mut self, process: Process) -> Result<ProcessId, SimulationError> {
        let pid = self.processes.insert(process);
        self.clock.schedule(0.0, pid)?;
        Ok(pid)
    }

    /// Resume every process due at or before `target`, in wake-time order
    /// with FIFO tie-breaking, then clamp the clock to `target`.
    fn run_until(&mut self, target: f64) -> Result<usize, SimulationError> {
        let mut processed = 0;

        while let Some(pid) = self.clock.pop_due(target) {
            let Some(mut process) = self.processes.take(pid) else {
                debug_assert!(false, "wake-up for vacant process slot {pid:?}");
                continue;
            };

            let transition = {
                let mut ctx = ProcessCtx {
                    clock: &mut self.clock,
                    table: &mut self.processes,
                    state: &mut self.state,
                    rng: &mut self.rng,
                    config: &self.config,
                };
                process.resume(&mut ctx)?
            };

            match transition {
                Transition::Sleep(delay) => {
                    self.clock.schedule(delay, pid)?;
                    self.processes.put_back(pid, process);
                }
                Transition::Done => self.processes.release(pid),
            }
            processed += 1;
        }

        self.clock.advance_to(target);
        Ok(processed)
    }
}
