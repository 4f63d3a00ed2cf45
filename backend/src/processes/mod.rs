//! Process abstraction and the domain processes built on it
//!
//! A process is a unit of domain behavior that runs until it asks to sleep
//! for a non-negative number of days, then is resumed by the clock at the
//! matching wake-up. Everything between two suspension points is atomic
//! with respect to other processes; there is no real parallelism, only
//! interleaving in logical time.
//!
//! Processes are explicit state machines (no stackful coroutines): each
//! resumption inspects the current phase, mutates hospital state, and
//! returns a [`Transition`]. They live in a slot arena ([`ProcessTable`])
//! indexed by [`ProcessId`] so that a high arrival rate does not churn the
//! allocator with per-process heap objects.

pub mod arrivals;
pub mod beds;
pub mod patient;

pub use arrivals::ArrivalProcess;
pub use beds::BedChangeProcess;
pub use patient::PatientProcess;

use serde::{Deserialize, Serialize};

use crate::core::clock::{ProcessId, VirtualClock};
use crate::models::state::HospitalState;
use crate::orchestrator::{HospitalSimConfig, SimulationError};
use crate::rng::RngManager;

/// What a process wants to do next after a resumption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Suspend for this many days, then resume.
    Sleep(f64),
    /// Terminate; the arena slot is released.
    Done,
}

/// A suspended domain-process continuation.
///
/// The variant set is closed: the simulation has exactly three process
/// kinds. Dispatch is a plain match, which keeps the arena slots `Sized`
/// and serializable for checkpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Process {
    /// One patient's lifecycle: arrival, admission or overflow, discharge.
    Patient(PatientProcess),
    /// The single long-lived arrival generator.
    Arrivals(ArrivalProcess),
    /// One delayed bed-capacity adjustment.
    BedChange(BedChangeProcess),
}

impl Process {
    /// Run the process until its next suspension point or termination.
    pub fn resume(&mut self, ctx: &mut ProcessCtx<'_>) -> Result<Transition, SimulationError> {
        match self {
            Process::Patient(p) => p.resume(ctx),
            Process::Arrivals(p) => p.resume(ctx),
            Process::BedChange(p) => p.resume(ctx),
        }
    }
}

/// Everything a running process may touch.
///
/// Handed to [`Process::resume`] by the driving loop; holds the borrows
/// for exactly one resumption.
pub struct ProcessCtx<'a> {
    pub clock: &'a mut VirtualClock,
    pub table: &'a mut ProcessTable,
    pub state: &'a mut HospitalState,
    pub rng: &'a mut RngManager,
    pub config: &'a HospitalSimConfig,
}

impl ProcessCtx<'_> {
    /// Current simulated time in days.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Spawn a new process, scheduled at the current instant.
    ///
    /// The wake-up gets a fresh sequence number, so the new process runs
    /// after everything already due now (fire-and-forget, no parent/child
    /// coupling).
    pub fn spawn(&mut self, process: Process) -> Result<ProcessId, SimulationError> {
        let pid = self.table.insert(process);
        self.clock.schedule(0.0, pid)?;
        Ok(pid)
    }
}

/// Slot arena of live processes, indexed by [`ProcessId`].
///
/// Freed slots are recycled through a free list. A process is *taken* out
/// of its slot for the duration of a resumption, then either put back (it
/// slept again) or released (it terminated). At most one pending wake-up
/// exists per live process, so a popped wake-up always finds its slot
/// occupied.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessTable {
    slots: Vec<Option<Process>>,
    free: Vec<u32>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a process, reusing a freed slot when one is available.
    pub fn insert(&mut self, process: Process) -> ProcessId {
        match self.free.pop() {
            Some(index) => {
                self.slots[index as usize] = Some(process);
                ProcessId(index)
            }
            None => {
                self.slots.push(Some(process));
                ProcessId((self.slots.len() - 1) as u32)
            }
        }
    }

    /// Remove the process from its slot for one resumption.
    pub fn take(&mut self, pid: ProcessId) -> Option<Process> {
        self.slots.get_mut(pid.index())?.take()
    }

    /// Return a still-live process to its slot after it slept again.
    pub fn put_back(&mut self, pid: ProcessId, process: Process) {
        debug_assert!(self.slots[pid.index()].is_none());
        self.slots[pid.index()] = Some(process);
    }

    /// Recycle the slot of a terminated process.
    pub fn release(&mut self, pid: ProcessId) {
        debug_assert!(self.slots[pid.index()].is_none());
        self.free.push(pid.0);
    }

    /// Number of live (suspended) processes.
    pub fn active(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_are_recycled() {
        let mut table = ProcessTable::new();
        let a = table.insert(Process::Arrivals(ArrivalProcess::new()));
        let b = table.insert(Process::Patient(PatientProcess::new(false)));
        assert_ne!(a, b);
        assert_eq!(table.active(), 2);

        assert!(table.take(a).is_some());
        table.release(a);
        assert_eq!(table.active(), 1);

        // The freed slot is reused before the vector grows.
        let c = table.insert(Process::Patient(PatientProcess::new(true)));
        assert_eq!(c, a);
        assert_eq!(table.active(), 2);
    }

    #[test]
    fn take_empties_the_slot() {
        let mut table = ProcessTable::new();
        let pid = table.insert(Process::Arrivals(ArrivalProcess::new()));
        assert!(table.take(pid).is_some());
        assert!(table.take(pid).is_none());
    }
}
