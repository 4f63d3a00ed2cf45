//! Patient lifecycle process
//!
//! `Arrived → Admitted → Staying → Discharged`, or `Arrived → Overflowed`
//! when no bed is free at the arrival instant. Overflowed patients are not
//! retried; discharged patients free their bed implicitly by decrementing
//! the patient count.

use serde::{Deserialize, Serialize};

use crate::orchestrator::SimulationError;
use crate::processes::{ProcessCtx, Transition};

/// One patient's journey through the hospital.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientProcess {
    /// Part of the pre-loaded batch created at reset? Initial-batch stays
    /// are scaled by a Uniform(0,1) draw to model a partially elapsed stay.
    initial_batch: bool,
    phase: PatientPhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum PatientPhase {
    Arrived,
    Staying,
}

impl PatientProcess {
    pub fn new(initial_batch: bool) -> Self {
        Self {
            initial_batch,
            phase: PatientPhase::Arrived,
        }
    }

    pub(crate) fn resume(
        &mut self,
        ctx: &mut ProcessCtx<'_>,
    ) -> Result<Transition, SimulationError> {
        match self.phase {
            PatientPhase::Arrived => {
                if !ctx.state.has_free_bed() {
                    ctx.state.record_overflow();
                    return Ok(Transition::Done);
                }

                ctx.state.admit();

                let mut stay = ctx.rng.exponential(ctx.config.mean_length_of_stay);
                if self.initial_batch {
                    // Remaining stay only: the patient was admitted some
                    // unknown time before the simulation started.
                    stay *= ctx.rng.next_f64();
                }

                self.phase = PatientPhase::Staying;
                Ok(Transition::Sleep(stay))
            }
            PatientPhase::Staying => {
                ctx.state.discharge();
                Ok(Transition::Done)
            }
        }
    }
}
