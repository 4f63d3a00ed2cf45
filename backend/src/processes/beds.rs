//! Bed-capacity adjustment process
//!
//! Applies a validated bed-count delta after `delay_to_change_beds` days.
//! One such process is spawned per `step` call; several may be in flight at
//! once, and their effects serialize through the clock's resumption order.
//!
//! There is no floor: a large negative delta can push `num_beds` below
//! zero, and patients already admitted are never evicted.

use serde::{Deserialize, Serialize};

use crate::orchestrator::SimulationError;
use crate::processes::{ProcessCtx, Transition};

/// A pending bed-capacity change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedChangeProcess {
    delta: i64,
    phase: BedChangePhase,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum BedChangePhase {
    Requested,
    Waited,
}

impl BedChangeProcess {
    pub fn new(delta: i64) -> Self {
        Self {
            delta,
            phase: BedChangePhase::Requested,
        }
    }

    pub(crate) fn resume(
        &mut self,
        ctx: &mut ProcessCtx<'_>,
    ) -> Result<Transition, SimulationError> {
        match self.phase {
            BedChangePhase::Requested => {
                self.phase = BedChangePhase::Waited;
                Ok(Transition::Sleep(ctx.config.delay_to_change_beds))
            }
            BedChangePhase::Waited => {
                ctx.state.num_beds += self.delta;
                Ok(Transition::Done)
            }
        }
    }
}
