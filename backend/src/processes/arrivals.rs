//! Arrival generator process
//!
//! A single long-lived process, created once per reset, that spawns one
//! patient per iteration and then sleeps for an exponential inter-arrival
//! gap. The applicable daily rate depends on the simulated day of week:
//! weekends (day indices 5 and 6) are busier than weekdays.
//!
//! The generator never terminates; `reset` defeats it only by discarding
//! the whole clock and arena.

use serde::{Deserialize, Serialize};

use crate::core::time::is_weekend;
use crate::orchestrator::SimulationError;
use crate::processes::{PatientProcess, Process, ProcessCtx, Transition};

/// How long to sleep before rechecking a disabled (zero) arrival rate.
///
/// Rates may legitimately be zero for only part of the week, so the
/// generator parks for a day at a time instead of forever.
const DISABLED_RECHECK_DAYS: f64 = 1.0;

/// The patient arrival generator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArrivalProcess;

impl ArrivalProcess {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn resume(
        &mut self,
        ctx: &mut ProcessCtx<'_>,
    ) -> Result<Transition, SimulationError> {
        let rate_per_day = if is_weekend(ctx.now()) {
            ctx.config.mean_arrivals_weekend
        } else {
            ctx.config.mean_arrivals_weekday
        };

        if rate_per_day <= 0.0 {
            return Ok(Transition::Sleep(DISABLED_RECHECK_DAYS));
        }

        ctx.spawn(Process::Patient(PatientProcess::new(false)))?;

        let mean_gap = 1.0 / rate_per_day;
        Ok(Transition::Sleep(ctx.rng.exponential(mean_gap)))
    }
}
