//! Hospital state
//!
//! The aggregate counters mutated by resumed domain processes, plus the
//! read-only snapshot handed to external collaborators.
//!
//! # Critical Invariants
//!
//! 1. **Admission-time capacity check**: `num_patients <= num_beds` holds at
//!    every admission instant, but `num_beds` may later drop below
//!    `num_patients` when capacity shrinks; admitted patients are never
//!    evicted.
//! 2. **No bed floor**: `num_beds` may go negative under large negative
//!    capacity changes; this mirrors the modeled control problem and is
//!    deliberately not clamped.
//! 3. **Single-threaded mutation**: processes mutate the state only while
//!    running, never while suspended, so the resumption order is the only
//!    concurrency control needed.

use serde::{Deserialize, Serialize};

/// Aggregate hospital counters, owned by the simulation facade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalState {
    /// Current bed capacity. May go negative; see module docs.
    pub num_beds: i64,

    /// Patients currently receiving care (each occupies one bed slot).
    pub num_patients: u32,

    /// Patients turned away since the start of the current step.
    pub num_patients_overflow: u32,
}

impl HospitalState {
    /// Fresh state with the given capacity and no patients.
    pub fn new(initial_beds: i64) -> Self {
        Self {
            num_beds: initial_beds,
            num_patients: 0,
            num_patients_overflow: 0,
        }
    }

    /// Capacity check performed at the arrival instant only.
    pub fn has_free_bed(&self) -> bool {
        (self.num_patients as i64) < self.num_beds
    }

    /// Admit one patient (the caller has already checked capacity).
    pub fn admit(&mut self) {
        self.num_patients += 1;
    }

    /// Discharge one admitted patient.
    pub fn discharge(&mut self) {
        debug_assert!(self.num_patients > 0, "discharge without admission");
        self.num_patients -= 1;
    }

    /// Record a patient turned away for lack of beds.
    pub fn record_overflow(&mut self) {
        self.num_patients_overflow += 1;
    }

    /// Ratio of admitted patients to beds.
    ///
    /// `None` when `num_beds == 0`: utilization is meaningless without
    /// beds, and the facade surfaces this as an error rather than guessing
    /// a sentinel.
    pub fn utilization(&self) -> Option<f64> {
        if self.num_beds == 0 {
            None
        } else {
            Some(self.num_patients as f64 / self.num_beds as f64)
        }
    }
}

/// The five-field state record exposed to collaborators.
///
/// Collaborators sample one snapshot per simulated day, always *before* the
/// step that produces the next day's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Simulated time in days
    pub simulation_time: f64,
    /// Current bed capacity
    pub num_beds: i64,
    /// Patients currently admitted
    pub num_patients: u32,
    /// Patients turned away during the current step window
    pub num_patients_overflow: u32,
    /// `num_patients / num_beds`
    pub utilization: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission_check_is_strict() {
        let mut state = HospitalState::new(2);
        assert!(state.has_free_bed());
        state.admit();
        assert!(state.has_free_bed());
        state.admit();
        assert!(!state.has_free_bed());
    }

    #[test]
    fn utilization_none_at_zero_beds() {
        let state = HospitalState::new(0);
        assert_eq!(state.utilization(), None);
    }

    #[test]
    fn utilization_ratio() {
        let mut state = HospitalState::new(4);
        state.admit();
        state.admit();
        state.admit();
        assert_eq!(state.utilization(), Some(0.75));
    }

    #[test]
    fn negative_capacity_is_representable() {
        let mut state = HospitalState::new(5);
        state.num_beds -= 20;
        assert_eq!(state.num_beds, -15);
        assert!(!state.has_free_bed());
    }
}
