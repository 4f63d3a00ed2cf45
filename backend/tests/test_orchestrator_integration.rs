//! Integration tests for the simulation facade
//!
//! These tests validate the complete step cycle from action validation
//! through process resumption to the reported state snapshot.

use hospital_simulator_core_rs::{HospitalSim, HospitalSimConfig, SimulationError};

/// Helper: configuration with arrivals disabled so only externally
/// triggered activity (initial patients, bed changes) moves the counters.
fn quiet_config(initial_beds: i64) -> HospitalSimConfig {
    HospitalSimConfig {
        initial_patients: 0,
        initial_beds,
        mean_arrivals_weekday: 0.0,
        mean_arrivals_weekend: 0.0,
        rng_seed: 42,
        ..Default::default()
    }
}

// ============================================================================
// Reset semantics
// ============================================================================

#[test]
fn test_initial_patients_beyond_capacity_overflow_immediately() {
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();
    sim.reset(15, 10).unwrap();

    // All time-zero events settle during reset: 10 admissions, 5 refusals.
    let snapshot = sim.get_current_state().unwrap();
    assert_eq!(snapshot.simulation_time, 0.0);
    assert_eq!(snapshot.num_beds, 10);
    assert_eq!(snapshot.num_patients, 10);
    assert_eq!(snapshot.num_patients_overflow, 5);
    assert_eq!(snapshot.utilization, 1.0);
}

#[test]
fn test_reset_discards_previous_episode() {
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();
    sim.reset(15, 10).unwrap();
    sim.step(5).unwrap();
    sim.step(-3).unwrap();

    sim.reset(0, 20).unwrap();

    let snapshot = sim.get_current_state().unwrap();
    assert_eq!(snapshot.simulation_time, 0.0);
    assert_eq!(snapshot.num_beds, 20);
    assert_eq!(snapshot.num_patients, 0);
    assert_eq!(snapshot.num_patients_overflow, 0);
    // Only the arrival generator survives a quiet reset; pending bed
    // changes and patient discharges from the old episode are gone.
    assert_eq!(sim.active_processes(), 1);
}

#[test]
fn test_reset_rejects_negative_beds() {
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();
    assert!(matches!(
        sim.reset(0, -1),
        Err(SimulationError::InvalidConfig(_))
    ));
}

// ============================================================================
// Step semantics
// ============================================================================

#[test]
fn test_step_advances_exactly_one_day() {
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();

    for day in 1..=5 {
        let result = sim.step(0).unwrap();
        assert_eq!(result.simulation_time, day as f64);
        assert_eq!(sim.now(), day as f64);
    }
}

#[test]
fn test_bed_change_lands_at_step_boundary() {
    // With a 1-day effect delay, a change requested at the start of a step
    // takes effect exactly at the step's end and is visible in the next
    // snapshot.
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();

    sim.step(5).unwrap();
    assert_eq!(sim.get_current_state().unwrap().num_beds, 15);

    sim.step(-2).unwrap();
    assert_eq!(sim.get_current_state().unwrap().num_beds, 13);
}

#[test]
fn test_bed_change_honors_longer_delay() {
    let config = HospitalSimConfig {
        delay_to_change_beds: 2.0,
        ..quiet_config(10)
    };
    let mut sim = HospitalSim::new(config).unwrap();

    sim.step(5).unwrap();
    assert_eq!(sim.get_current_state().unwrap().num_beds, 10);

    sim.step(0).unwrap();
    assert_eq!(sim.get_current_state().unwrap().num_beds, 15);
}

#[test]
fn test_overflow_counter_is_per_step() {
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();
    sim.reset(15, 10).unwrap();
    assert_eq!(sim.get_current_state().unwrap().num_patients_overflow, 5);

    // No arrivals during the step, so the zeroed counter stays at zero.
    sim.step(0).unwrap();
    assert_eq!(sim.get_current_state().unwrap().num_patients_overflow, 0);
}

#[test]
fn test_rejected_action_leaves_state_untouched() {
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();
    sim.step(0).unwrap();
    let before = sim.get_current_state().unwrap();

    let err = sim.step(26).unwrap_err();
    assert_eq!(
        err,
        SimulationError::InvalidAction {
            delta: 26,
            max: 25
        }
    );
    assert_eq!(sim.get_current_state().unwrap(), before);

    let err = sim.step(-26).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidAction { .. }));
    assert_eq!(sim.get_current_state().unwrap(), before);
}

#[test]
fn test_boundary_action_magnitude_accepted() {
    let mut sim = HospitalSim::new(quiet_config(100)).unwrap();
    sim.step(25).unwrap();
    assert_eq!(sim.get_current_state().unwrap().num_beds, 125);
    sim.step(-25).unwrap();
    assert_eq!(sim.get_current_state().unwrap().num_beds, 100);
}

// ============================================================================
// Capacity edge cases
// ============================================================================

#[test]
fn test_capacity_can_go_negative() {
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();
    sim.reset(10, 10).unwrap();

    sim.step(-25).unwrap();

    // No clamping and no eviction: the deficit is reported as-is.
    assert_eq!(sim.state().num_beds, -15);
    let snapshot = sim.get_current_state().unwrap();
    assert_eq!(snapshot.num_beds, -15);
    assert!(snapshot.utilization <= 0.0);
}

#[test]
fn test_zero_beds_fails_utilization_query() {
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();

    sim.step(-10).unwrap();
    assert_eq!(sim.state().num_beds, 0);
    assert_eq!(sim.get_current_state(), Err(SimulationError::ZeroBeds));

    // Stepping remains legal; the snapshot recovers with capacity.
    sim.step(5).unwrap();
    let snapshot = sim.get_current_state().unwrap();
    assert_eq!(snapshot.num_beds, 5);
}

// ============================================================================
// Arrival generator
// ============================================================================

#[test]
fn test_disabled_arrivals_spawn_nothing() {
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();

    for _ in 0..5 {
        sim.step(0).unwrap();
    }

    assert_eq!(sim.state().num_patients, 0);
    // The generator stays alive, rechecking the rate daily.
    assert_eq!(sim.active_processes(), 1);
}

#[test]
fn test_weekend_rate_selected_by_calendar() {
    // Weekday rate zero, weekend rate high: nothing arrives until the
    // simulation reaches day 5.
    let config = HospitalSimConfig {
        initial_patients: 0,
        initial_beds: 100,
        mean_arrivals_weekday: 0.0,
        mean_arrivals_weekend: 50.0,
        rng_seed: 7,
        ..Default::default()
    };
    let mut sim = HospitalSim::new(config).unwrap();

    for _ in 0..4 {
        sim.step(0).unwrap();
    }
    assert_eq!(sim.state().num_patients, 0);

    // Day 5 is the first weekend day; arrivals start flowing.
    sim.step(0).unwrap();
    sim.step(0).unwrap();
    assert!(
        sim.state().num_patients > 10,
        "expected a weekend arrival burst, got {}",
        sim.state().num_patients
    );
}

#[test]
fn test_all_patients_eventually_discharge() {
    let mut sim = HospitalSim::new(quiet_config(10)).unwrap();
    sim.reset(5, 10).unwrap();
    assert_eq!(sim.state().num_patients, 5);

    for _ in 0..100 {
        sim.step(0).unwrap();
    }

    assert_eq!(sim.state().num_patients, 0);
    assert_eq!(sim.active_processes(), 1);
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_same_seed_same_trajectory() {
    let config = HospitalSimConfig {
        rng_seed: 123,
        ..Default::default()
    };

    let mut sim1 = HospitalSim::new(config.clone()).unwrap();
    let mut sim2 = HospitalSim::new(config).unwrap();

    for day in 0..30 {
        let s1 = sim1.get_current_state().unwrap();
        let s2 = sim2.get_current_state().unwrap();
        assert_eq!(s1, s2, "trajectories diverged on day {}", day);

        let delta = if day % 3 == 0 { 5 } else { -1 };
        let r1 = sim1.step(delta).unwrap();
        let r2 = sim2.step(delta).unwrap();
        assert_eq!(r1, r2);
    }
}

#[test]
fn test_different_seeds_different_trajectories() {
    let mut sim1 = HospitalSim::new(HospitalSimConfig {
        rng_seed: 1,
        ..Default::default()
    })
    .unwrap();
    let mut sim2 = HospitalSim::new(HospitalSimConfig {
        rng_seed: 2,
        ..Default::default()
    })
    .unwrap();

    let mut diverged = false;
    for _ in 0..10 {
        sim1.step(0).unwrap();
        sim2.step(0).unwrap();
        if sim1.get_current_state().unwrap() != sim2.get_current_state().unwrap() {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "independent seeds produced identical trajectories");
}

#[test]
fn test_busy_step_reports_events() {
    let mut sim = HospitalSim::new(HospitalSimConfig {
        rng_seed: 5,
        ..Default::default()
    })
    .unwrap();

    let result = sim.step(0).unwrap();
    // ~90 arrivals plus the generator and bed-change wake-ups.
    assert!(result.events_processed > 10);
}
