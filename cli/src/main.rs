//! Demo session driver
//!
//! Runs the simulator for a number of days under a simple threshold
//! policy and prints one CSV row per day:
//!
//! ```text
//! hospital-sim [DAYS] [SEED]
//! ```
//!
//! The policy adds 25 beds when utilization reaches 90%, removes 10 when
//! it falls below 70%, and otherwise holds capacity.

use std::env;
use std::process::ExitCode;

use hospital_simulator_core_rs::{HospitalSim, HospitalSimConfig, SimulationError};

const DEFAULT_DAYS: u32 = 60;

fn threshold_policy(utilization: f64) -> i64 {
    if utilization >= 0.9 {
        25
    } else if utilization < 0.7 {
        -10
    } else {
        0
    }
}

fn run(days: u32, seed: u64) -> Result<(), SimulationError> {
    let config = HospitalSimConfig {
        initial_patients: 0,
        initial_beds: 200,
        rng_seed: seed,
        ..Default::default()
    };
    let mut sim = HospitalSim::new(config)?;

    println!("day,num_beds,num_patients,num_patients_overflow,utilization,delta");
    for _ in 0..days {
        let snapshot = sim.get_current_state()?;
        let delta = threshold_policy(snapshot.utilization);
        println!(
            "{},{},{},{},{:.4},{}",
            snapshot.simulation_time,
            snapshot.num_beds,
            snapshot.num_patients,
            snapshot.num_patients_overflow,
            snapshot.utilization,
            delta
        );
        sim.step(delta)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let days = match args.get(1).map(|s| s.parse::<u32>()) {
        None => DEFAULT_DAYS,
        Some(Ok(days)) => days,
        Some(Err(_)) => {
            eprintln!("usage: hospital-sim [DAYS] [SEED]");
            return ExitCode::FAILURE;
        }
    };
    let seed = match args.get(2).map(|s| s.parse::<u64>()) {
        None => 0,
        Some(Ok(seed)) => seed,
        Some(Err(_)) => {
            eprintln!("usage: hospital-sim [DAYS] [SEED]");
            return ExitCode::FAILURE;
        }
    };

    match run(days, seed) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("simulation stopped: {}", err);
            ExitCode::FAILURE
        }
    }
}
