//! Domain types: hospital counters and the external state snapshot

pub mod state;

pub use state::{HospitalState, StateSnapshot};
