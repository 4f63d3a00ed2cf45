//! Deterministic random number generation
//!
//! All stochastic draws (stay lengths, inter-arrival gaps) go through a
//! single seeded generator so that a run is fully reproducible.

pub mod xorshift;

pub use xorshift::RngManager;
