//! Statistical calibration of the spin engine
//!
//! - Fairness (winner histogram across many seeded spins)

pub mod fairness;

pub use fairness::{FairnessReport, FairnessRunner};
