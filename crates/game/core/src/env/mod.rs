//! Environment the rules read from but never own.
//!
//! Currently this is only the random number source; configuration is passed
//! explicitly as [`crate::RpgConfig`] / [`crate::LevelTable`] values.

mod rng;

pub use rng::{PcgRng, RngOracle, ScriptedRng, choose};
