//! Signal evaluation interfaces.

pub mod crossover;

pub use crossover::{CrossoverSignalGenerator, MaPair, SignalState};
