// KratOs Sim - Randomized governance proposal content for simulation runs
// Principle: Same seed, same proposals

pub mod config;
pub mod sim;
pub mod types;

#[cfg(test)]
mod tests;
