// Types for the KratOs governance simulation
// Principle: Minimal, auditable, reproducible

pub mod primitives;
pub mod protocol;
pub mod params;

pub use primitives::*;
pub use protocol::*;
pub use params::*;
