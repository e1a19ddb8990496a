// Tests module
// Proposal invariants: size bound, uniqueness, determinism, text lengths
// Selection scenarios: scripted draws, duplicate rejection, non-termination

pub mod support;
