// Simulation - randomized governance proposal content
// Principle: Every draw comes from the caller's random source; nothing is ambient.

pub mod candidate;
pub mod catalog;
pub mod proposal;
pub mod rand_util;
pub mod registry;

pub use candidate::{CandidateChange, SimValueFn};
pub use proposal::{
    param_change_content_simulator, simulate_param_change_proposal_content,
    try_simulate_param_change_proposal_content, ContentSimulatorFn, ProposalTextLengths,
};
pub use registry::{ProposalContentRegistry, WeightedProposalContent};

use crate::config::ConfigError;

/// Simulation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error("param change pool is empty")]
    EmptyPool,

    #[error(
        "cannot select {requested} distinct parameter changes from a pool with {distinct} distinct keys"
    )]
    InsufficientDistinctChanges { requested: usize, distinct: usize },

    #[error("proposal content already registered: {0}")]
    DuplicateRegistration(String),

    #[error("no registered proposal content has a positive weight")]
    NoWeightedContent,

    #[error(transparent)]
    Config(#[from] ConfigError),
}
