// Weighted proposal content registry
//
// The outer harness builds one of these at startup and owns it. Each entry
// pairs an app-params key with a default weight and a content simulator; the
// weight actually used is the app-params override when present.

use crate::config::AppParams;
use crate::sim::candidate::CandidateChange;
use crate::sim::proposal::{param_change_content_simulator, ContentSimulatorFn, ProposalTextLengths};
use crate::sim::SimError;
use crate::types::ParameterChangeProposal;
use rand::{Rng, RngCore};
use std::fmt;
use tracing::debug;

/// App params key for the parameter change proposal weight
pub const OP_WEIGHT_SUBMIT_PARAM_CHANGE_PROPOSAL: &str = "op_weight_submit_param_change_proposal";

/// Default weight of parameter change proposals
pub const DEFAULT_WEIGHT_PARAM_CHANGE_PROPOSAL: u32 = 5;

/// A content simulator with its selection weight
#[derive(Clone)]
pub struct WeightedProposalContent {
    app_params_key: String,
    default_weight: u32,
    content_simulator: ContentSimulatorFn,
}

impl WeightedProposalContent {
    pub fn new(
        app_params_key: impl Into<String>,
        default_weight: u32,
        content_simulator: ContentSimulatorFn,
    ) -> Self {
        Self {
            app_params_key: app_params_key.into(),
            default_weight,
            content_simulator,
        }
    }

    pub fn app_params_key(&self) -> &str {
        &self.app_params_key
    }

    pub fn default_weight(&self) -> u32 {
        self.default_weight
    }

    /// Weight after applying any app-params override
    pub fn weight(&self, params: &AppParams) -> Result<u32, SimError> {
        Ok(params.weight(&self.app_params_key, self.default_weight)?)
    }

    pub fn simulate(&self, rng: &mut dyn RngCore) -> Result<ParameterChangeProposal, SimError> {
        (self.content_simulator)(rng)
    }
}

impl fmt::Debug for WeightedProposalContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeightedProposalContent")
            .field("app_params_key", &self.app_params_key)
            .field("default_weight", &self.default_weight)
            .finish_non_exhaustive()
    }
}

/// Weighted contents contributed by parameter change proposals
pub fn proposal_contents(
    pool: Vec<CandidateChange>,
    lengths: ProposalTextLengths,
) -> Vec<WeightedProposalContent> {
    vec![WeightedProposalContent::new(
        OP_WEIGHT_SUBMIT_PARAM_CHANGE_PROPOSAL,
        DEFAULT_WEIGHT_PARAM_CHANGE_PROPOSAL,
        param_change_content_simulator(pool, lengths),
    )]
}

/// Registration table of proposal content simulators, in registration order
#[derive(Debug, Clone, Default)]
pub struct ProposalContentRegistry {
    entries: Vec<WeightedProposalContent>,
}

impl ProposalContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from contents, rejecting duplicate keys
    pub fn from_contents(
        contents: impl IntoIterator<Item = WeightedProposalContent>,
    ) -> Result<Self, SimError> {
        let mut registry = Self::new();
        for content in contents {
            registry.register(content)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, content: WeightedProposalContent) -> Result<(), SimError> {
        if self.get(content.app_params_key()).is_some() {
            return Err(SimError::DuplicateRegistration(content.app_params_key.clone()));
        }

        debug!(
            key = content.app_params_key(),
            default_weight = content.default_weight(),
            "registered proposal content"
        );
        self.entries.push(content);
        Ok(())
    }

    pub fn get(&self, app_params_key: &str) -> Option<&WeightedProposalContent> {
        self.entries
            .iter()
            .find(|entry| entry.app_params_key() == app_params_key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightedProposalContent> {
        self.entries.iter()
    }

    /// Effective weight of every entry, in registration order
    pub fn resolve_weights(&self, params: &AppParams) -> Result<Vec<(&str, u32)>, SimError> {
        self.entries
            .iter()
            .map(|entry| entry.weight(params).map(|weight| (entry.app_params_key(), weight)))
            .collect()
    }

    /// Weighted random choice of a content simulator; zero-weight entries are never picked
    pub fn pick(
        &self,
        rng: &mut dyn RngCore,
        params: &AppParams,
    ) -> Result<&WeightedProposalContent, SimError> {
        let weights = self
            .entries
            .iter()
            .map(|entry| entry.weight(params))
            .collect::<Result<Vec<_>, _>>()?;

        let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
        if total == 0 {
            return Err(SimError::NoWeightedContent);
        }

        let mut target = rng.gen_range(0..total);
        for (entry, weight) in self.entries.iter().zip(weights) {
            let weight = u64::from(weight);
            if target < weight {
                return Ok(entry);
            }
            target -= weight;
        }

        Err(SimError::NoWeightedContent)
    }
}
