// Parameter Change Proposal - the content a governance proposal carries
// Principle: Built once, never mutated; the caller owns it from then on.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Router key under which parameter change proposals are handled
pub const ROUTER_KEY: &str = "params";

/// Proposal type tag for parameter changes
pub const PROPOSAL_TYPE_CHANGE: &str = "ParameterChange";

/// Maximum title length (characters)
pub const MAX_TITLE_LENGTH: usize = 140;

/// Maximum description length (characters)
pub const MAX_DESCRIPTION_LENGTH: usize = 5000;

/// Separator used when composing a parameter identity
const KEY_SEPARATOR: char = '/';

/// Compose the identity of a (subspace, key, subkey) triple.
///
/// A present subkey always appends a separator, even when empty, so that
/// `a/b` and `a/b/` never collide.
pub fn composed_key(subspace: &str, key: &str, subkey: Option<&str>) -> String {
    match subkey {
        Some(subkey) => format!("{subspace}{KEY_SEPARATOR}{key}{KEY_SEPARATOR}{subkey}"),
        None => format!("{subspace}{KEY_SEPARATOR}{key}"),
    }
}

/// One concrete parameter change selected into a proposal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamChange {
    subspace: String,
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subkey: Option<String>,
    /// JSON-encoded value, opaque at this layer
    value: String,
}

impl ParamChange {
    pub fn new(
        subspace: impl Into<String>,
        key: impl Into<String>,
        subkey: Option<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            subspace: subspace.into(),
            key: key.into(),
            subkey,
            value: value.into(),
        }
    }

    pub fn subspace(&self) -> &str {
        &self.subspace
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn subkey(&self) -> Option<&str> {
        self.subkey.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn composed_key(&self) -> String {
        composed_key(&self.subspace, &self.key, self.subkey())
    }
}

/// Proposal content: title, description and a duplicate-free set of changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterChangeProposal {
    title: String,
    description: String,
    changes: Vec<ParamChange>,
}

impl ParameterChangeProposal {
    pub fn new(title: String, description: String, changes: Vec<ParamChange>) -> Self {
        Self {
            title,
            description,
            changes,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Changes in the order they were selected
    pub fn changes(&self) -> &[ParamChange] {
        &self.changes
    }

    pub fn proposal_route(&self) -> &'static str {
        ROUTER_KEY
    }

    pub fn proposal_type(&self) -> &'static str {
        PROPOSAL_TYPE_CHANGE
    }

    /// Stateless sanity checks, run before the proposal is wrapped for submission
    pub fn validate_basic(&self) -> Result<(), ProposalError> {
        validate_text(&self.title, "title", MAX_TITLE_LENGTH)?;
        validate_text(&self.description, "description", MAX_DESCRIPTION_LENGTH)?;

        if self.changes.is_empty() {
            return Err(ProposalError::NoChanges);
        }

        let mut seen = HashSet::with_capacity(self.changes.len());
        for change in &self.changes {
            if change.subspace.is_empty() {
                return Err(ProposalError::EmptySubspace);
            }
            if change.key.is_empty() {
                return Err(ProposalError::EmptyKey(change.subspace.clone()));
            }
            if change.value.is_empty() {
                return Err(ProposalError::EmptyValue(change.composed_key()));
            }
            if !seen.insert(change.composed_key()) {
                return Err(ProposalError::DuplicateChange(change.composed_key()));
            }
        }

        Ok(())
    }
}

fn validate_text(text: &str, field: &'static str, max: usize) -> Result<(), ProposalError> {
    if text.trim().is_empty() {
        return Err(ProposalError::BlankText(field));
    }
    let len = text.chars().count();
    if len > max {
        return Err(ProposalError::TextTooLong { field, len, max });
    }
    Ok(())
}

/// Proposal validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProposalError {
    #[error("Proposal {0} cannot be blank")]
    BlankText(&'static str),

    #[error("Proposal {field} is {len} characters, maximum is {max}")]
    TextTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("Proposal must contain at least one parameter change")]
    NoChanges,

    #[error("Parameter change has an empty subspace")]
    EmptySubspace,

    #[error("Parameter change in subspace {0} has an empty key")]
    EmptyKey(String),

    #[error("Parameter change {0} has an empty value")]
    EmptyValue(String),

    #[error("Duplicate parameter change: {0}")]
    DuplicateChange(String),
}
