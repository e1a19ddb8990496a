// Candidate changes - the pool a parameter change proposal is drawn from

use crate::types::{composed_key, ParamChange};
use rand::RngCore;
use std::fmt;
use std::sync::Arc;

/// Produces one valid JSON-encoded value for a parameter from the given random source
pub type SimValueFn = Arc<dyn Fn(&mut dyn RngCore) -> String + Send + Sync>;

/// A parameter that may be changed, with a generator for random valid values
#[derive(Clone)]
pub struct CandidateChange {
    subspace: String,
    key: String,
    subkey: Option<String>,
    sim_value: SimValueFn,
}

impl CandidateChange {
    pub fn new<F>(subspace: impl Into<String>, key: impl Into<String>, sim_value: F) -> Self
    where
        F: Fn(&mut dyn RngCore) -> String + Send + Sync + 'static,
    {
        Self {
            subspace: subspace.into(),
            key: key.into(),
            subkey: None,
            sim_value: Arc::new(sim_value),
        }
    }

    pub fn with_subkey<F>(
        subspace: impl Into<String>,
        key: impl Into<String>,
        subkey: impl Into<String>,
        sim_value: F,
    ) -> Self
    where
        F: Fn(&mut dyn RngCore) -> String + Send + Sync + 'static,
    {
        Self {
            subspace: subspace.into(),
            key: key.into(),
            subkey: Some(subkey.into()),
            sim_value: Arc::new(sim_value),
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

    /// Identity used to keep a proposal free of duplicate changes
    pub fn composed_key(&self) -> String {
        composed_key(&self.subspace, &self.key, self.subkey())
    }

    /// Generate a random valid value
    pub fn sim_value(&self, rng: &mut dyn RngCore) -> String {
        (self.sim_value)(rng)
    }

    /// Resolve into a concrete change, invoking the value generator exactly once
    pub fn resolve(&self, rng: &mut dyn RngCore) -> ParamChange {
        let value = self.sim_value(rng);
        ParamChange::new(self.subspace.clone(), self.key.clone(), self.subkey.clone(), value)
    }
}

impl fmt::Debug for CandidateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateChange")
            .field("subspace", &self.subspace)
            .field("key", &self.key)
            .field("subkey", &self.subkey)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_resolve_copies_address_and_value() {
        let candidate = CandidateChange::with_subkey("governance", "timelock", "exit", |_| {
            "500000".to_string()
        });
        let mut rng = StdRng::seed_from_u64(1);

        let change = candidate.resolve(&mut rng);
        assert_eq!(change.subspace(), "governance");
        assert_eq!(change.key(), "timelock");
        assert_eq!(change.subkey(), Some("exit"));
        assert_eq!(change.value(), "500000");
        assert_eq!(change.composed_key(), candidate.composed_key());
    }

    #[test]
    fn test_sim_value_uses_supplied_rng() {
        let candidate =
            CandidateChange::new("economics", "inflation_rate", |r| r.gen_range(0u8..=5).to_string());

        let a = candidate.sim_value(&mut StdRng::seed_from_u64(99));
        let b = candidate.sim_value(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_subkey_presence_changes_identity() {
        let flat = CandidateChange::new("gov", "timelock", |_| "1".into());
        let empty_subkey = CandidateChange::with_subkey("gov", "timelock", "", |_| "1".into());
        assert_ne!(flat.composed_key(), empty_subkey.composed_key());
    }

    #[test]
    fn test_debug_omits_generator() {
        let candidate = CandidateChange::new("gov", "quorum", |_| "30".into());
        let debug = format!("{candidate:?}");
        assert!(debug.contains("quorum"));
    }
}
