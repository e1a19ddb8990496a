// Parameter change proposal content simulator
//
// Picks between 1 and `pool.len()` distinct candidates, resolves each one
// through its own value generator and wraps the result with random title and
// description text. Same pool order + same random source state => same proposal.

use crate::sim::candidate::CandidateChange;
use crate::sim::rand_util::{rand_int_between, rand_string_of_length};
use crate::sim::SimError;
use crate::types::{ParamChange, ParameterChangeProposal, MAX_DESCRIPTION_LENGTH, MAX_TITLE_LENGTH};
use rand::{Rng, RngCore};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, trace};

/// Generates proposal content from a random source
pub type ContentSimulatorFn =
    Arc<dyn Fn(&mut dyn RngCore) -> Result<ParameterChangeProposal, SimError> + Send + Sync>;

/// Lengths of the generated title and description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProposalTextLengths {
    pub title: usize,
    pub description: usize,
}

impl Default for ProposalTextLengths {
    fn default() -> Self {
        Self {
            title: MAX_TITLE_LENGTH,
            description: MAX_DESCRIPTION_LENGTH,
        }
    }
}

/// Random parameter change content, 1..=`pool.len()` changes with random valid values.
///
/// # Panics
///
/// Panics if `pool` is empty: an empty pool is a misconfigured caller.
///
/// Duplicate draws are rejected and redrawn from the whole pool, so if the pool
/// holds fewer distinct composed keys than the drawn change count this never
/// returns. Use [`try_simulate_param_change_proposal_content`] when the pool is
/// not known to be duplicate-free.
pub fn simulate_param_change_proposal_content(
    pool: &[CandidateChange],
    rng: &mut dyn RngCore,
) -> ParameterChangeProposal {
    simulate_with_lengths(pool, rng, ProposalTextLengths::default())
}

/// [`simulate_param_change_proposal_content`] with explicit text lengths
pub fn simulate_with_lengths(
    pool: &[CandidateChange],
    rng: &mut dyn RngCore,
    lengths: ProposalTextLengths,
) -> ParameterChangeProposal {
    assert!(!pool.is_empty(), "param change pool is empty");

    let num_changes = rand_int_between(rng, 1, pool.len());
    let changes = select_changes(pool, rng, num_changes);
    assemble(changes, rng, lengths)
}

/// Like [`simulate_param_change_proposal_content`], but reports an empty pool or a
/// pool without enough distinct keys as an error instead of panicking or spinning.
///
/// Whenever the unchecked variant terminates, this one draws the same entropy
/// and returns the same proposal.
pub fn try_simulate_param_change_proposal_content(
    pool: &[CandidateChange],
    rng: &mut dyn RngCore,
) -> Result<ParameterChangeProposal, SimError> {
    try_simulate_with_lengths(pool, rng, ProposalTextLengths::default())
}

/// [`try_simulate_param_change_proposal_content`] with explicit text lengths
pub fn try_simulate_with_lengths(
    pool: &[CandidateChange],
    rng: &mut dyn RngCore,
    lengths: ProposalTextLengths,
) -> Result<ParameterChangeProposal, SimError> {
    if pool.is_empty() {
        return Err(SimError::EmptyPool);
    }

    let num_changes = rand_int_between(rng, 1, pool.len());

    let distinct = pool
        .iter()
        .map(CandidateChange::composed_key)
        .collect::<HashSet<_>>()
        .len();
    if num_changes > distinct {
        return Err(SimError::InsufficientDistinctChanges {
            requested: num_changes,
            distinct,
        });
    }

    let changes = select_changes(pool, rng, num_changes);
    Ok(assemble(changes, rng, lengths))
}

/// Build a content simulator closed over its pool (hardened variant)
pub fn param_change_content_simulator(
    pool: Vec<CandidateChange>,
    lengths: ProposalTextLengths,
) -> ContentSimulatorFn {
    let pool: Arc<[CandidateChange]> = pool.into();
    Arc::new(move |rng: &mut dyn RngCore| try_simulate_with_lengths(&pool, rng, lengths))
}

fn select_changes(
    pool: &[CandidateChange],
    rng: &mut dyn RngCore,
    num_changes: usize,
) -> Vec<ParamChange> {
    debug!(num_changes, pool_size = pool.len(), "selecting parameter changes");

    let mut chosen: HashSet<String> = HashSet::with_capacity(num_changes);
    let mut changes = Vec::with_capacity(num_changes);

    for _ in 0..num_changes {
        let mut candidate = draw(pool, rng);
        let mut key = candidate.composed_key();

        // Redraw from the whole pool until the key is new
        while chosen.contains(&key) {
            trace!(%key, "rejected duplicate parameter change");
            candidate = draw(pool, rng);
            key = candidate.composed_key();
        }

        chosen.insert(key);
        changes.push(candidate.resolve(rng));
    }

    changes
}

fn draw<'a>(pool: &'a [CandidateChange], rng: &mut dyn RngCore) -> &'a CandidateChange {
    &pool[rng.gen_range(0..pool.len())]
}

fn assemble(
    changes: Vec<ParamChange>,
    rng: &mut dyn RngCore,
    lengths: ProposalTextLengths,
) -> ParameterChangeProposal {
    let title = rand_string_of_length(rng, lengths.title);
    let description = rand_string_of_length(rng, lengths.description);
    ParameterChangeProposal::new(title, description, changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(keys: &[&str]) -> Vec<CandidateChange> {
        keys.iter()
            .map(|key| {
                let value = format!("\"{key}\"");
                CandidateChange::new("test", *key, move |_| value.clone())
            })
            .collect()
    }

    #[test]
    #[should_panic(expected = "param change pool is empty")]
    fn test_empty_pool_panics() {
        let mut rng = StdRng::seed_from_u64(0);
        simulate_param_change_proposal_content(&[], &mut rng);
    }

    #[test]
    fn test_try_empty_pool_is_error() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            try_simulate_param_change_proposal_content(&[], &mut rng),
            Err(SimError::EmptyPool)
        );
    }

    #[test]
    fn test_single_candidate_pool() {
        let pool = pool(&["only"]);
        let mut rng = StdRng::seed_from_u64(3);

        let proposal = simulate_param_change_proposal_content(&pool, &mut rng);
        assert_eq!(proposal.changes().len(), 1);
        assert_eq!(proposal.changes()[0].key(), "only");
        assert_eq!(proposal.changes()[0].value(), "\"only\"");
    }

    #[test]
    fn test_default_text_lengths() {
        let pool = pool(&["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(5);

        let proposal = simulate_param_change_proposal_content(&pool, &mut rng);
        assert_eq!(proposal.title().chars().count(), 140);
        assert_eq!(proposal.description().chars().count(), 5000);
        assert!(proposal.validate_basic().is_ok());
    }

    #[test]
    fn test_custom_text_lengths() {
        let pool = pool(&["a", "b"]);
        let mut rng = StdRng::seed_from_u64(5);
        let lengths = ProposalTextLengths {
            title: 12,
            description: 40,
        };

        let proposal = simulate_with_lengths(&pool, &mut rng, lengths);
        assert_eq!(proposal.title().len(), 12);
        assert_eq!(proposal.description().len(), 40);
    }

    #[test]
    fn test_try_matches_unchecked_on_distinct_pool() {
        let pool = pool(&["a", "b", "c", "d", "e"]);

        for seed in 0..50 {
            let unchecked =
                simulate_param_change_proposal_content(&pool, &mut StdRng::seed_from_u64(seed));
            let checked =
                try_simulate_param_change_proposal_content(&pool, &mut StdRng::seed_from_u64(seed));
            assert_eq!(checked, Ok(unchecked));
        }
    }

    #[test]
    fn test_try_accepts_duplicates_when_enough_distinct_keys() {
        // 3 entries, 2 distinct keys: succeeds whenever 1 or 2 changes are drawn
        let pool = pool(&["a", "a", "b"]);

        for seed in 0..50 {
            let result =
                try_simulate_param_change_proposal_content(&pool, &mut StdRng::seed_from_u64(seed));
            match result {
                Ok(proposal) => assert!(proposal.changes().len() <= 2),
                Err(err) => assert_eq!(
                    err,
                    SimError::InsufficientDistinctChanges {
                        requested: 3,
                        distinct: 2
                    }
                ),
            }
        }
    }

    #[test]
    fn test_content_simulator_closure() {
        let simulator = param_change_content_simulator(pool(&["a", "b"]), ProposalTextLengths::default());
        let mut rng = StdRng::seed_from_u64(8);

        let proposal = simulator(&mut rng).unwrap();
        assert!(!proposal.changes().is_empty());
    }
}
