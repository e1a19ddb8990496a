// KratOs parameter catalog - the candidate pool for parameter change proposals
//
// Every generator stays inside the constitutional bounds in `types::protocol`,
// and inside the cross-field limits that genesis parameters impose.

use crate::sim::candidate::CandidateChange;
use crate::types::*;
use rand::{Rng, RngCore};

/// Candidate changes covering the governable KratOs protocol parameters
pub fn kratos_param_changes() -> Vec<CandidateChange> {
    let genesis = ProtocolParameters::genesis();

    // Burn + validator share must stay <= 100%
    let max_fee_burn = MAX_FEE_BURN_RATE - genesis.economics.fee_validator_rate.value();

    // An exit timelock above every legal standard timelock is always valid
    let min_exit_timelock = MIN_EXIT_TIMELOCK.max(MAX_STANDARD_TIMELOCK);

    vec![
        CandidateChange::new(SUBSPACE_ECONOMICS, KEY_INFLATION_RATE, |r| {
            r.gen_range(MIN_INFLATION_RATE..=MAX_INFLATION_RATE).to_string()
        }),
        CandidateChange::new(SUBSPACE_ECONOMICS, KEY_FEE_BURN_RATE, move |r| {
            r.gen_range(MIN_FEE_BURN_RATE..=max_fee_burn).to_string()
        }),
        CandidateChange::new(SUBSPACE_CONSENSUS, KEY_TARGET_VALIDATORS, |r| {
            r.gen_range(MIN_VALIDATORS..=MAX_VALIDATORS).to_string()
        }),
        CandidateChange::new(SUBSPACE_CONSENSUS, KEY_VC_DECAY_RATE, |r| {
            r.gen_range(0..=MAX_VC_DECAY_RATE).to_string()
        }),
        CandidateChange::with_subkey(SUBSPACE_GOVERNANCE, KEY_TIMELOCK, SUBKEY_STANDARD, |r| {
            r.gen_range(MIN_STANDARD_TIMELOCK..=MAX_STANDARD_TIMELOCK).to_string()
        }),
        CandidateChange::with_subkey(SUBSPACE_GOVERNANCE, KEY_TIMELOCK, SUBKEY_EXIT, move |r| {
            r.gen_range(min_exit_timelock..=MAX_EXIT_TIMELOCK).to_string()
        }),
        CandidateChange::new(SUBSPACE_GOVERNANCE, KEY_VOTING_PERIOD, |r| {
            r.gen_range(MIN_VOTING_PERIOD..=MAX_VOTING_PERIOD).to_string()
        }),
        CandidateChange::new(SUBSPACE_GOVERNANCE, KEY_MIN_QUORUM, |r| {
            r.gen_range(MIN_QUORUM_BOUND..=MAX_QUORUM_BOUND).to_string()
        }),
        CandidateChange::new(SUBSPACE_GOVERNANCE, KEY_SUPERMAJORITY_THRESHOLD, |r| {
            r.gen_range(MIN_SUPERMAJORITY..=MAX_SUPERMAJORITY).to_string()
        }),
        CandidateChange::new(SUBSPACE_GOVERNANCE, KEY_PROPOSAL_DEPOSIT, |r| {
            deposit(r).to_string()
        }),
    ]
}

fn deposit(rng: &mut dyn RngCore) -> Balance {
    rng.gen_range(1..=10_000)
}
