// Protocol Parameters - Constitutional bounds
// Runtime-governable parameters and the bounds a simulated change must respect
//
// Principle: Parameters can change within bounds, but bounds are immutable.
// Simulated proposals are generated inside these bounds and can be previewed
// against a scratch copy; nothing here touches live chain state.

use crate::types::{Balance, BlockNumber, ParamChange};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// =============================================================================
// CONSTITUTIONAL BOUNDS (IMMUTABLE)
// =============================================================================

/// Minimum inflation rate (0%)
pub const MIN_INFLATION_RATE: u8 = 0;
/// Maximum inflation rate (5%)
pub const MAX_INFLATION_RATE: u8 = 5;

/// Minimum fee burn rate (0%)
pub const MIN_FEE_BURN_RATE: u8 = 0;
/// Maximum fee burn rate (100%)
pub const MAX_FEE_BURN_RATE: u8 = 100;

/// Minimum validator count (50 validators for decentralization)
pub const MIN_VALIDATORS: u32 = 50;
/// Maximum validator count
pub const MAX_VALIDATORS: u32 = 101;

/// Minimum standard timelock (1 day = 14,400 blocks)
pub const MIN_STANDARD_TIMELOCK: BlockNumber = 14_400;
/// Maximum standard timelock (30 days = 432,000 blocks)
pub const MAX_STANDARD_TIMELOCK: BlockNumber = 432_000;

/// Minimum exit timelock (7 days = 100,800 blocks)
pub const MIN_EXIT_TIMELOCK: BlockNumber = 100_800;
/// Maximum exit timelock (90 days = 1,296,000 blocks)
pub const MAX_EXIT_TIMELOCK: BlockNumber = 1_296_000;

/// Minimum quorum (10%)
pub const MIN_QUORUM_BOUND: u8 = 10;
/// Maximum quorum (80%)
pub const MAX_QUORUM_BOUND: u8 = 80;

/// Minimum supermajority threshold (66%, floor of 2/3)
pub const MIN_SUPERMAJORITY: u8 = 66;
/// Maximum supermajority threshold (90%)
pub const MAX_SUPERMAJORITY: u8 = 90;

/// Minimum voting period (1 day)
pub const MIN_VOTING_PERIOD: BlockNumber = 14_400;
/// Maximum voting period (30 days)
pub const MAX_VOTING_PERIOD: BlockNumber = 432_000;

/// Maximum VC decay per quarter (50%)
pub const MAX_VC_DECAY_RATE: u8 = 50;

// =============================================================================
// PARAMETER ADDRESSING (subspace / key / subkey)
// =============================================================================

pub const SUBSPACE_ECONOMICS: &str = "economics";
pub const SUBSPACE_CONSENSUS: &str = "consensus";
pub const SUBSPACE_GOVERNANCE: &str = "governance";

pub const KEY_INFLATION_RATE: &str = "inflation_rate";
pub const KEY_FEE_BURN_RATE: &str = "fee_burn_rate";
pub const KEY_TARGET_VALIDATORS: &str = "target_validators";
pub const KEY_VC_DECAY_RATE: &str = "vc_decay_rate";
pub const KEY_TIMELOCK: &str = "timelock";
pub const KEY_VOTING_PERIOD: &str = "voting_period";
pub const KEY_MIN_QUORUM: &str = "min_quorum";
pub const KEY_SUPERMAJORITY_THRESHOLD: &str = "supermajority_threshold";
pub const KEY_PROPOSAL_DEPOSIT: &str = "proposal_deposit";

/// Timelocks share one key and are told apart by subkey
pub const SUBKEY_STANDARD: &str = "standard";
pub const SUBKEY_EXIT: &str = "exit";

// =============================================================================
// BOUNDED VALUE TYPES
// =============================================================================

/// A value held inside fixed bounds; out-of-bounds writes are refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundedValue<T> {
    value: T,
    min: T,
    max: T,
}

impl<T: Copy + Ord> BoundedValue<T> {
    /// Initial value is clamped into `[min, max]`
    pub fn new(value: T, min: T, max: T) -> Self {
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn value(&self) -> T {
        self.value
    }

    pub fn is_valid(&self, value: T) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Store `value` if it is in bounds, otherwise leave the current value
    pub fn try_set(&mut self, value: T) -> bool {
        let ok = self.is_valid(value);
        if ok {
            self.value = value;
        }
        ok
    }
}

// =============================================================================
// PROTOCOL PARAMETERS
// =============================================================================

/// Economics parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicsParameters {
    /// Annual inflation rate (0-5%)
    pub inflation_rate: BoundedValue<u8>,

    /// Fee burn percentage (0-100%)
    pub fee_burn_rate: BoundedValue<u8>,

    /// Fee to validators percentage (remainder after burn)
    pub fee_validator_rate: BoundedValue<u8>,
}

impl Default for EconomicsParameters {
    fn default() -> Self {
        Self {
            inflation_rate: BoundedValue::new(2, MIN_INFLATION_RATE, MAX_INFLATION_RATE),
            fee_burn_rate: BoundedValue::new(50, MIN_FEE_BURN_RATE, MAX_FEE_BURN_RATE),
            fee_validator_rate: BoundedValue::new(50, MIN_FEE_BURN_RATE, MAX_FEE_BURN_RATE),
        }
    }
}

/// Consensus parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusParameters {
    /// Target number of validators
    pub target_validators: BoundedValue<u32>,

    /// VC decay rate per quarter (percentage)
    pub vc_decay_rate: u8,
}

impl Default for ConsensusParameters {
    fn default() -> Self {
        Self {
            target_validators: BoundedValue::new(51, MIN_VALIDATORS, MAX_VALIDATORS),
            vc_decay_rate: 10, // 10% per quarter
        }
    }
}

/// Governance parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernanceParameters {
    /// Standard proposal timelock
    pub standard_timelock: BoundedValue<BlockNumber>,

    /// Exit proposal timelock (must be >= standard)
    pub exit_timelock: BoundedValue<BlockNumber>,

    /// Voting period duration
    pub voting_period: BoundedValue<BlockNumber>,

    /// Minimum quorum percentage
    pub min_quorum: BoundedValue<u8>,

    /// Supermajority threshold for exit votes
    pub supermajority_threshold: BoundedValue<u8>,

    /// Proposal deposit amount
    pub proposal_deposit: Balance,
}

impl Default for GovernanceParameters {
    fn default() -> Self {
        Self {
            standard_timelock: BoundedValue::new(172_800, MIN_STANDARD_TIMELOCK, MAX_STANDARD_TIMELOCK),
            exit_timelock: BoundedValue::new(432_000, MIN_EXIT_TIMELOCK, MAX_EXIT_TIMELOCK),
            voting_period: BoundedValue::new(100_800, MIN_VOTING_PERIOD, MAX_VOTING_PERIOD),
            min_quorum: BoundedValue::new(30, MIN_QUORUM_BOUND, MAX_QUORUM_BOUND),
            supermajority_threshold: BoundedValue::new(66, MIN_SUPERMAJORITY, MAX_SUPERMAJORITY),
            proposal_deposit: 100,
        }
    }
}

/// The governable subset of protocol parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProtocolParameters {
    pub economics: EconomicsParameters,
    pub consensus: ConsensusParameters,
    pub governance: GovernanceParameters,
}

impl ProtocolParameters {
    /// Create genesis parameters
    pub fn genesis() -> Self {
        Self::default()
    }

    /// Parameters as they would be after `changes`, applied in order.
    ///
    /// Each change must decode, be constitutional against the parameters
    /// produced so far, and the final set must pass `validate`. `self` is untouched.
    pub fn preview(&self, changes: &[ParamChange]) -> Result<Self, ParameterError> {
        let mut next = self.clone();
        for change in changes {
            let typed = ParameterChange::from_param_change(change)?;
            typed.check(&next)?;
            typed.write_to(&mut next)?;
        }
        next.validate()?;
        Ok(next)
    }

    /// Cross-field checks that single-value bounds cannot express
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.governance.exit_timelock.value() < self.governance.standard_timelock.value() {
            return Err(ParameterError::ExitTimelockTooShort);
        }

        let fee_total = self.economics.fee_burn_rate.value() as u16
            + self.economics.fee_validator_rate.value() as u16;
        if fee_total > 100 {
            return Err(ParameterError::FeeRatesTooHigh);
        }

        Ok(())
    }
}

// =============================================================================
// TYPED PARAMETER CHANGE
// =============================================================================

/// Types of parameter changes that can be proposed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterChange {
    InflationRate(u8),
    FeeBurnRate(u8),
    TargetValidators(u32),
    StandardTimelock(BlockNumber),
    ExitTimelock(BlockNumber),
    VotingPeriod(BlockNumber),
    MinQuorum(u8),
    SupermajorityThreshold(u8),
    ProposalDeposit(Balance),
    VcDecayRate(u8),
}

impl ParameterChange {
    /// Decode an addressed change (subspace/key/subkey + JSON value)
    pub fn from_param_change(change: &ParamChange) -> Result<Self, ParameterError> {
        let address = (change.subspace(), change.key(), change.subkey());

        let typed = match address {
            (SUBSPACE_ECONOMICS, KEY_INFLATION_RATE, None) => {
                ParameterChange::InflationRate(decode_value(change)?)
            }
            (SUBSPACE_ECONOMICS, KEY_FEE_BURN_RATE, None) => {
                ParameterChange::FeeBurnRate(decode_value(change)?)
            }
            (SUBSPACE_CONSENSUS, KEY_TARGET_VALIDATORS, None) => {
                ParameterChange::TargetValidators(decode_value(change)?)
            }
            (SUBSPACE_CONSENSUS, KEY_VC_DECAY_RATE, None) => {
                ParameterChange::VcDecayRate(decode_value(change)?)
            }
            (SUBSPACE_GOVERNANCE, KEY_TIMELOCK, Some(SUBKEY_STANDARD)) => {
                ParameterChange::StandardTimelock(decode_value(change)?)
            }
            (SUBSPACE_GOVERNANCE, KEY_TIMELOCK, Some(SUBKEY_EXIT)) => {
                ParameterChange::ExitTimelock(decode_value(change)?)
            }
            (SUBSPACE_GOVERNANCE, KEY_VOTING_PERIOD, None) => {
                ParameterChange::VotingPeriod(decode_value(change)?)
            }
            (SUBSPACE_GOVERNANCE, KEY_MIN_QUORUM, None) => {
                ParameterChange::MinQuorum(decode_value(change)?)
            }
            (SUBSPACE_GOVERNANCE, KEY_SUPERMAJORITY_THRESHOLD, None) => {
                ParameterChange::SupermajorityThreshold(decode_value(change)?)
            }
            (SUBSPACE_GOVERNANCE, KEY_PROPOSAL_DEPOSIT, None) => {
                ParameterChange::ProposalDeposit(decode_value(change)?)
            }
            _ => return Err(ParameterError::UnknownParameter(change.composed_key())),
        };

        Ok(typed)
    }

    /// Check if this change is within constitutional bounds
    pub fn is_constitutional(&self, current: &ProtocolParameters) -> bool {
        match self {
            ParameterChange::InflationRate(v) => {
                *v >= MIN_INFLATION_RATE && *v <= MAX_INFLATION_RATE
            }
            ParameterChange::FeeBurnRate(v) => {
                *v >= MIN_FEE_BURN_RATE && *v <= MAX_FEE_BURN_RATE
            }
            ParameterChange::TargetValidators(v) => {
                *v >= MIN_VALIDATORS && *v <= MAX_VALIDATORS
            }
            ParameterChange::StandardTimelock(v) => {
                *v >= MIN_STANDARD_TIMELOCK && *v <= MAX_STANDARD_TIMELOCK
            }
            ParameterChange::ExitTimelock(v) => {
                *v >= MIN_EXIT_TIMELOCK
                    && *v <= MAX_EXIT_TIMELOCK
                    && *v >= current.governance.standard_timelock.value()
            }
            ParameterChange::VotingPeriod(v) => {
                *v >= MIN_VOTING_PERIOD && *v <= MAX_VOTING_PERIOD
            }
            ParameterChange::MinQuorum(v) => {
                *v >= MIN_QUORUM_BOUND && *v <= MAX_QUORUM_BOUND
            }
            ParameterChange::SupermajorityThreshold(v) => {
                *v >= MIN_SUPERMAJORITY && *v <= MAX_SUPERMAJORITY
            }
            ParameterChange::ProposalDeposit(_) => true, // No constitutional bound
            ParameterChange::VcDecayRate(v) => *v <= MAX_VC_DECAY_RATE,
        }
    }

    /// Store the new value into `params`, refusing values outside the field's bounds
    fn write_to(&self, params: &mut ProtocolParameters) -> Result<(), ParameterError> {
        let stored = match self {
            ParameterChange::InflationRate(v) => params.economics.inflation_rate.try_set(*v),
            ParameterChange::FeeBurnRate(v) => params.economics.fee_burn_rate.try_set(*v),
            ParameterChange::TargetValidators(v) => {
                params.consensus.target_validators.try_set(*v)
            }
            ParameterChange::StandardTimelock(v) => {
                params.governance.standard_timelock.try_set(*v)
            }
            ParameterChange::ExitTimelock(v) => params.governance.exit_timelock.try_set(*v),
            ParameterChange::VotingPeriod(v) => params.governance.voting_period.try_set(*v),
            ParameterChange::MinQuorum(v) => params.governance.min_quorum.try_set(*v),
            ParameterChange::SupermajorityThreshold(v) => {
                params.governance.supermajority_threshold.try_set(*v)
            }
            ParameterChange::ProposalDeposit(v) => {
                params.governance.proposal_deposit = *v;
                true
            }
            ParameterChange::VcDecayRate(v) if *v <= MAX_VC_DECAY_RATE => {
                params.consensus.vc_decay_rate = *v;
                true
            }
            ParameterChange::VcDecayRate(_) => false,
        };

        if stored {
            Ok(())
        } else {
            Err(ParameterError::OutOfBounds(self.clone()))
        }
    }

    /// Same as `is_constitutional`, as a `Result` for `?` chains
    pub fn check(&self, current: &ProtocolParameters) -> Result<(), ParameterError> {
        if self.is_constitutional(current) {
            Ok(())
        } else {
            Err(ParameterError::OutOfBounds(self.clone()))
        }
    }
}

fn decode_value<T: DeserializeOwned>(change: &ParamChange) -> Result<T, ParameterError> {
    serde_json::from_str(change.value()).map_err(|e| ParameterError::InvalidValue {
        parameter: change.composed_key(),
        reason: e.to_string(),
    })
}

// =============================================================================
// ERRORS
// =============================================================================

/// Parameter-related errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    #[error("Value out of constitutional bounds: {0:?}")]
    OutOfBounds(ParameterChange),

    #[error("Exit timelock must be >= standard timelock")]
    ExitTimelockTooShort,

    #[error("Fee rates sum to more than 100%")]
    FeeRatesTooHigh,

    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("Invalid value for {parameter}: {reason}")]
    InvalidValue { parameter: String, reason: String },
}

// =============================================================================
// TESTS
// =============================================================================
