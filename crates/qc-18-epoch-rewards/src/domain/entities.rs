//! # Domain Entities
//!
//! Working records owned by the engine for the duration of one epoch-end
//! computation.

use shared_types::{Address, BlsPublicKey, ShardId, ValidatorInfo, U256};
use std::collections::BTreeMap;

/// Validator statistics of the closed epoch, grouped by shard.
pub type ValidatorsInfoMap = BTreeMap<ShardId, Vec<ValidatorInfo>>;

/// Eligible validator public keys grouped by shard, index-aligned with the
/// eligible entries of a [`ValidatorsInfoMap`].
pub type EligibleKeysMap = BTreeMap<ShardId, Vec<BlsPublicKey>>;

/// Reward records grouped by shard.
pub type NodesRewardInfo<'a> = BTreeMap<ShardId, Vec<NodeRewardRecord<'a>>>;

/// Rewards computed for one eligible validator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeRewardRecord<'a> {
    /// Source statistics.
    pub validator: &'a ValidatorInfo,
    /// Stake above the node minimum.
    pub top_up_stake: U256,
    /// `top_up_stake * num_selected_in_success_blocks`, zero when offline.
    pub power_in_shard: U256,
    /// Stake-independent reward for produced blocks.
    pub base_reward: U256,
    /// Stake-weighted reward.
    pub top_up_reward: U256,
    /// `base_reward + top_up_reward`.
    pub full_reward: U256,
}

impl<'a> NodeRewardRecord<'a> {
    /// Create a zeroed record for a validator.
    pub fn new(validator: &'a ValidatorInfo) -> Self {
        Self {
            validator,
            top_up_stake: U256::zero(),
            power_in_shard: U256::zero(),
            base_reward: U256::zero(),
            top_up_reward: U256::zero(),
            full_reward: U256::zero(),
        }
    }
}

/// Rewards and fees collected by one reward address.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewardAddressRecord {
    /// Receiving address.
    pub address: Address,
    /// Sum of `full_reward` over the nodes paying to this address.
    pub protocol_rewards: U256,
    /// Sum of accumulated fees over the nodes paying to this address.
    pub accumulated_fees: U256,
}

impl RewardAddressRecord {
    /// Create an empty record.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            protocol_rewards: U256::zero(),
            accumulated_fees: U256::zero(),
        }
    }

    /// Value of the reward transaction for this address.
    pub fn value(&self) -> U256 {
        self.protocol_rewards + self.accumulated_fees
    }
}

/// Reward records grouped by reward address, plus what offline nodes earned.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RewardAddressAggregation {
    /// One record per reward address of an online node.
    pub records: BTreeMap<Address, RewardAddressRecord>,
    /// Sum of `full_reward` over offline nodes.
    pub unassigned_rewards: U256,
    /// Sum of accumulated fees over offline nodes.
    pub unassigned_fees: U256,
}

impl RewardAddressAggregation {
    /// Total withheld from offline nodes.
    pub fn unassigned(&self) -> U256 {
        self.unassigned_rewards + self.unassigned_fees
    }
}

/// Transient per-run engine state.
///
/// Reset at the start of every create or verify run; nothing survives from
/// one epoch to the next.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct EpochRewardsState {
    /// Value of all validator reward transactions created.
    pub accumulated_rewards: U256,
    /// Remainders and redirected value bound for protocol sustainability.
    pub accumulated_dust: U256,
    /// Value of the protocol sustainability transaction.
    pub protocol_sustainability_value: U256,
    /// Base reward per block for one consensus slot, per shard.
    pub base_rewards_per_block_per_validator: BTreeMap<ShardId, U256>,
    /// Whether coordinator shard addresses may receive rewards this epoch.
    pub delegation_enabled: bool,
}

impl EpochRewardsState {
    /// Create a zeroed state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything left from a previous run.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
