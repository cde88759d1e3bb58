//! # Outbound Ports
//!
//! Traits for the data the rewards engine reads from other subsystems:
//! staking, per-shard block statistics, consensus group sizes, address
//! routing and persistence.

use crate::domain::EligibleKeysMap;
use crate::error::{Result, RewardsError};
use parking_lot::RwLock;
use shared_types::{Address, BlsPublicKey, Hash, RewardTransaction, ShardId, U256};
use std::collections::{BTreeMap, HashMap};

/// Staking data provider - outbound port.
///
/// Answers top-up queries for the epoch being closed. Must be prepared once
/// per run before any query.
pub trait StakingDataProvider: Send + Sync {
    /// Stake above the node minimum for one validator.
    fn node_staked_top_up(&self, public_key: &BlsPublicKey) -> Result<U256>;

    /// Summed top-up of all eligible nodes.
    fn total_top_up_stake_eligible_nodes(&self) -> U256;

    /// Load staking data for the eligible keys of every shard.
    fn prepare_staking_data(&self, keys: &EligibleKeysMap) -> Result<()>;
}

/// Economics statistics provider - outbound port.
pub trait EconomicsDataProvider: Send + Sync {
    /// Blocks produced by every shard during the epoch.
    fn number_of_blocks_per_shard(&self) -> BTreeMap<ShardId, u64>;

    /// Rewards available for produced blocks.
    fn rewards_to_be_distributed_for_blocks(&self) -> U256;

    /// Blocks produced by all shards together.
    fn number_of_blocks(&self) -> u64 {
        self.number_of_blocks_per_shard()
            .values()
            .fold(0u64, |acc, blocks| acc.saturating_add(*blocks))
    }
}

/// Validator registry - outbound port.
pub trait NodesConfigProvider: Send + Sync {
    /// Consensus group size of a shard.
    fn consensus_group_size(&self, shard_id: ShardId) -> usize;
}

/// Address to shard routing - outbound port.
pub trait AddressRouter: Send + Sync {
    /// Shard owning an address.
    fn shard_of(&self, address: &Address) -> ShardId;

    /// Number of normal shards, coordinator excluded.
    fn number_of_shards(&self) -> u32;
}

/// Reward transaction persistence - outbound port.
pub trait RewardsTxStorage: Send + Sync {
    /// Store a transaction under its hash.
    fn put(&self, hash: Hash, tx: &RewardTransaction) -> Result<()>;

    /// Remove a transaction. Removing a missing hash is not an error.
    fn remove(&self, hash: &Hash) -> Result<()>;

    /// Load a transaction.
    fn get(&self, hash: &Hash) -> Result<Option<RewardTransaction>>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock staking data provider for testing.
#[derive(Default)]
pub struct MockStakingDataProvider {
    /// Top-up per validator key. Missing keys are reported as not found.
    pub top_ups: HashMap<BlsPublicKey, U256>,
    /// Value returned for the total eligible top-up.
    pub total_eligible_top_up: U256,
    /// Error message returned by `prepare_staking_data`, if set.
    pub prepare_error: Option<String>,
    /// Keys received by the last `prepare_staking_data` call.
    pub prepared_keys: RwLock<Option<EligibleKeysMap>>,
}

impl MockStakingDataProvider {
    /// Give every key the same top-up and report their sum as the total.
    pub fn with_uniform_top_up<'a, I>(keys: I, top_up: U256) -> Self
    where
        I: IntoIterator<Item = &'a BlsPublicKey>,
    {
        let top_ups: HashMap<BlsPublicKey, U256> = keys.into_iter().map(|key| (*key, top_up)).collect();
        let total_eligible_top_up = top_up * U256::from(top_ups.len());
        Self {
            top_ups,
            total_eligible_top_up,
            ..Default::default()
        }
    }
}

impl StakingDataProvider for MockStakingDataProvider {
    fn node_staked_top_up(&self, public_key: &BlsPublicKey) -> Result<U256> {
        self.top_ups
            .get(public_key)
            .copied()
            .ok_or_else(|| RewardsError::StakeNotFound {
                key: hex::encode(&public_key[..8]),
            })
    }

    fn total_top_up_stake_eligible_nodes(&self) -> U256 {
        self.total_eligible_top_up
    }

    fn prepare_staking_data(&self, keys: &EligibleKeysMap) -> Result<()> {
        if let Some(reason) = &self.prepare_error {
            return Err(RewardsError::StakingDataPreparation(reason.clone()));
        }
        *self.prepared_keys.write() = Some(keys.clone());
        Ok(())
    }
}

/// Mock validator registry for testing.
#[derive(Clone, Default)]
pub struct MockNodesConfig {
    /// Consensus group size per shard.
    pub group_sizes: BTreeMap<ShardId, usize>,
    /// Size used for shards missing from `group_sizes`.
    pub default_size: usize,
}

impl MockNodesConfig {
    /// Same consensus group size for every shard.
    pub fn uniform(size: usize) -> Self {
        Self {
            group_sizes: BTreeMap::new(),
            default_size: size,
        }
    }
}

impl NodesConfigProvider for MockNodesConfig {
    fn consensus_group_size(&self, shard_id: ShardId) -> usize {
        self.group_sizes
            .get(&shard_id)
            .copied()
            .unwrap_or(self.default_size)
    }
}

/// Mock reward transaction storage for testing.
#[derive(Default)]
pub struct MockRewardsTxStorage {
    /// Stored transactions.
    pub txs: RwLock<HashMap<Hash, RewardTransaction>>,
    /// Error message returned by every write, if set.
    pub write_error: Option<String>,
}

impl MockRewardsTxStorage {
    /// Storage whose writes all fail with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            write_error: Some(reason.to_string()),
            ..Default::default()
        }
    }

    fn check_write(&self) -> Result<()> {
        match &self.write_error {
            Some(reason) => Err(RewardsError::Storage(reason.clone())),
            None => Ok(()),
        }
    }
}

impl RewardsTxStorage for MockRewardsTxStorage {
    fn put(&self, hash: Hash, tx: &RewardTransaction) -> Result<()> {
        self.check_write()?;
        self.txs.write().insert(hash, tx.clone());
        Ok(())
    }

    fn remove(&self, hash: &Hash) -> Result<()> {
        self.check_write()?;
        self.txs.write().remove(hash);
        Ok(())
    }

    fn get(&self, hash: &Hash) -> Result<Option<RewardTransaction>> {
        Ok(self.txs.read().get(hash).cloned())
    }
}
