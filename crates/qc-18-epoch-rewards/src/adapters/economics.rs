//! # Epoch Economics Statistics
//!
//! In-memory economics provider filled by the epoch-end economics
//! computation and read by the rewards engine.

use crate::ports::EconomicsDataProvider;
use parking_lot::RwLock;
use shared_types::{ShardId, U256};
use std::collections::BTreeMap;

#[derive(Default)]
struct Statistics {
    number_of_blocks_per_shard: BTreeMap<ShardId, u64>,
    rewards_to_be_distributed_for_blocks: U256,
}

/// Settable economics statistics for one epoch.
#[derive(Default)]
pub struct EpochEconomicsStatistics {
    inner: RwLock<Statistics>,
}

impl EpochEconomicsStatistics {
    /// Create empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the blocks produced by every shard.
    pub fn set_number_of_blocks_per_shard(&self, blocks: BTreeMap<ShardId, u64>) {
        self.inner.write().number_of_blocks_per_shard = blocks;
    }

    /// Record the rewards available for produced blocks.
    pub fn set_rewards_to_be_distributed_for_blocks(&self, value: U256) {
        self.inner.write().rewards_to_be_distributed_for_blocks = value;
    }

    /// Forget everything recorded for the previous epoch.
    pub fn clear(&self) {
        *self.inner.write() = Statistics::default();
    }
}

impl EconomicsDataProvider for EpochEconomicsStatistics {
    fn number_of_blocks_per_shard(&self) -> BTreeMap<ShardId, u64> {
        self.inner.read().number_of_blocks_per_shard.clone()
    }

    fn rewards_to_be_distributed_for_blocks(&self) -> U256 {
        self.inner.read().rewards_to_be_distributed_for_blocks
    }
}
