//! # Inbound Ports
//!
//! API trait defining what the epoch rewards subsystem can do.

use crate::domain::ValidatorsInfoMap;
use crate::error::Result;
use shared_types::{EpochEconomics, EpochStartBlock, Hash, MiniBlock, RewardTransaction, U256};
use std::collections::BTreeMap;

/// Epoch rewards API - inbound port.
///
/// Create and verify runs reset the engine state first, so one instance can
/// be reused across epochs but not shared across concurrent runs.
pub trait EpochRewardsApi {
    /// Build the reward miniblocks of an epoch-start block.
    fn create_rewards_miniblocks(
        &mut self,
        block: &EpochStartBlock,
        validators: &ValidatorsInfoMap,
        economics: &EpochEconomics,
    ) -> Result<Vec<MiniBlock>>;

    /// Rebuild the reward miniblocks of a candidate block and compare them
    /// with its headers.
    fn verify_rewards_miniblocks(
        &mut self,
        block: &EpochStartBlock,
        validators: &ValidatorsInfoMap,
        economics: &EpochEconomics,
    ) -> Result<()>;

    /// Cached transactions referenced by the reward miniblocks.
    fn get_rewards_txs(&self, miniblocks: &[MiniBlock]) -> BTreeMap<Hash, RewardTransaction>;

    /// Snapshot of every transaction created by the last run.
    fn local_tx_cache(&self) -> BTreeMap<Hash, RewardTransaction>;

    /// Persist the transactions referenced by the reward miniblocks.
    fn save_txs_to_storage(&self, miniblocks: &[MiniBlock]) -> Result<()>;

    /// Remove the transactions referenced by the reward miniblocks.
    fn delete_txs_from_storage(&self, miniblocks: &[MiniBlock]) -> Result<()>;

    /// Value of the protocol sustainability transaction of the last run.
    fn protocol_sustainability_rewards(&self) -> U256;
}
