//! Epoch Rewards Creator
//!
//! Turns the validator statistics of a closed epoch into reward
//! transactions grouped by destination shard, and checks that a candidate
//! epoch-start block carries exactly the miniblocks this node would build.
//!
//! A run goes through these stages:
//!
//! ```text
//! prepare ─► ingest ─► top-up lookup ─► curve split ─► base split
//!                                                    └► top-up split
//!         ─► aggregate ─► group by address ─► miniblocks ─► protocol tx
//!         ─► conservation check ─► finalize
//! ```

use crate::{
    algorithms::{
        aggregate_base_and_top_up_rewards_per_node, assign_base_rewards, assign_top_up_rewards,
        compute_base_rewards_per_block, compute_base_rewards_per_block_per_validator,
        compute_nodes_power_in_shard, compute_rewards_for_power_per_shard, compute_shards_power,
        compute_top_up_per_shard, compute_validator_info_per_reward_address, finalize_miniblocks,
        initialize_rewards_miniblocks, miniblock_hash, miniblock_slot, reward_transaction_hash,
        sum_amounts, TopUpRewardCurve,
    },
    config::RewardsConfig,
    domain::{
        invariant_offline_nodes_powerless, invariant_rewards_split_conserved,
        invariant_value_conserved, EligibleKeysMap, EpochRewardsState, NodeRewardRecord,
        NodesRewardInfo, RewardAddressAggregation, RewardsMode, RewardsRunSummary,
        ValidatorsInfoMap,
    },
    error::{Result, RewardsError},
    metrics::Metrics,
    ports::{
        AddressRouter, EconomicsDataProvider, EpochRewardsApi, NodesConfigProvider,
        RewardsTxStorage, StakingDataProvider,
    },
};
use shared_types::{
    EpochEconomics, EpochStartBlock, Hash, MiniBlock, MiniBlockHeader, MiniBlockType,
    RewardTransaction, ShardId, COORDINATOR_SHARD_ID, U256,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Outbound dependencies of the rewards creator.
#[derive(Clone)]
pub struct EpochRewardsDependencies {
    /// Top-up stake lookups
    pub staking: Arc<dyn StakingDataProvider>,
    /// Per-shard block counts and rewards for blocks
    pub economics: Arc<dyn EconomicsDataProvider>,
    /// Consensus group sizes
    pub nodes_config: Arc<dyn NodesConfigProvider>,
    /// Address to shard routing
    pub router: Arc<dyn AddressRouter>,
    /// Reward transaction persistence
    pub storage: Arc<dyn RewardsTxStorage>,
}

/// Epoch-end rewards engine.
///
/// Holds per-run state, so create and verify take `&mut self`.
pub struct EpochRewardsCreator {
    config: RewardsConfig,
    curve: TopUpRewardCurve,
    protocol_sustainability_shard: ShardId,
    staking: Arc<dyn StakingDataProvider>,
    economics: Arc<dyn EconomicsDataProvider>,
    nodes_config: Arc<dyn NodesConfigProvider>,
    router: Arc<dyn AddressRouter>,
    storage: Arc<dyn RewardsTxStorage>,
    state: EpochRewardsState,
    tx_cache: BTreeMap<Hash, RewardTransaction>,
    last_run: Option<RewardsRunSummary>,
    metrics: Arc<Metrics>,
}

impl EpochRewardsCreator {
    /// Create a rewards engine.
    ///
    /// Fails on an invalid curve configuration and on a protocol
    /// sustainability address owned by the coordinator shard.
    pub fn new(config: RewardsConfig, deps: EpochRewardsDependencies) -> Result<Self> {
        config.validate()?;
        let curve = TopUpRewardCurve::from_config(&config)?;

        let protocol_sustainability_shard = deps.router.shard_of(&config.protocol_sustainability_address);
        if protocol_sustainability_shard == COORDINATOR_SHARD_ID {
            return Err(RewardsError::ProtocolSustainabilityAddressInCoordinatorShard);
        }

        info!("[qc-18] Initializing Epoch Rewards Creator");
        info!("  Top-up factor: {} ppm", curve.factor_ppm());
        info!("  Top-up gradient point: {}", curve.gradient_point());
        info!("  Protocol sustainability shard: {}", protocol_sustainability_shard);
        info!("  Delegation enable epoch: {}", config.delegation_enable_epoch);

        Ok(Self {
            config,
            curve,
            protocol_sustainability_shard,
            staking: deps.staking,
            economics: deps.economics,
            nodes_config: deps.nodes_config,
            router: deps.router,
            storage: deps.storage,
            state: EpochRewardsState::new(),
            tx_cache: BTreeMap::new(),
            last_run: None,
            metrics: Arc::new(Metrics::new()),
        })
    }

    /// Share a metrics collector with other components.
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Engine configuration.
    pub fn config(&self) -> &RewardsConfig {
        &self.config
    }

    /// Top-up reward curve built from the configuration.
    pub fn curve(&self) -> &TopUpRewardCurve {
        &self.curve
    }

    /// State left by the last run.
    pub fn state(&self) -> &EpochRewardsState {
        &self.state
    }

    /// Summary of the last successful run.
    pub fn last_run(&self) -> Option<&RewardsRunSummary> {
        self.last_run.as_ref()
    }

    /// Metrics collector.
    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }

    // =========================================================================
    // Node performance ingest
    // =========================================================================

    /// One zeroed record per eligible validator, input order kept per shard.
    ///
    /// Shards without eligible validators are left out.
    pub fn init_nodes_rewards_info(validators: &ValidatorsInfoMap) -> NodesRewardInfo<'_> {
        validators
            .iter()
            .filter_map(|(shard_id, shard_validators)| {
                let records: Vec<NodeRewardRecord<'_>> = shard_validators
                    .iter()
                    .filter(|info| info.is_eligible())
                    .map(NodeRewardRecord::new)
                    .collect();
                (!records.is_empty()).then_some((*shard_id, records))
            })
            .collect()
    }

    /// Public keys of the eligible validators of every shard.
    pub fn eligible_nodes_key_map(validators: &ValidatorsInfoMap) -> EligibleKeysMap {
        validators
            .iter()
            .filter_map(|(shard_id, shard_validators)| {
                let keys: Vec<_> = shard_validators
                    .iter()
                    .filter(|info| info.is_eligible())
                    .map(|info| info.public_key)
                    .collect();
                (!keys.is_empty()).then_some((*shard_id, keys))
            })
            .collect()
    }

    /// Fill `top_up_stake` on every record.
    ///
    /// A failed lookup leaves the top-up at zero.
    pub fn get_top_up_for_all_eligible_nodes(&self, records: &mut NodesRewardInfo<'_>) {
        for record in records.values_mut().flatten() {
            match self.staking.node_staked_top_up(&record.validator.public_key) {
                Ok(top_up) => record.top_up_stake = top_up,
                Err(e) => {
                    debug!(
                        "[qc-18] No top-up for {}: {}",
                        hex::encode(&record.validator.public_key[..8]),
                        e
                    );
                    record.top_up_stake = U256::zero();
                }
            }
        }
    }

    // =========================================================================
    // Per-node rewards
    // =========================================================================

    /// Split the base rewards by consensus participation and return the dust.
    pub fn compute_base_rewards_per_node(
        &mut self,
        records: &mut NodesRewardInfo<'_>,
        base_rewards: U256,
    ) -> Result<U256> {
        let per_block = compute_base_rewards_per_block(base_rewards, self.economics.number_of_blocks());

        let group_sizes: BTreeMap<ShardId, usize> = records
            .keys()
            .map(|shard_id| (*shard_id, self.nodes_config.consensus_group_size(*shard_id)))
            .collect();
        let per_validator = compute_base_rewards_per_block_per_validator(per_block, &group_sizes);

        let dust = assign_base_rewards(records, &per_validator, base_rewards)?;
        self.state.base_rewards_per_block_per_validator = per_validator;
        Ok(dust)
    }

    /// Split the top-up rewards across shards by shard power.
    ///
    /// Returns the share of every shard and the undistributed remainder.
    pub fn compute_top_up_rewards_per_shard(
        &self,
        top_up_rewards: U256,
        records: &NodesRewardInfo<'_>,
    ) -> (BTreeMap<ShardId, U256>, U256) {
        let top_up_per_shard = compute_top_up_per_shard(records);
        let blocks_per_shard = self.economics.number_of_blocks_per_shard();
        let (shards_power, total_power) = compute_shards_power(&top_up_per_shard, &blocks_per_shard);

        compute_rewards_for_power_per_shard(&shards_power, total_power, top_up_rewards)
    }

    /// Split the top-up rewards across shards, then across the nodes of
    /// every shard by node power. Returns the dust of both levels.
    pub fn compute_top_up_rewards_per_node(
        &self,
        records: &mut NodesRewardInfo<'_>,
        top_up_rewards: U256,
    ) -> Result<U256> {
        let (per_shard, shard_dust) = self.compute_top_up_rewards_per_shard(top_up_rewards, records);
        let power_per_shard = compute_nodes_power_in_shard(records);
        invariant_offline_nodes_powerless(records)?;

        let node_dust = assign_top_up_rewards(records, &per_shard, &power_per_shard);
        Ok(shard_dust + node_dust)
    }

    /// Compute the full reward of every eligible node.
    ///
    /// Returns the records and the dust left by the base and top-up splits.
    pub fn compute_rewards_per_node<'a>(
        &mut self,
        validators: &'a ValidatorsInfoMap,
    ) -> Result<(NodesRewardInfo<'a>, U256)> {
        let mut records = Self::init_nodes_rewards_info(validators);
        self.get_top_up_for_all_eligible_nodes(&mut records);

        let rewards_for_blocks = self.economics.rewards_to_be_distributed_for_blocks();
        let total_top_up = self.staking.total_top_up_stake_eligible_nodes();
        let top_up_rewards = self.curve.compute_top_up_rewards(rewards_for_blocks, total_top_up);
        let base_rewards = rewards_for_blocks - top_up_rewards;

        let base_dust = self.compute_base_rewards_per_node(&mut records, base_rewards)?;
        let top_up_dust = self.compute_top_up_rewards_per_node(&mut records, top_up_rewards)?;
        aggregate_base_and_top_up_rewards_per_node(&mut records);

        let dust = base_dust + top_up_dust;
        invariant_rewards_split_conserved(&records, dust, rewards_for_blocks)?;

        debug!(
            "[qc-18] Rewards for blocks {}: base {}, top-up {}, dust {}",
            rewards_for_blocks, base_rewards, top_up_rewards, dust
        );

        Ok((records, dust))
    }

    // =========================================================================
    // Miniblocks
    // =========================================================================

    /// Add one reward transaction per reward address and return the value
    /// that could not be handed out.
    fn add_validator_rewards_to_miniblocks(
        &mut self,
        block: &EpochStartBlock,
        miniblocks: &mut [MiniBlock],
        aggregation: &RewardAddressAggregation,
    ) -> Result<U256> {
        let number_of_shards = self.router.number_of_shards();
        let mut dust = aggregation.unassigned();

        for record in aggregation.records.values() {
            let value = record.value();
            if value.is_zero() {
                continue;
            }

            let shard_id = self.router.shard_of(&record.address);
            if shard_id == COORDINATOR_SHARD_ID && !self.state.delegation_enabled {
                debug!(
                    "[qc-18] Coordinator shard address {} redirected to dust: {}",
                    hex::encode(record.address),
                    value
                );
                dust += value;
                continue;
            }

            let slot = miniblock_slot(shard_id, number_of_shards).ok_or_else(|| {
                RewardsError::InvalidConfig(format!("address routed to unknown shard {}", shard_id))
            })?;

            let tx = RewardTransaction {
                round: block.round,
                epoch: block.epoch,
                value,
                receiver: record.address,
            };
            let tx_hash = reward_transaction_hash(&tx);

            self.state.accumulated_rewards += value;
            miniblocks[slot].tx_hashes.push(tx_hash);
            self.tx_cache.insert(tx_hash, tx);
        }

        Ok(dust)
    }

    /// Add the protocol sustainability transaction carrying the configured
    /// allocation, all dust and `validator_share`, the value earned by nodes
    /// paying to the protocol sustainability address.
    fn add_protocol_rewards_to_miniblocks(
        &mut self,
        block: &EpochStartBlock,
        economics: &EpochEconomics,
        validator_share: U256,
        miniblocks: &mut [MiniBlock],
    ) -> Result<()> {
        let value = economics.rewards_for_protocol_sustainability + self.state.accumulated_dust + validator_share;
        let tx = RewardTransaction {
            round: block.round,
            epoch: block.epoch,
            value,
            receiver: self.config.protocol_sustainability_address,
        };
        let tx_hash = reward_transaction_hash(&tx);

        let slot = miniblock_slot(self.protocol_sustainability_shard, self.router.number_of_shards())
            .ok_or_else(|| {
                RewardsError::InvalidConfig(format!(
                    "protocol sustainability shard {} has no miniblock",
                    self.protocol_sustainability_shard
                ))
            })?;

        self.state.protocol_sustainability_value = value;
        miniblocks[slot].tx_hashes.push(tx_hash);
        self.tx_cache.insert(tx_hash, tx);
        Ok(())
    }

    /// Reset per-run state and load staking data for the eligible nodes.
    fn prepare_rewards_data(&mut self, block: &EpochStartBlock, validators: &ValidatorsInfoMap) -> Result<()> {
        self.state.reset();
        self.tx_cache.clear();
        self.state.delegation_enabled = self.config.is_delegation_enabled(block.epoch);

        let keys = Self::eligible_nodes_key_map(validators);
        self.staking.prepare_staking_data(&keys)
    }

    fn create_miniblocks(
        &mut self,
        mode: RewardsMode,
        block: &EpochStartBlock,
        validators: &ValidatorsInfoMap,
        economics: &EpochEconomics,
    ) -> Result<Vec<MiniBlock>> {
        self.prepare_rewards_data(block, validators)?;

        let (records, rewards_dust) = self.compute_rewards_per_node(validators)?;
        self.state.accumulated_dust += rewards_dust;

        let mut aggregation = compute_validator_info_per_reward_address(&records);
        // one transaction per receiver
        let protocol_validator_share = aggregation
            .records
            .remove(&self.config.protocol_sustainability_address)
            .map(|record| record.value())
            .unwrap_or_default();
        if !protocol_validator_share.is_zero() {
            debug!(
                "[qc-18] Validator rewards {} merged into the protocol sustainability tx",
                protocol_validator_share
            );
        }

        let mut miniblocks = initialize_rewards_miniblocks(self.router.number_of_shards());

        let dust = self.add_validator_rewards_to_miniblocks(block, &mut miniblocks, &aggregation)?;
        self.state.accumulated_dust += dust;
        self.add_protocol_rewards_to_miniblocks(block, economics, protocol_validator_share, &mut miniblocks)?;

        let fees = sum_amounts(
            records
                .values()
                .flatten()
                .map(|record| &record.validator.accumulated_fees),
        );
        let expected = fees
            + self.economics.rewards_to_be_distributed_for_blocks()
            + economics.rewards_for_protocol_sustainability;
        let distributed = self.state.accumulated_rewards + self.state.protocol_sustainability_value;
        if let Err(e) = invariant_value_conserved(distributed, expected) {
            error!("[qc-18] Reward value not conserved for epoch {}: {}", block.epoch, e);
            return Err(e);
        }

        let miniblocks = finalize_miniblocks(miniblocks);
        let summary = RewardsRunSummary {
            mode,
            epoch: block.epoch,
            tx_count: self.tx_cache.len(),
            miniblock_count: miniblocks.len(),
        };
        info!(
            "[qc-18] {} rewards for epoch {}: {} txs in {} miniblocks, dust {}",
            mode.as_str(),
            block.epoch,
            summary.tx_count,
            summary.miniblock_count,
            self.state.accumulated_dust
        );
        self.last_run = Some(summary);

        Ok(miniblocks)
    }

    fn run(
        &mut self,
        mode: RewardsMode,
        block: &EpochStartBlock,
        validators: &ValidatorsInfoMap,
        economics: &EpochEconomics,
    ) -> Result<Vec<MiniBlock>> {
        let result = self.create_miniblocks(mode, block, validators, economics);
        if let Err(e) = &result {
            warn!("[qc-18] {} rewards aborted for epoch {}: {}", mode.as_str(), block.epoch, e);
            self.metrics.record_aborted();
        }
        result
    }

    fn reward_tx_hashes(miniblocks: &[MiniBlock]) -> impl Iterator<Item = &Hash> {
        miniblocks
            .iter()
            .filter(|miniblock| miniblock.block_type == MiniBlockType::Rewards)
            .flat_map(|miniblock| miniblock.tx_hashes.iter())
    }
}

impl EpochRewardsApi for EpochRewardsCreator {
    fn create_rewards_miniblocks(
        &mut self,
        block: &EpochStartBlock,
        validators: &ValidatorsInfoMap,
        economics: &EpochEconomics,
    ) -> Result<Vec<MiniBlock>> {
        let miniblocks = self.run(RewardsMode::Create, block, validators, economics)?;
        self.metrics.record_created(self.tx_cache.len());
        Ok(miniblocks)
    }

    fn verify_rewards_miniblocks(
        &mut self,
        block: &EpochStartBlock,
        validators: &ValidatorsInfoMap,
        economics: &EpochEconomics,
    ) -> Result<()> {
        let created = self.run(RewardsMode::Verify, block, validators, economics)?;

        let received: Vec<&MiniBlockHeader> = block
            .miniblock_headers
            .iter()
            .filter(|header| header.block_type == MiniBlockType::Rewards)
            .collect();

        for header in &received {
            let matching = created
                .iter()
                .find(|miniblock| miniblock.receiver_shard_id == header.receiver_shard_id);

            let hash_matches = matching.is_some_and(|miniblock| miniblock_hash(miniblock) == header.hash);
            if !hash_matches {
                warn!(
                    "[qc-18] Reward miniblock hash mismatch for shard {} in epoch {}",
                    header.receiver_shard_id, block.epoch
                );
                self.metrics.record_verification_failure();
                return Err(RewardsError::RewardMiniBlockHashMismatch {
                    receiver_shard_id: header.receiver_shard_id,
                });
            }
        }

        if received.len() != created.len() {
            warn!(
                "[qc-18] Reward miniblocks count mismatch in epoch {}: created {}, received {}",
                block.epoch,
                created.len(),
                received.len()
            );
            self.metrics.record_verification_failure();
            return Err(RewardsError::RewardMiniBlocksCountMismatch {
                created: created.len(),
                received: received.len(),
            });
        }

        self.metrics.record_verified();
        Ok(())
    }

    fn get_rewards_txs(&self, miniblocks: &[MiniBlock]) -> BTreeMap<Hash, RewardTransaction> {
        Self::reward_tx_hashes(miniblocks)
            .filter_map(|tx_hash| match self.tx_cache.get(tx_hash) {
                Some(tx) => Some((*tx_hash, tx.clone())),
                None => {
                    debug!("[qc-18] Reward tx {} not in local cache", hex::encode(tx_hash));
                    None
                }
            })
            .collect()
    }

    fn local_tx_cache(&self) -> BTreeMap<Hash, RewardTransaction> {
        self.tx_cache.clone()
    }

    fn save_txs_to_storage(&self, miniblocks: &[MiniBlock]) -> Result<()> {
        for tx_hash in Self::reward_tx_hashes(miniblocks) {
            let tx = self
                .tx_cache
                .get(tx_hash)
                .ok_or_else(|| RewardsError::TransactionNotFound(hex::encode(tx_hash)))?;
            self.storage.put(*tx_hash, tx)?;
        }
        Ok(())
    }

    fn delete_txs_from_storage(&self, miniblocks: &[MiniBlock]) -> Result<()> {
        for tx_hash in Self::reward_tx_hashes(miniblocks) {
            self.storage.remove(tx_hash)?;
        }
        Ok(())
    }

    fn protocol_sustainability_rewards(&self) -> U256 {
        self.state.protocol_sustainability_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{EpochEconomicsStatistics, InMemoryRewardsTxStorage, MultiShardCoordinator};
    use crate::ports::{MockNodesConfig, MockRewardsTxStorage, MockStakingDataProvider};
    use shared_types::{ValidatorInfo, ValidatorList};

    fn make_validator(id: u8, shard_id: ShardId, list: ValidatorList) -> ValidatorInfo {
        let mut reward_address = [id; 32];
        reward_address[31] = shard_id as u8;
        ValidatorInfo {
            public_key: [id; 96],
            shard_id,
            reward_address,
            leader_success: 1,
            validator_success: 1,
            num_selected_in_success_blocks: 1,
            accumulated_fees: U256::zero(),
            list,
        }
    }

    fn make_creator(staking: MockStakingDataProvider) -> EpochRewardsCreator {
        make_creator_with_storage(staking, Arc::new(InMemoryRewardsTxStorage::new()))
    }

    fn make_creator_with_storage(
        staking: MockStakingDataProvider,
        storage: Arc<dyn RewardsTxStorage>,
    ) -> EpochRewardsCreator {
        let economics = EpochEconomicsStatistics::new();
        let mut blocks = BTreeMap::new();
        blocks.insert(0, 1u64);
        blocks.insert(1, 1u64);
        economics.set_number_of_blocks_per_shard(blocks);
        economics.set_rewards_to_be_distributed_for_blocks(U256::from(1000));

        let deps = EpochRewardsDependencies {
            staking: Arc::new(staking),
            economics: Arc::new(economics),
            nodes_config: Arc::new(MockNodesConfig::uniform(1)),
            router: Arc::new(MultiShardCoordinator::new(2)),
            storage,
        };
        EpochRewardsCreator::new(RewardsConfig::for_testing(), deps).unwrap()
    }

    fn make_block(protocol_allocation: u64) -> EpochStartBlock {
        EpochStartBlock {
            round: 10,
            epoch: 1,
            economics: EpochEconomics {
                rewards_for_protocol_sustainability: U256::from(protocol_allocation),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn make_validators() -> ValidatorsInfoMap {
        let mut validators = ValidatorsInfoMap::new();
        validators.insert(
            0,
            vec![
                make_validator(1, 0, ValidatorList::Eligible),
                make_validator(2, 0, ValidatorList::Waiting),
                make_validator(3, 0, ValidatorList::Eligible),
            ],
        );
        validators.insert(1, vec![make_validator(4, 1, ValidatorList::Jailed)]);
        validators
    }

    #[test]
    fn test_init_nodes_rewards_info_keeps_eligible_only() {
        let validators = make_validators();
        let records = EpochRewardsCreator::init_nodes_rewards_info(&validators);

        assert_eq!(records.len(), 1);
        let shard0 = &records[&0];
        assert_eq!(shard0.len(), 2);
        assert_eq!(shard0[0].validator.public_key, [1u8; 96]);
        assert_eq!(shard0[1].validator.public_key, [3u8; 96]);
        assert!(shard0.iter().all(|r| r.full_reward.is_zero()));
    }

    #[test]
    fn test_eligible_nodes_key_map() {
        let keys = EpochRewardsCreator::eligible_nodes_key_map(&make_validators());
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[&0], vec![[1u8; 96], [3u8; 96]]);
    }

    #[test]
    fn test_missing_top_up_is_zero() {
        let mut staking = MockStakingDataProvider::default();
        staking.top_ups.insert([1u8; 96], U256::from(77));
        let creator = make_creator(staking);

        let validators = make_validators();
        let mut records = EpochRewardsCreator::init_nodes_rewards_info(&validators);
        creator.get_top_up_for_all_eligible_nodes(&mut records);

        assert_eq!(records[&0][0].top_up_stake, U256::from(77));
        assert!(records[&0][1].top_up_stake.is_zero());
    }

    #[test]
    fn test_protocol_address_in_coordinator_shard_rejected() {
        let mut config = RewardsConfig::for_testing();
        config.protocol_sustainability_address = [0u8; 32];

        let deps = EpochRewardsDependencies {
            staking: Arc::new(MockStakingDataProvider::default()),
            economics: Arc::new(EpochEconomicsStatistics::new()),
            nodes_config: Arc::new(MockNodesConfig::uniform(1)),
            router: Arc::new(MultiShardCoordinator::new(2)),
            storage: Arc::new(InMemoryRewardsTxStorage::new()),
        };
        let result = EpochRewardsCreator::new(config, deps);
        assert!(matches!(
            result,
            Err(RewardsError::ProtocolSustainabilityAddressInCoordinatorShard)
        ));
    }

    #[test]
    fn test_invalid_factor_rejected() {
        let config = RewardsConfig {
            top_up_reward_factor: 2.0,
            ..RewardsConfig::for_testing()
        };
        let deps = EpochRewardsDependencies {
            staking: Arc::new(MockStakingDataProvider::default()),
            economics: Arc::new(EpochEconomicsStatistics::new()),
            nodes_config: Arc::new(MockNodesConfig::uniform(1)),
            router: Arc::new(MultiShardCoordinator::new(2)),
            storage: Arc::new(InMemoryRewardsTxStorage::new()),
        };
        let result = EpochRewardsCreator::new(config, deps);
        assert!(result.as_ref().is_err_and(|e| e.is_config_error()));
    }

    #[test]
    fn test_top_up_dust_from_both_levels() {
        let mut validators = ValidatorsInfoMap::new();
        validators.insert(
            0,
            vec![
                make_validator(1, 0, ValidatorList::Eligible),
                make_validator(2, 0, ValidatorList::Eligible),
                make_validator(3, 0, ValidatorList::Eligible),
            ],
        );
        validators.insert(1, vec![make_validator(4, 1, ValidatorList::Eligible)]);
        let keys = [[1u8; 96], [2u8; 96], [3u8; 96], [4u8; 96]];
        let creator = make_creator(MockStakingDataProvider::with_uniform_top_up(keys.iter(), U256::one()));

        let mut records = EpochRewardsCreator::init_nodes_rewards_info(&validators);
        creator.get_top_up_for_all_eligible_nodes(&mut records);

        // shard powers 3 and 1: 7 + 2 handed to shards, 1 left
        let (per_shard, shard_dust) = creator.compute_top_up_rewards_per_shard(U256::from(10), &records);
        assert_eq!(per_shard[&0], U256::from(7));
        assert_eq!(per_shard[&1], U256::from(2));
        assert_eq!(shard_dust, U256::one());

        // 7 across three equal nodes leaves 1 more
        let dust = creator.compute_top_up_rewards_per_node(&mut records, U256::from(10)).unwrap();
        assert!(records[&0].iter().all(|r| r.top_up_reward == U256::from(2)));
        assert_eq!(records[&1][0].top_up_reward, U256::from(2));
        assert_eq!(dust, U256::from(2));
    }

    #[test]
    fn test_validator_paying_to_protocol_address_merged() {
        let mut creator = make_creator(MockStakingDataProvider::default());
        let protocol_address = creator.config().protocol_sustainability_address;

        let mut shared = make_validator(5, 1, ValidatorList::Eligible);
        shared.reward_address = protocol_address;
        let mut validators = ValidatorsInfoMap::new();
        validators.insert(0, vec![make_validator(1, 0, ValidatorList::Eligible)]);
        validators.insert(1, vec![shared]);

        // both nodes earn 500, as much as the protocol allocation
        let block = make_block(500);
        let miniblocks = creator
            .create_rewards_miniblocks(&block, &validators, &block.economics)
            .unwrap();

        let hashes: Vec<&Hash> = miniblocks.iter().flat_map(|mb| mb.tx_hashes.iter()).collect();
        assert_eq!(hashes.len(), 2);
        assert_ne!(hashes[0], hashes[1]);

        let cache = creator.local_tx_cache();
        assert_eq!(cache.len(), 2);
        let protocol_txs: Vec<&RewardTransaction> =
            cache.values().filter(|tx| tx.receiver == protocol_address).collect();
        assert_eq!(protocol_txs.len(), 1);
        assert_eq!(protocol_txs[0].value, U256::from(1000));
        assert_eq!(creator.protocol_sustainability_rewards(), U256::from(1000));
        assert_eq!(creator.state().accumulated_rewards, U256::from(500));
    }

    #[test]
    fn test_storage_errors_propagate() {
        let mut creator = make_creator_with_storage(
            MockStakingDataProvider::default(),
            Arc::new(MockRewardsTxStorage::failing("disk full")),
        );
        let block = make_block(0);
        let miniblocks = creator
            .create_rewards_miniblocks(&block, &make_validators(), &block.economics)
            .unwrap();

        assert!(matches!(
            creator.save_txs_to_storage(&miniblocks),
            Err(RewardsError::Storage(_))
        ));
        assert!(matches!(
            creator.delete_txs_from_storage(&miniblocks),
            Err(RewardsError::Storage(_))
        ));
    }

    #[test]
    fn test_base_rewards_without_top_up() {
        let mut creator = make_creator(MockStakingDataProvider::default());
        let validators = make_validators();

        let (records, dust) = creator.compute_rewards_per_node(&validators).unwrap();
        // 2 blocks, group size 1: 500 per selection
        assert_eq!(records[&0][0].base_reward, U256::from(500));
        assert_eq!(records[&0][1].base_reward, U256::from(500));
        assert!(records[&0][0].top_up_reward.is_zero());
        assert!(dust.is_zero());
        assert_eq!(creator.state().base_rewards_per_block_per_validator[&0], U256::from(500));
    }
}
