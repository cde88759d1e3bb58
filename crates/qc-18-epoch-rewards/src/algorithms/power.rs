//! # Power & Top-Up Model
//!
//! A node's power is its top-up stake weighted by the number of blocks it
//! helped produce. A shard's power is its summed top-up weighted by the
//! number of blocks the shard produced.

use super::allocation::ProportionalAllocation;
use crate::domain::NodesRewardInfo;
use shared_types::{ShardId, ValidatorInfo, U256};
use std::collections::BTreeMap;

/// Power of one node inside its shard.
///
/// Zero when the node neither led nor validated a block.
pub fn compute_node_power_in_shard(info: &ValidatorInfo, top_up: U256) -> U256 {
    if info.is_offline() {
        return U256::zero();
    }
    top_up.saturating_mul(U256::from(info.num_selected_in_success_blocks))
}

/// Assign `power_in_shard` on every record and return the per-shard sums.
pub fn compute_nodes_power_in_shard(records: &mut NodesRewardInfo<'_>) -> BTreeMap<ShardId, U256> {
    records
        .iter_mut()
        .map(|(shard_id, shard_records)| {
            let mut shard_power = U256::zero();
            for record in shard_records.iter_mut() {
                record.power_in_shard = compute_node_power_in_shard(record.validator, record.top_up_stake);
                shard_power = shard_power.saturating_add(record.power_in_shard);
            }
            (*shard_id, shard_power)
        })
        .collect()
}

/// Summed top-up stake of the eligible nodes of every shard.
pub fn compute_top_up_per_shard(records: &NodesRewardInfo<'_>) -> BTreeMap<ShardId, U256> {
    records
        .iter()
        .map(|(shard_id, shard_records)| {
            let top_up = shard_records
                .iter()
                .fold(U256::zero(), |acc, record| acc.saturating_add(record.top_up_stake));
            (*shard_id, top_up)
        })
        .collect()
}

/// Power of every shard and their total.
///
/// A shard missing from `blocks_per_shard` produced no blocks and has zero
/// power.
pub fn compute_shards_power(
    top_up_per_shard: &BTreeMap<ShardId, U256>,
    blocks_per_shard: &BTreeMap<ShardId, u64>,
) -> (BTreeMap<ShardId, U256>, U256) {
    let mut total_power = U256::zero();
    let shards_power = top_up_per_shard
        .iter()
        .map(|(shard_id, top_up)| {
            let blocks = blocks_per_shard.get(shard_id).copied().unwrap_or(0);
            let power = top_up.saturating_mul(U256::from(blocks));
            total_power = total_power.saturating_add(power);
            (*shard_id, power)
        })
        .collect();

    (shards_power, total_power)
}

/// Share of the top-up rewards owed to every shard, truncating, and the
/// undistributed remainder.
///
/// Every shard gets zero when the total power is zero and the whole
/// `top_up_rewards` is returned as dust.
pub fn compute_rewards_for_power_per_shard(
    power_per_shard: &BTreeMap<ShardId, U256>,
    total_power: U256,
    top_up_rewards: U256,
) -> (BTreeMap<ShardId, U256>, U256) {
    ProportionalAllocation::split_map_with_total_weight(top_up_rewards, power_per_shard, total_power)
}
