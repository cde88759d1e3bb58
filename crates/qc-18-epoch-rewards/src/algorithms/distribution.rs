//! # Per-Node Reward Distribution
//!
//! Splits the base and top-up parts of the block rewards across the eligible
//! nodes. Every split truncates and hands back its dust.

use super::allocation::ProportionalAllocation;
use crate::domain::NodesRewardInfo;
use crate::error::{Result, RewardsError};
use shared_types::{ShardId, U256};
use std::collections::BTreeMap;

/// Base reward for one produced block. Zero when no block was produced.
pub fn compute_base_rewards_per_block(base_rewards: U256, total_blocks: u64) -> U256 {
    if total_blocks == 0 {
        return U256::zero();
    }
    base_rewards / U256::from(total_blocks)
}

/// Base reward one consensus slot earns per block, for every shard.
///
/// A shard with a zero consensus group size earns nothing.
pub fn compute_base_rewards_per_block_per_validator(
    base_rewards_per_block: U256,
    consensus_group_sizes: &BTreeMap<ShardId, usize>,
) -> BTreeMap<ShardId, U256> {
    consensus_group_sizes
        .iter()
        .map(|(shard_id, size)| {
            let per_validator = if *size == 0 {
                U256::zero()
            } else {
                base_rewards_per_block / U256::from(*size)
            };
            (*shard_id, per_validator)
        })
        .collect()
}

/// Assign `base_reward` on every record and return the base dust.
///
/// Fails when the statistics claim more selections than the produced blocks
/// can pay for.
pub fn assign_base_rewards(
    records: &mut NodesRewardInfo<'_>,
    base_rewards_per_block_per_validator: &BTreeMap<ShardId, U256>,
    base_rewards: U256,
) -> Result<U256> {
    let mut distributed = U256::zero();
    for (shard_id, shard_records) in records.iter_mut() {
        let per_validator = base_rewards_per_block_per_validator
            .get(shard_id)
            .copied()
            .unwrap_or_default();
        for record in shard_records.iter_mut() {
            record.base_reward =
                per_validator.saturating_mul(U256::from(record.validator.num_selected_in_success_blocks));
            distributed = distributed.saturating_add(record.base_reward);
        }
    }

    base_rewards
        .checked_sub(distributed)
        .ok_or_else(|| RewardsError::InconsistentStatistics {
            reason: format!("base rewards {} exceed available {}", distributed, base_rewards),
        })
}

/// Assign `top_up_reward` on every record by node power inside its shard and
/// return the node-level top-up dust.
///
/// The whole reward of a shard whose nodes have no power becomes dust, as
/// does the reward of a shard without records.
pub fn assign_top_up_rewards(
    records: &mut NodesRewardInfo<'_>,
    top_up_rewards_per_shard: &BTreeMap<ShardId, U256>,
    power_per_shard: &BTreeMap<ShardId, U256>,
) -> U256 {
    let mut dust = U256::zero();
    for (shard_id, shard_rewards) in top_up_rewards_per_shard {
        let Some(shard_records) = records.get_mut(shard_id) else {
            dust += *shard_rewards;
            continue;
        };

        let weights: Vec<U256> = shard_records.iter().map(|record| record.power_in_shard).collect();
        let shard_power = power_per_shard.get(shard_id).copied().unwrap_or_default();
        let allocation = ProportionalAllocation::split_with_total_weight(*shard_rewards, &weights, shard_power);

        for (record, share) in shard_records.iter_mut().zip(allocation.shares) {
            record.top_up_reward = share;
        }
        dust += allocation.dust;
    }

    dust
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeRewardRecord;
    use shared_types::{ValidatorInfo, ValidatorList, COORDINATOR_SHARD_ID};

    fn make_validator(shard_id: ShardId, selected: u32) -> ValidatorInfo {
        ValidatorInfo {
            public_key: [shard_id as u8; 96],
            shard_id,
            reward_address: [1u8; 32],
            leader_success: 1,
            validator_success: 1,
            num_selected_in_success_blocks: selected,
            accumulated_fees: U256::zero(),
            list: ValidatorList::Eligible,
        }
    }

    #[test]
    fn test_base_per_block() {
        assert_eq!(compute_base_rewards_per_block(U256::from(1000), 3), U256::from(333));
        assert!(compute_base_rewards_per_block(U256::from(1000), 0).is_zero());
    }

    #[test]
    fn test_base_per_validator() {
        let mut sizes = BTreeMap::new();
        sizes.insert(0, 63usize);
        sizes.insert(COORDINATOR_SHARD_ID, 400usize);
        sizes.insert(1, 0usize);

        let per_validator = compute_base_rewards_per_block_per_validator(U256::from(4000), &sizes);
        assert_eq!(per_validator[&0], U256::from(63));
        assert_eq!(per_validator[&COORDINATOR_SHARD_ID], U256::from(10));
        assert!(per_validator[&1].is_zero());
    }

    #[test]
    fn test_assign_base_rewards() {
        let a = make_validator(0, 3);
        let b = make_validator(0, 2);
        let mut records = NodesRewardInfo::new();
        records.insert(0, vec![NodeRewardRecord::new(&a), NodeRewardRecord::new(&b)]);

        let mut per_validator = BTreeMap::new();
        per_validator.insert(0, U256::from(10));

        let dust = assign_base_rewards(&mut records, &per_validator, U256::from(53)).unwrap();
        assert_eq!(records[&0][0].base_reward, U256::from(30));
        assert_eq!(records[&0][1].base_reward, U256::from(20));
        assert_eq!(dust, U256::from(3));
    }

    #[test]
    fn test_assign_base_rewards_inconsistent() {
        let a = make_validator(0, 100);
        let mut records = NodesRewardInfo::new();
        records.insert(0, vec![NodeRewardRecord::new(&a)]);

        let mut per_validator = BTreeMap::new();
        per_validator.insert(0, U256::from(10));

        let result = assign_base_rewards(&mut records, &per_validator, U256::from(999));
        assert!(matches!(result, Err(RewardsError::InconsistentStatistics { .. })));
    }

    #[test]
    fn test_assign_top_up_rewards() {
        let a = make_validator(0, 1);
        let b = make_validator(0, 1);
        let c = make_validator(1, 1);
        let mut records = NodesRewardInfo::new();
        let mut ra = NodeRewardRecord::new(&a);
        ra.power_in_shard = U256::from(1);
        let mut rb = NodeRewardRecord::new(&b);
        rb.power_in_shard = U256::from(2);
        records.insert(0, vec![ra, rb]);
        records.insert(1, vec![NodeRewardRecord::new(&c)]);

        let mut shard_rewards = BTreeMap::new();
        shard_rewards.insert(0, U256::from(100));
        shard_rewards.insert(1, U256::from(50));
        let mut shard_power = BTreeMap::new();
        shard_power.insert(0, U256::from(3));
        shard_power.insert(1, U256::zero());

        let dust = assign_top_up_rewards(&mut records, &shard_rewards, &shard_power);
        assert_eq!(records[&0][0].top_up_reward, U256::from(33));
        assert_eq!(records[&0][1].top_up_reward, U256::from(66));
        assert!(records[&1][0].top_up_reward.is_zero());
        // 1 left in shard 0, 50 from the powerless shard
        assert_eq!(dust, U256::from(51));
    }

    #[test]
    fn test_assign_top_up_rewards_shard_without_records() {
        let a = make_validator(0, 1);
        let mut ra = NodeRewardRecord::new(&a);
        ra.power_in_shard = U256::from(5);
        let mut records = NodesRewardInfo::new();
        records.insert(0, vec![ra]);

        let mut shard_rewards = BTreeMap::new();
        shard_rewards.insert(0, U256::from(40));
        shard_rewards.insert(COORDINATOR_SHARD_ID, U256::from(9));
        let mut shard_power = BTreeMap::new();
        shard_power.insert(0, U256::from(5));

        let dust = assign_top_up_rewards(&mut records, &shard_rewards, &shard_power);
        assert_eq!(records[&0][0].top_up_reward, U256::from(40));
        assert_eq!(dust, U256::from(9));
    }
}
