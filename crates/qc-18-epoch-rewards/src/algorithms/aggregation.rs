//! # Reward Aggregation
//!
//! Combines the base and top-up parts of every node and groups the result
//! by reward address.

use crate::domain::{NodesRewardInfo, RewardAddressAggregation, RewardAddressRecord};

/// Set `full_reward = base_reward + top_up_reward` on every record.
pub fn aggregate_base_and_top_up_rewards_per_node(records: &mut NodesRewardInfo<'_>) {
    for record in records.values_mut().flatten() {
        record.full_reward = record.base_reward + record.top_up_reward;
    }
}

/// Group online nodes by reward address.
///
/// Offline nodes are left out; what they earned is reported as unassigned.
pub fn compute_validator_info_per_reward_address(records: &NodesRewardInfo<'_>) -> RewardAddressAggregation {
    let mut aggregation = RewardAddressAggregation::default();

    for record in records.values().flatten() {
        let validator = record.validator;
        if validator.is_offline() {
            aggregation.unassigned_rewards += record.full_reward;
            aggregation.unassigned_fees += validator.accumulated_fees;
            continue;
        }

        let entry = aggregation
            .records
            .entry(validator.reward_address)
            .or_insert_with(|| RewardAddressRecord::new(validator.reward_address));
        entry.protocol_rewards += record.full_reward;
        entry.accumulated_fees += validator.accumulated_fees;
    }

    aggregation
}
