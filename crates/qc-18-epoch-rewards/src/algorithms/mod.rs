//! # Algorithms Module
//!
//! Pure numeric and layout functions of the rewards engine.

pub mod aggregation;
pub mod allocation;
pub mod distribution;
pub mod hashing;
pub mod miniblocks;
pub mod power;
pub mod reward_curve;

pub use aggregation::{aggregate_base_and_top_up_rewards_per_node, compute_validator_info_per_reward_address};
pub use allocation::{mul_div, sum_amounts, ProportionalAllocation};
pub use distribution::{
    assign_base_rewards, assign_top_up_rewards, compute_base_rewards_per_block,
    compute_base_rewards_per_block_per_validator,
};
pub use hashing::{keccak256, miniblock_hash, miniblock_header, reward_transaction_hash};
pub use miniblocks::{finalize_miniblocks, initialize_rewards_miniblocks, miniblock_slot};
pub use power::{
    compute_node_power_in_shard, compute_nodes_power_in_shard, compute_rewards_for_power_per_shard,
    compute_shards_power, compute_top_up_per_shard,
};
pub use reward_curve::{TopUpRewardCurve, TOP_UP_FACTOR_DENOMINATOR};
