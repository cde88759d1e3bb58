//! # Domain Invariants
//!
//! Rules every rewards run must satisfy before its output is handed out.

use super::entities::NodesRewardInfo;
use crate::error::{Result, RewardsError};
use shared_types::U256;

/// Invariant: nothing is created or destroyed by the per-node split.
///
/// `sum(full_reward) + dust == rewards_for_blocks`.
pub fn invariant_rewards_split_conserved(
    records: &NodesRewardInfo<'_>,
    dust: U256,
    rewards_for_blocks: U256,
) -> Result<()> {
    let distributed = records
        .values()
        .flatten()
        .fold(U256::zero(), |acc, record| acc + record.full_reward);

    if distributed + dust != rewards_for_blocks {
        return Err(RewardsError::ValueNotConserved {
            distributed: distributed + dust,
            expected: rewards_for_blocks,
        });
    }
    Ok(())
}

/// Invariant: a node that neither led nor validated a block has no power.
pub fn invariant_offline_nodes_powerless(records: &NodesRewardInfo<'_>) -> Result<()> {
    let offending = records
        .values()
        .flatten()
        .find(|record| record.validator.is_offline() && !record.power_in_shard.is_zero());

    match offending {
        Some(record) => Err(RewardsError::InconsistentStatistics {
            reason: format!(
                "offline node {} has power {}",
                hex::encode(&record.validator.public_key[..8]),
                record.power_in_shard
            ),
        }),
        None => Ok(()),
    }
}

/// Invariant: the created transactions carry exactly the value owed.
///
/// `sum(tx values) == sum(fees) + rewards_for_blocks + protocol_sustainability`.
pub fn invariant_value_conserved(distributed: U256, expected: U256) -> Result<()> {
    if distributed != expected {
        return Err(RewardsError::ValueNotConserved {
            distributed,
            expected,
        });
    }
    Ok(())
}
