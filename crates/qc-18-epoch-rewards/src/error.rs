//! Error types for the epoch rewards subsystem

use shared_types::{ShardId, U256};
use thiserror::Error;

/// Result type alias for epoch rewards operations
pub type Result<T> = std::result::Result<T, RewardsError>;

/// Errors that can occur while creating or verifying reward miniblocks
#[derive(Debug, Error)]
pub enum RewardsError {
    /// Top-up reward factor outside [0, 1]
    #[error("Invalid top-up reward factor: {0}, must be within [0, 1]")]
    InvalidTopUpRewardFactor(f64),

    /// Top-up gradient point must be strictly positive
    #[error("Invalid top-up gradient point: must be greater than zero")]
    InvalidTopUpGradientPoint,

    /// Protocol sustainability rewards cannot be sent to the coordinator shard
    #[error("Protocol sustainability address routes to the coordinator shard")]
    ProtocolSustainabilityAddressInCoordinatorShard,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Staking data provider has no top-up for a key
    #[error("Staked top-up not found for key {key}")]
    StakeNotFound {
        /// Hex-encoded key prefix
        key: String,
    },

    /// Staking data could not be prepared for the epoch
    #[error("Staking data preparation failed: {0}")]
    StakingDataPreparation(String),

    /// Validator statistics would distribute more than the available pool
    #[error("Inconsistent statistics: {reason}")]
    InconsistentStatistics {
        /// Reason for inconsistency
        reason: String,
    },

    /// Created miniblocks do not carry the expected total value
    #[error("Value not conserved: distributed {distributed}, expected {expected}")]
    ValueNotConserved {
        /// Sum of all created transaction values
        distributed: U256,
        /// Fees + rewards for blocks + protocol sustainability
        expected: U256,
    },

    /// Recomputed reward miniblock differs from the recorded header
    #[error("Reward miniblock hash does not match for receiver shard {receiver_shard_id}")]
    RewardMiniBlockHashMismatch {
        /// Receiver shard of the mismatching miniblock
        receiver_shard_id: ShardId,
    },

    /// Number of recomputed reward miniblocks differs from the block
    #[error("Reward miniblocks count does not match: created {created}, received {received}")]
    RewardMiniBlocksCountMismatch {
        /// Miniblocks produced locally
        created: usize,
        /// Reward miniblock headers in the candidate block
        received: usize,
    },

    /// Reward transaction missing from the local cache
    #[error("Reward transaction not found: {0}")]
    TransactionNotFound(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RewardsError {
    /// Check if error was raised while constructing the engine
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTopUpRewardFactor(_)
                | Self::InvalidTopUpGradientPoint
                | Self::ProtocolSustainabilityAddressInCoordinatorShard
                | Self::InvalidConfig(_)
        )
    }

    /// Check if error means the candidate epoch-start block must be rejected
    pub fn is_block_rejection(&self) -> bool {
        matches!(
            self,
            Self::RewardMiniBlockHashMismatch { .. } | Self::RewardMiniBlocksCountMismatch { .. }
        )
    }
}
