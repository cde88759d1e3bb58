//! # Core Domain Entities
//!
//! Block-level entities shared between the epoch-start pipeline, block
//! assembly and the block-verification pipeline.
//!
//! ## Clusters
//!
//! - **Identity**: `Hash`, `Address`, `BlsPublicKey`, `ShardId`
//! - **Validator statistics**: `ValidatorInfo`, `ValidatorList`
//! - **Epoch start**: `EpochStartBlock`, `EpochEconomics`
//! - **Miniblocks**: `MiniBlock`, `MiniBlockHeader`, `MiniBlockType`,
//!   `RewardTransaction`

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

// =============================================================================
// CLUSTER A: IDENTITY
// =============================================================================

/// A 32-byte hash (Keccak-256).
pub type Hash = [u8; 32];

/// A 32-byte account address.
pub type Address = [u8; 32];

/// A 96-byte BLS public key identifying a validator node.
pub type BlsPublicKey = [u8; 96];

/// Shard identifier.
pub type ShardId = u32;

/// Shard that produces epoch-start blocks and coordinates the normal shards.
///
/// Sorts after every normal shard in ordered maps.
pub const COORDINATOR_SHARD_ID: ShardId = u32::MAX;

// =============================================================================
// CLUSTER B: VALIDATOR STATISTICS
// =============================================================================

/// Membership list a validator belongs to for the epoch being closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ValidatorList {
    /// Entitled to participate in consensus and receive rewards.
    #[default]
    Eligible,
    /// Queued for a future epoch.
    Waiting,
    /// Newly registered, not yet shuffled in.
    New,
    /// Removed for misbehaviour or low rating.
    Jailed,
    /// Unstaking, leaving at the end of the epoch.
    Leaving,
    /// Not participating.
    Inactive,
}

/// Per-epoch performance snapshot of one validator.
///
/// Produced by the performance-tracking subsystem; read-only for every
/// consumer.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    /// BLS public key of the node.
    #[serde_as(as = "Bytes")]
    pub public_key: BlsPublicKey,
    /// Shard the node validated in during the epoch.
    pub shard_id: ShardId,
    /// Address receiving the node's rewards.
    pub reward_address: Address,
    /// Blocks successfully proposed as leader.
    pub leader_success: u32,
    /// Blocks successfully signed as consensus member.
    pub validator_success: u32,
    /// Times the node was part of a consensus group that produced a block.
    pub num_selected_in_success_blocks: u32,
    /// Transaction fees owed to this node for the epoch.
    pub accumulated_fees: U256,
    /// Membership list.
    pub list: ValidatorList,
}

impl ValidatorInfo {
    /// True when the node is in the eligible list.
    pub fn is_eligible(&self) -> bool {
        self.list == ValidatorList::Eligible
    }

    /// True when the node neither led nor validated a single block.
    pub fn is_offline(&self) -> bool {
        self.leader_success == 0 && self.validator_success == 0
    }
}

// =============================================================================
// CLUSTER C: EPOCH START
// =============================================================================

/// Economics snapshot recorded in an epoch-start block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EpochEconomics {
    /// Total supply after the epoch.
    pub total_supply: U256,
    /// Total value to distribute at the end of the epoch.
    pub total_to_distribute: U256,
    /// Value minted during the epoch.
    pub total_newly_minted: U256,
    /// Reward per produced block.
    pub rewards_per_block: U256,
    /// Value allocated to the protocol sustainability address.
    pub rewards_for_protocol_sustainability: U256,
    /// Price of a validator slot.
    pub node_price: U256,
    /// Round of the previous epoch-start block.
    pub prev_epoch_start_round: u64,
}

/// Epoch-start block produced by the coordinator shard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EpochStartBlock {
    /// Block nonce.
    pub nonce: u64,
    /// Consensus round the block was proposed in.
    pub round: u64,
    /// Epoch that starts with this block.
    pub epoch: u32,
    /// Agreed economics for the closed epoch.
    pub economics: EpochEconomics,
    /// Headers of every miniblock included in the block.
    pub miniblock_headers: Vec<MiniBlockHeader>,
}

// =============================================================================
// CLUSTER D: MINIBLOCKS
// =============================================================================

/// Kind of transactions carried by a miniblock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MiniBlockType {
    /// Regular user transactions.
    #[default]
    Transactions,
    /// Smart contract results.
    SmartContractResults,
    /// Protocol reward transactions.
    Rewards,
    /// Validator statistics updates.
    PeerState,
}

impl MiniBlockType {
    /// Stable one-byte tag used in canonical encodings.
    pub fn as_byte(&self) -> u8 {
        match self {
            Self::Transactions => 0,
            Self::SmartContractResults => 1,
            Self::Rewards => 2,
            Self::PeerState => 3,
        }
    }
}

/// Destination-shard-scoped batch of transaction references.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MiniBlock {
    /// Shard that created the miniblock.
    pub sender_shard_id: ShardId,
    /// Shard that executes the miniblock.
    pub receiver_shard_id: ShardId,
    /// Kind of transactions referenced.
    pub block_type: MiniBlockType,
    /// Ordered transaction hashes.
    pub tx_hashes: Vec<Hash>,
}

impl MiniBlock {
    /// Create an empty miniblock.
    pub fn new(sender_shard_id: ShardId, receiver_shard_id: ShardId, block_type: MiniBlockType) -> Self {
        Self {
            sender_shard_id,
            receiver_shard_id,
            block_type,
            tx_hashes: Vec::new(),
        }
    }

    /// True when no transaction is referenced.
    pub fn is_empty(&self) -> bool {
        self.tx_hashes.is_empty()
    }
}

/// Header recorded in a block for each included miniblock.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MiniBlockHeader {
    /// Hash of the miniblock.
    pub hash: Hash,
    /// Shard that created the miniblock.
    pub sender_shard_id: ShardId,
    /// Shard that executes the miniblock.
    pub receiver_shard_id: ShardId,
    /// Number of referenced transactions.
    pub tx_count: u32,
    /// Kind of transactions referenced.
    pub block_type: MiniBlockType,
}

/// Protocol reward transfer created at epoch start.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RewardTransaction {
    /// Round of the epoch-start block creating the reward.
    pub round: u64,
    /// Epoch of the epoch-start block creating the reward.
    pub epoch: u32,
    /// Transferred value.
    pub value: U256,
    /// Receiving address.
    pub receiver: Address,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_validator(leader_success: u32, validator_success: u32) -> ValidatorInfo {
        ValidatorInfo {
            public_key: [7u8; 96],
            shard_id: 0,
            reward_address: [1u8; 32],
            leader_success,
            validator_success,
            num_selected_in_success_blocks: 10,
            accumulated_fees: U256::from(100),
            list: ValidatorList::Eligible,
        }
    }

    #[test]
    fn test_coordinator_sorts_last() {
        let mut shards = vec![COORDINATOR_SHARD_ID, 1, 0];
        shards.sort();
        assert_eq!(shards, vec![0, 1, COORDINATOR_SHARD_ID]);
    }

    #[test]
    fn test_validator_offline() {
        assert!(make_validator(0, 0).is_offline());
        assert!(!make_validator(1, 0).is_offline());
        assert!(!make_validator(0, 1).is_offline());
    }

    #[test]
    fn test_validator_eligible() {
        let mut info = make_validator(1, 1);
        assert!(info.is_eligible());
        info.list = ValidatorList::Waiting;
        assert!(!info.is_eligible());
    }

    #[test]
    fn test_miniblock_new_is_empty() {
        let mb = MiniBlock::new(COORDINATOR_SHARD_ID, 0, MiniBlockType::Rewards);
        assert!(mb.is_empty());
        assert_eq!(mb.block_type, MiniBlockType::Rewards);
    }

    #[test]
    fn test_miniblock_type_tags_distinct() {
        let tags = [
            MiniBlockType::Transactions.as_byte(),
            MiniBlockType::SmartContractResults.as_byte(),
            MiniBlockType::Rewards.as_byte(),
            MiniBlockType::PeerState.as_byte(),
        ];
        for (i, a) in tags.iter().enumerate() {
            for b in tags.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_validator_info_serde_roundtrip() {
        let info = make_validator(3, 4);
        let json = serde_json::to_string(&info).unwrap();
        let back: ValidatorInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(info, back);
    }
}
