//! # Reward Miniblock Layout
//!
//! One slot per normal shard plus a final slot for the coordinator shard.

use shared_types::{MiniBlock, MiniBlockType, ShardId, COORDINATOR_SHARD_ID};

/// Empty reward miniblocks, slot `i` for shard `i` and the last slot for
/// the coordinator shard.
pub fn initialize_rewards_miniblocks(number_of_shards: u32) -> Vec<MiniBlock> {
    (0..number_of_shards)
        .chain(std::iter::once(COORDINATOR_SHARD_ID))
        .map(|receiver| MiniBlock::new(COORDINATOR_SHARD_ID, receiver, MiniBlockType::Rewards))
        .collect()
}

/// Slot of `shard_id` in a layout built for `number_of_shards`.
///
/// Returns `None` for a shard that has no slot.
pub fn miniblock_slot(shard_id: ShardId, number_of_shards: u32) -> Option<usize> {
    if shard_id == COORDINATOR_SHARD_ID {
        return Some(number_of_shards as usize);
    }
    if shard_id < number_of_shards {
        return Some(shard_id as usize);
    }
    None
}

/// Sort every slot's transaction hashes and drop empty slots.
pub fn finalize_miniblocks(miniblocks: Vec<MiniBlock>) -> Vec<MiniBlock> {
    miniblocks
        .into_iter()
        .filter(|miniblock| !miniblock.is_empty())
        .map(|mut miniblock| {
            miniblock.tx_hashes.sort_unstable();
            miniblock
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_layout() {
        let miniblocks = initialize_rewards_miniblocks(3);
        assert_eq!(miniblocks.len(), 4);
        for (i, miniblock) in miniblocks.iter().take(3).enumerate() {
            assert_eq!(miniblock.receiver_shard_id, i as u32);
        }
        assert_eq!(miniblocks[3].receiver_shard_id, COORDINATOR_SHARD_ID);
        assert!(miniblocks.iter().all(|mb| {
            mb.sender_shard_id == COORDINATOR_SHARD_ID && mb.block_type == MiniBlockType::Rewards && mb.is_empty()
        }));
    }

    #[test]
    fn test_slot_lookup() {
        assert_eq!(miniblock_slot(0, 2), Some(0));
        assert_eq!(miniblock_slot(1, 2), Some(1));
        assert_eq!(miniblock_slot(COORDINATOR_SHARD_ID, 2), Some(2));
        assert_eq!(miniblock_slot(2, 2), None);
    }

    #[test]
    fn test_finalize_sorts_and_drops_empty() {
        let mut miniblocks = initialize_rewards_miniblocks(2);
        miniblocks[1].tx_hashes = vec![[3u8; 32], [1u8; 32], [2u8; 32]];
        miniblocks[2].tx_hashes = vec![[9u8; 32]];

        let finalized = finalize_miniblocks(miniblocks);
        assert_eq!(finalized.len(), 2);
        assert_eq!(finalized[0].receiver_shard_id, 1);
        assert_eq!(finalized[0].tx_hashes, vec![[1u8; 32], [2u8; 32], [3u8; 32]]);
        assert_eq!(finalized[1].receiver_shard_id, COORDINATOR_SHARD_ID);
    }
}
