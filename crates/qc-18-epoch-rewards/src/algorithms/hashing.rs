//! Hashing utilities for reward transactions and miniblocks
//!
//! Canonical encodings are fixed-width and field-ordered so that every node
//! derives the same hash from the same values.

use sha3::{Digest, Keccak256};
use shared_types::{Hash, MiniBlock, MiniBlockHeader, RewardTransaction};

/// Compute Keccak-256 hash of data
#[inline]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Serialize a reward transaction for hashing
///
/// `round (8 LE) | epoch (4 LE) | value (32 BE) | receiver (32)`
pub fn serialize_reward_transaction(tx: &RewardTransaction) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(76);

    bytes.extend_from_slice(&tx.round.to_le_bytes());
    bytes.extend_from_slice(&tx.epoch.to_le_bytes());
    let mut value = [0u8; 32];
    tx.value.to_big_endian(&mut value);
    bytes.extend_from_slice(&value);
    bytes.extend_from_slice(&tx.receiver);

    bytes
}

/// Hash of a reward transaction
pub fn reward_transaction_hash(tx: &RewardTransaction) -> Hash {
    keccak256(&serialize_reward_transaction(tx))
}

/// Serialize a miniblock for hashing
///
/// `sender (4 LE) | receiver (4 LE) | type (1) | count (4 LE) | hashes`
pub fn serialize_miniblock(miniblock: &MiniBlock) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(13 + miniblock.tx_hashes.len() * 32);

    bytes.extend_from_slice(&miniblock.sender_shard_id.to_le_bytes());
    bytes.extend_from_slice(&miniblock.receiver_shard_id.to_le_bytes());
    bytes.push(miniblock.block_type.as_byte());
    bytes.extend_from_slice(&(miniblock.tx_hashes.len() as u32).to_le_bytes());
    for tx_hash in &miniblock.tx_hashes {
        bytes.extend_from_slice(tx_hash);
    }

    bytes
}

/// Hash of a miniblock
pub fn miniblock_hash(miniblock: &MiniBlock) -> Hash {
    keccak256(&serialize_miniblock(miniblock))
}

/// Header recording a miniblock in a block
pub fn miniblock_header(miniblock: &MiniBlock) -> MiniBlockHeader {
    MiniBlockHeader {
        hash: miniblock_hash(miniblock),
        sender_shard_id: miniblock.sender_shard_id,
        receiver_shard_id: miniblock.receiver_shard_id,
        tx_count: miniblock.tx_hashes.len() as u32,
        block_type: miniblock.block_type,
    }
}
