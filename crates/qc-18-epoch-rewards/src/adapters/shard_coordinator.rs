//! # Multi-Shard Coordinator
//!
//! Routes addresses to shards using the trailing address bits. System smart
//! contract addresses that live on the coordinator shard are recognised by
//! their zero prefix.

use crate::ports::AddressRouter;
use shared_types::{Address, ShardId, COORDINATOR_SHARD_ID};

/// Leading zero bytes marking a system smart contract address.
pub const SC_ADDRESS_PREFIX_LEN: usize = 8;

/// Bytes after the VM type marker that are zero for coordinator shard contracts.
const COORDINATOR_SC_RANGE: std::ops::Range<usize> = 10..16;

/// Mask-based address router.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiShardCoordinator {
    number_of_shards: u32,
    mask_high: u32,
    mask_low: u32,
}

impl MultiShardCoordinator {
    /// Create a router for `number_of_shards` normal shards (at least one).
    pub fn new(number_of_shards: u32) -> Self {
        let number_of_shards = number_of_shards.max(1);
        let (mask_high, mask_low) = compute_masks(number_of_shards);
        Self {
            number_of_shards,
            mask_high,
            mask_low,
        }
    }

    fn bytes_needed(&self) -> usize {
        (self.number_of_shards / 256) as usize + 1
    }
}

/// Masks covering `ceil(log2(n))` and one fewer bits.
fn compute_masks(number_of_shards: u32) -> (u32, u32) {
    if number_of_shards <= 1 {
        return (0, 0);
    }
    let bits = 32 - (number_of_shards - 1).leading_zeros();
    let mask_high = ((1u64 << bits) - 1) as u32;
    let mask_low = ((1u64 << (bits - 1)) - 1) as u32;
    (mask_high, mask_low)
}

/// True for a system smart contract address.
pub fn is_smart_contract_address(address: &Address) -> bool {
    address[..SC_ADDRESS_PREFIX_LEN].iter().all(|b| *b == 0)
}

/// True for a system smart contract address owned by the coordinator shard.
pub fn is_coordinator_smart_contract(address: &Address) -> bool {
    if !is_smart_contract_address(address) {
        return false;
    }
    address[COORDINATOR_SC_RANGE].iter().all(|b| *b == 0) || address[address.len() - 1] == 0xFF
}

impl AddressRouter for MultiShardCoordinator {
    fn shard_of(&self, address: &Address) -> ShardId {
        if is_coordinator_smart_contract(address) {
            return COORDINATOR_SHARD_ID;
        }

        let start = address.len().saturating_sub(self.bytes_needed());
        let suffix = address[start..]
            .iter()
            .fold(0u32, |acc, b| acc.wrapping_shl(8).wrapping_add(u32::from(*b)));

        let shard = suffix & self.mask_high;
        if shard > self.number_of_shards - 1 {
            return suffix & self.mask_low;
        }
        shard
    }

    fn number_of_shards(&self) -> u32 {
        self.number_of_shards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address_ending_in(last: u8) -> Address {
        let mut address = [0x11u8; 32];
        address[31] = last;
        address
    }

    fn coordinator_address() -> Address {
        let mut address = [0u8; 32];
        address[9] = 1;
        address[30] = 255;
        address[31] = 255;
        address
    }

    #[test]
    fn test_masks() {
        assert_eq!(compute_masks(1), (0, 0));
        assert_eq!(compute_masks(2), (1, 0));
        assert_eq!(compute_masks(3), (3, 1));
        assert_eq!(compute_masks(4), (3, 1));
        assert_eq!(compute_masks(5), (7, 3));
    }

    #[test]
    fn test_two_shards_by_parity() {
        let router = MultiShardCoordinator::new(2);
        assert_eq!(router.shard_of(&address_ending_in(0)), 0);
        assert_eq!(router.shard_of(&address_ending_in(1)), 1);
        assert_eq!(router.shard_of(&address_ending_in(6)), 0);
    }

    #[test]
    fn test_three_shards_fold_overflow() {
        let router = MultiShardCoordinator::new(3);
        assert_eq!(router.shard_of(&address_ending_in(2)), 2);
        // 3 & 0b11 = 3 is not a shard, 3 & 0b1 = 1
        assert_eq!(router.shard_of(&address_ending_in(3)), 1);
    }

    #[test]
    fn test_single_shard() {
        let router = MultiShardCoordinator::new(1);
        assert_eq!(router.shard_of(&address_ending_in(0xAB)), 0);
        assert_eq!(MultiShardCoordinator::new(0).number_of_shards(), 1);
    }

    #[test]
    fn test_coordinator_contract() {
        let router = MultiShardCoordinator::new(2);
        assert!(is_smart_contract_address(&coordinator_address()));
        assert_eq!(router.shard_of(&coordinator_address()), COORDINATOR_SHARD_ID);
    }

    #[test]
    fn test_shard_contract_stays_in_shard() {
        let router = MultiShardCoordinator::new(2);
        let mut address = [0u8; 32];
        address[9] = 5;
        address[12] = 7;
        address[31] = 1;
        assert!(is_smart_contract_address(&address));
        assert!(!is_coordinator_smart_contract(&address));
        assert_eq!(router.shard_of(&address), 1);
    }
}
