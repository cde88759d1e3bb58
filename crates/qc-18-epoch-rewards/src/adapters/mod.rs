//! # Adapters
//!
//! In-memory implementations of the outbound ports.

pub mod economics;
pub mod shard_coordinator;
pub mod tx_storage;

pub use economics::EpochEconomicsStatistics;
pub use shard_coordinator::{is_coordinator_smart_contract, is_smart_contract_address, MultiShardCoordinator};
pub use tx_storage::InMemoryRewardsTxStorage;
