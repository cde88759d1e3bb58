//! # Quantum Chain - Epoch Rewards Engine (Subsystem 18)
//!
//! **Bounded Context:** Epoch-End Rewards Distribution  
//! **Architecture Compliance:** DDD + Hexagonal + TDD
//!
//! ## Purpose
//!
//! At the end of every epoch the coordinator shard turns validator
//! performance and stake into reward transactions, grouped into one
//! miniblock per destination shard. Every validator recomputes the same
//! miniblocks from the same inputs and rejects an epoch-start block whose
//! reward miniblocks differ.
//!
//! ## Reward Model
//!
//! The rewards for produced blocks are split in two parts by a saturating
//! curve over the total eligible top-up stake:
//!
//! - **Base rewards** pay every consensus slot of every produced block the
//!   same amount, whatever the stake.
//! - **Top-up rewards** go first to shards by shard power (top-up times
//!   produced blocks), then to nodes by node power (top-up times blocks
//!   the node helped produce).
//!
//! Every truncating split reports its remainder. Remainders, rewards of
//! offline nodes and rewards of coordinator shard addresses before
//! delegation is enabled all end up in the protocol sustainability
//! transaction.
//!
//! ## Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Adapters (Outer)                                   │
//! │  - EpochEconomicsStatistics, MultiShardCoordinator  │
//! │  - InMemoryRewardsTxStorage                         │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Ports (Middle)                                     │
//! │  - Inbound: EpochRewardsApi                         │
//! │  - Outbound: StakingDataProvider, AddressRouter...  │
//! └─────────────────────────────────────────────────────┘
//!                         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain + Algorithms (Inner - Pure Logic)           │
//! │  - Power model, reward curve, allocation            │
//! │  - Invariants: conservation, offline nodes          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! ## Critical Invariants
//!
//! 1. **Conservation**: sum(tx values) = fees + rewards for blocks + protocol allocation
//! 2. **Determinism**: ordered maps only, integer arithmetic only
//! 3. **Offline Nodes**: no power and no reward transaction
//! 4. **Fresh State**: every run starts from a reset state
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! let mut creator = EpochRewardsCreator::new(RewardsConfig::default(), deps)?;
//! let miniblocks = creator.create_rewards_miniblocks(&block, &validators, &economics)?;
//! creator.save_txs_to_storage(&miniblocks)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// In-memory implementations of the outbound ports
pub mod adapters;
/// Pure numeric and layout functions
pub mod algorithms;
/// Records, engine state and invariants
pub mod domain;
pub mod ports;
pub mod service;

mod config;
mod error;
mod metrics;

pub use config::{default_top_up_gradient_point, RewardsConfig, DEFAULT_TOP_UP_REWARD_FACTOR};
pub use error::{Result, RewardsError};
pub use metrics::Metrics;

pub use adapters::{EpochEconomicsStatistics, InMemoryRewardsTxStorage, MultiShardCoordinator};
pub use algorithms::{ProportionalAllocation, TopUpRewardCurve};
pub use domain::{
    EpochRewardsState, NodeRewardRecord, NodesRewardInfo, RewardAddressAggregation,
    RewardAddressRecord, RewardsMode, RewardsRunSummary, ValidatorsInfoMap,
};
pub use ports::{
    AddressRouter, EconomicsDataProvider, EpochRewardsApi, MockNodesConfig,
    MockRewardsTxStorage, MockStakingDataProvider, NodesConfigProvider, RewardsTxStorage,
    StakingDataProvider,
};
pub use service::{EpochRewardsCreator, EpochRewardsDependencies};

/// Subsystem identifier for IPC communication
pub const SUBSYSTEM_ID: u8 = 18;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
