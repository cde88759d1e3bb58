//! # Domain Value Objects
//!
//! Small immutable values shared by the engine stages.

use serde::{Deserialize, Serialize};

/// Whether a run builds a new epoch-start block or checks a received one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RewardsMode {
    /// Building the epoch-start block as proposer.
    #[default]
    Create,
    /// Re-deriving the reward miniblocks of a candidate block.
    Verify,
}

impl RewardsMode {
    /// Label used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Verify => "verify",
        }
    }
}

/// Totals of one completed run.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RewardsRunSummary {
    /// Mode the run executed in.
    pub mode: RewardsMode,
    /// Epoch of the block the run was for.
    pub epoch: u32,
    /// Reward transactions created, protocol transaction included.
    pub tx_count: usize,
    /// Non-empty miniblocks produced.
    pub miniblock_count: usize,
}
