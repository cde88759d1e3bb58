//! Configuration types for epoch rewards

use crate::error::{Result, RewardsError};
use primitive_types::U256;
use serde::Deserialize;
use shared_types::Address;

/// Default share of block rewards that can be distributed by top-up stake
pub const DEFAULT_TOP_UP_REWARD_FACTOR: f64 = 0.25;

/// Default stake level (3 million tokens with 18 decimals) at which the
/// top-up curve reaches half of its limit
pub fn default_top_up_gradient_point() -> U256 {
    U256::from(3_000_000u64) * U256::exp10(18)
}

/// Runtime configuration for the epoch rewards engine
#[derive(Clone, Debug, Deserialize)]
pub struct RewardsConfig {
    /// Share of block rewards reserved for stake-weighted rewards, in [0, 1]
    pub top_up_reward_factor: f64,

    /// Top-up stake at which the curve reaches half of its limit (hex in JSON)
    pub top_up_gradient_point: U256,

    /// Receiver of the protocol sustainability transaction (hex in JSON)
    #[serde(with = "hex")]
    pub protocol_sustainability_address: Address,

    /// First epoch whose rewards may be addressed to coordinator shard accounts
    pub delegation_enable_epoch: u32,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            top_up_reward_factor: DEFAULT_TOP_UP_REWARD_FACTOR,
            top_up_gradient_point: default_top_up_gradient_point(),
            protocol_sustainability_address: [0x1d; 32],
            delegation_enable_epoch: 1,
        }
    }
}

impl RewardsConfig {
    /// Create config for testing (delegation to the coordinator shard never enabled).
    pub fn for_testing() -> Self {
        Self {
            delegation_enable_epoch: u32::MAX,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| RewardsError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the numeric parameters.
    pub fn validate(&self) -> Result<()> {
        let factor = self.top_up_reward_factor;
        if factor.is_nan() || !(0.0..=1.0).contains(&factor) {
            return Err(RewardsError::InvalidTopUpRewardFactor(factor));
        }
        if self.top_up_gradient_point.is_zero() {
            return Err(RewardsError::InvalidTopUpGradientPoint);
        }
        Ok(())
    }

    /// Check whether coordinator shard reward addresses are allowed in `epoch`.
    pub fn is_delegation_enabled(&self, epoch: u32) -> bool {
        epoch >= self.delegation_enable_epoch
    }
}
