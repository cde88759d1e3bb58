//! # Saturating Reward-Split Curve
//!
//! Decides how much of the block rewards is distributed by top-up stake.
//! The amount grows with the total eligible top-up and approaches a limit
//! (a fixed share of the total) without reaching it:
//!
//! ```text
//! top_up_rewards = limit * x / (x + gradient_point)
//! ```
//!
//! The configured factor is turned into an integer ratio once, at
//! construction. Nothing downstream touches floating point.

use super::allocation::mul_div;
use crate::config::RewardsConfig;
use crate::error::{Result, RewardsError};
use primitive_types::U512;
use shared_types::U256;

/// Denominator of the top-up factor ratio (parts per million).
pub const TOP_UP_FACTOR_DENOMINATOR: u64 = 1_000_000;

/// Curve splitting block rewards into base and top-up parts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TopUpRewardCurve {
    factor_ppm: u64,
    gradient_point: U256,
}

impl TopUpRewardCurve {
    /// Build the curve, rejecting a factor outside [0, 1] and a zero
    /// gradient point.
    pub fn new(top_up_reward_factor: f64, gradient_point: U256) -> Result<Self> {
        if top_up_reward_factor.is_nan() || !(0.0..=1.0).contains(&top_up_reward_factor) {
            return Err(RewardsError::InvalidTopUpRewardFactor(top_up_reward_factor));
        }
        if gradient_point.is_zero() {
            return Err(RewardsError::InvalidTopUpGradientPoint);
        }

        // factor is in [0, 1] so the product is in [0, 1e6]
        let factor_ppm = (top_up_reward_factor * TOP_UP_FACTOR_DENOMINATOR as f64).round() as u64;

        Ok(Self {
            factor_ppm,
            gradient_point,
        })
    }

    /// Build the curve from the engine configuration.
    pub fn from_config(config: &RewardsConfig) -> Result<Self> {
        Self::new(config.top_up_reward_factor, config.top_up_gradient_point)
    }

    /// Factor in parts per million.
    pub fn factor_ppm(&self) -> u64 {
        self.factor_ppm
    }

    /// Top-up stake at which the curve reaches half of its limit.
    pub fn gradient_point(&self) -> U256 {
        self.gradient_point
    }

    /// Upper bound of the top-up rewards for `total_rewards`.
    pub fn limit(&self, total_rewards: U256) -> U256 {
        mul_div(
            total_rewards,
            U256::from(self.factor_ppm),
            U256::from(TOP_UP_FACTOR_DENOMINATOR),
        )
    }

    /// Part of `total_rewards` distributed by top-up stake given the total
    /// top-up of the eligible nodes.
    pub fn compute_top_up_rewards(&self, total_rewards: U256, total_eligible_top_up: U256) -> U256 {
        if total_rewards.is_zero() || total_eligible_top_up.is_zero() {
            return U256::zero();
        }

        let limit = self.limit(total_rewards);
        // x + gradient can exceed 256 bits
        let denominator = U512::from(total_eligible_top_up) + U512::from(self.gradient_point);
        let quotient = limit.full_mul(total_eligible_top_up) / denominator;
        U256::try_from(quotient).unwrap_or(limit)
    }
}
