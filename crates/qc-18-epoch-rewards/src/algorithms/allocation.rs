//! # Proportional Allocation
//!
//! Splits a big-integer total across weighted recipients with truncating
//! division and reports the remainder ("dust") explicitly, so that
//! `sum(shares) + dust == total` always holds.

use primitive_types::{U256, U512};
use std::collections::BTreeMap;

/// Compute `value * numerator / denominator`, truncating toward zero.
///
/// The product is formed in 512 bits so it never overflows. Returns zero
/// when `denominator` is zero. Callers keep `numerator <= denominator`,
/// which bounds the result by `value`; a quotient that still exceeds 256
/// bits saturates.
pub fn mul_div(value: U256, numerator: U256, denominator: U256) -> U256 {
    if denominator.is_zero() {
        return U256::zero();
    }

    let quotient = value.full_mul(numerator) / U512::from(denominator);
    U256::try_from(quotient).unwrap_or(U256::MAX)
}

/// Sum of a sequence of amounts.
pub fn sum_amounts<'a, I>(amounts: I) -> U256
where
    I: IntoIterator<Item = &'a U256>,
{
    amounts
        .into_iter()
        .fold(U256::zero(), |acc, value| acc + *value)
}

/// Result of a proportional split.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ProportionalAllocation {
    /// One share per weight, in input order.
    pub shares: Vec<U256>,
    /// `total - sum(shares)`.
    pub dust: U256,
}

impl ProportionalAllocation {
    /// Split `total` proportionally to `weights`.
    ///
    /// When every weight is zero nothing is distributed and the whole total
    /// is dust.
    pub fn split(total: U256, weights: &[U256]) -> Self {
        Self::split_with_total_weight(total, weights, sum_amounts(weights))
    }

    /// Split `total` proportionally to `weights` against a precomputed
    /// `total_weight`.
    ///
    /// A zero `total_weight` distributes nothing. A `total_weight` below the
    /// sum of the weights is raised to that sum, so shares never exceed
    /// `total`.
    pub fn split_with_total_weight(total: U256, weights: &[U256], total_weight: U256) -> Self {
        if total_weight.is_zero() {
            return Self {
                shares: vec![U256::zero(); weights.len()],
                dust: total,
            };
        }
        let total_weight = total_weight.max(sum_amounts(weights));

        let shares: Vec<U256> = weights
            .iter()
            .map(|weight| mul_div(total, *weight, total_weight))
            .collect();
        let distributed = sum_amounts(&shares);

        Self {
            shares,
            dust: total - distributed,
        }
    }

    /// Split `total` across the values of an ordered map.
    pub fn split_map<K: Ord + Copy>(total: U256, weights: &BTreeMap<K, U256>) -> (BTreeMap<K, U256>, U256) {
        Self::split_map_with_total_weight(total, weights, sum_amounts(weights.values()))
    }

    /// [`Self::split_map`] against a precomputed `total_weight`.
    pub fn split_map_with_total_weight<K: Ord + Copy>(
        total: U256,
        weights: &BTreeMap<K, U256>,
        total_weight: U256,
    ) -> (BTreeMap<K, U256>, U256) {
        let ordered: Vec<U256> = weights.values().copied().collect();
        let allocation = Self::split_with_total_weight(total, &ordered, total_weight);
        let shares = weights
            .keys()
            .copied()
            .zip(allocation.shares)
            .collect();
        (shares, allocation.dust)
    }

    /// Amount actually handed out.
    pub fn distributed(&self) -> U256 {
        sum_amounts(&self.shares)
    }
}
