//! Metrics collection for the epoch rewards subsystem

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for epoch rewards
#[derive(Debug, Default)]
pub struct Metrics {
    /// Reward miniblock sets created as proposer
    pub runs_created: AtomicU64,

    /// Candidate blocks whose reward miniblocks matched
    pub runs_verified: AtomicU64,

    /// Candidate blocks rejected by verification
    pub verification_failures: AtomicU64,

    /// Reward transactions created, protocol transaction included
    pub reward_txs_created: AtomicU64,

    /// Runs aborted before producing miniblocks
    pub runs_aborted: AtomicU64,
}

impl Metrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed create run
    pub fn record_created(&self, tx_count: usize) {
        self.runs_created.fetch_add(1, Ordering::Relaxed);
        self.reward_txs_created
            .fetch_add(tx_count as u64, Ordering::Relaxed);
    }

    /// Record a successful verification
    pub fn record_verified(&self) {
        self.runs_verified.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected candidate block
    pub fn record_verification_failure(&self) {
        self.verification_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a run that failed before producing miniblocks
    pub fn record_aborted(&self) {
        self.runs_aborted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get create runs
    pub fn get_runs_created(&self) -> u64 {
        self.runs_created.load(Ordering::Relaxed)
    }

    /// Get successful verifications
    pub fn get_runs_verified(&self) -> u64 {
        self.runs_verified.load(Ordering::Relaxed)
    }

    /// Get rejected candidate blocks
    pub fn get_verification_failures(&self) -> u64 {
        self.verification_failures.load(Ordering::Relaxed)
    }

    /// Get aborted runs
    pub fn get_runs_aborted(&self) -> u64 {
        self.runs_aborted.load(Ordering::Relaxed)
    }

    /// Get average reward transactions per create run
    pub fn get_avg_txs_per_run(&self) -> f64 {
        let runs = self.runs_created.load(Ordering::Relaxed);
        if runs == 0 {
            return 0.0;
        }
        let txs = self.reward_txs_created.load(Ordering::Relaxed);
        txs as f64 / runs as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_recording() {
        let metrics = Metrics::new();

        metrics.record_created(100);
        metrics.record_created(150);
        metrics.record_verified();
        metrics.record_verification_failure();
        metrics.record_aborted();

        assert_eq!(metrics.get_runs_created(), 2);
        assert_eq!(metrics.get_avg_txs_per_run(), 125.0);
        assert_eq!(metrics.get_runs_verified(), 1);
        assert_eq!(metrics.get_verification_failures(), 1);
        assert_eq!(metrics.get_runs_aborted(), 1);
    }

    #[test]
    fn test_avg_without_runs() {
        assert_eq!(Metrics::new().get_avg_txs_per_run(), 0.0);
    }
}
