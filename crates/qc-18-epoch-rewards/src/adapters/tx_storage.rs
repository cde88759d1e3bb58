//! # In-Memory Reward Transaction Storage

use crate::error::Result;
use crate::ports::RewardsTxStorage;
use parking_lot::RwLock;
use shared_types::{Hash, RewardTransaction};
use std::collections::HashMap;

/// Reward transactions keyed by hash.
#[derive(Default)]
pub struct InMemoryRewardsTxStorage {
    txs: RwLock<HashMap<Hash, RewardTransaction>>,
}

impl InMemoryRewardsTxStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored transactions.
    pub fn len(&self) -> usize {
        self.txs.read().len()
    }

    /// True when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.txs.read().is_empty()
    }

    /// True when `hash` is stored.
    pub fn contains(&self, hash: &Hash) -> bool {
        self.txs.read().contains_key(hash)
    }
}

impl RewardsTxStorage for InMemoryRewardsTxStorage {
    fn put(&self, hash: Hash, tx: &RewardTransaction) -> Result<()> {
        self.txs.write().insert(hash, tx.clone());
        Ok(())
    }

    fn remove(&self, hash: &Hash) -> Result<()> {
        self.txs.write().remove(hash);
        Ok(())
    }

    fn get(&self, hash: &Hash) -> Result<Option<RewardTransaction>> {
        Ok(self.txs.read().get(hash).cloned())
    }
}
