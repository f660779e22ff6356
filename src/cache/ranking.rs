//! Ranking Index Module
//!
//! A bounded, rank-ordered view mapping rank snapshots back to cache keys.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{CacheError, Result};

// == Upsert Outcome ==
/// What a [`RankingIndex::upsert`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ranked<K> {
    /// An equal rank was already tracked; its key was replaced by the new one
    Replaced(K),
    /// Spare capacity was available
    Inserted,
    /// The index was full and the lowest-ranked key was pushed out
    Displaced(K),
    /// The index was full and the rank was below the current minimum
    Rejected,
}

impl<K> Ranked<K> {
    /// Returns true if the upserted key is now tracked.
    pub fn is_tracked(&self) -> bool {
        !matches!(self, Ranked::Rejected)
    }
}

// == Ranking Index ==
/// Holds at most `capacity` (rank, key) pairs in rank order.
///
/// The rank is the sort and lookup key: two keys with equal ranks cannot both
/// be tracked, the later upsert takes the slot.
#[derive(Debug)]
pub struct RankingIndex<R, K> {
    /// Rank -> key, lowest rank first
    entries: BTreeMap<R, K>,
    capacity: usize,
}

impl<R, K> RankingIndex<R, K>
where
    R: Ord + Clone,
    K: Clone + PartialEq,
{
    // == Constructor ==
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity: capacity.max(1),
        }
    }

    // == Upsert ==
    /// Tracks `key` under `rank` if it belongs in the top `capacity`.
    ///
    /// 1. An equal rank already tracked keeps its slot and takes the new key.
    /// 2. With spare capacity the pair is inserted.
    /// 3. Otherwise the pair replaces the minimum when `rank >= min`, and is
    ///    dropped when it ranks lower.
    pub fn upsert(&mut self, rank: R, key: K) -> Ranked<K> {
        if let Some(slot) = self.entries.get_mut(&rank) {
            let previous = std::mem::replace(slot, key);
            return Ranked::Replaced(previous);
        }

        if self.entries.len() < self.capacity {
            self.entries.insert(rank, key);
            return Ranked::Inserted;
        }

        if let Some((min, _)) = self.entries.first_key_value() {
            if rank < *min {
                return Ranked::Rejected;
            }
        }

        let displaced = self.entries.pop_first();
        self.entries.insert(rank, key);
        match displaced {
            Some((_, displaced)) => {
                debug!("Ranking index full, displaced lowest-ranked entry");
                Ranked::Displaced(displaced)
            }
            None => Ranked::Inserted,
        }
    }

    // == Remove ==
    /// Removes the entry tracked under `rank`, if any.
    pub fn remove(&mut self, rank: &R) -> Option<K> {
        self.entries.remove(rank)
    }

    /// Removes the entry under `rank` only if it still belongs to `key`.
    pub fn remove_if(&mut self, rank: &R, key: &K) -> bool {
        match self.entries.get(rank) {
            Some(tracked) if tracked == key => {
                self.entries.remove(rank);
                true
            }
            _ => false,
        }
    }

    // == Top N ==
    /// Returns the `n` highest-ranked keys, highest first.
    ///
    /// Fails with [`CacheError::InvalidArgument`] when `n` exceeds the
    /// index capacity. Fewer than `n` keys are returned while the index is
    /// still filling up.
    pub fn top_n(&self, n: usize) -> Result<Vec<K>> {
        if n > self.capacity {
            return Err(CacheError::InvalidArgument(format!(
                "Requested {} ranked entries but the ranking capacity is {}",
                n, self.capacity
            )));
        }
        Ok(self.entries.values().rev().take(n).cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
