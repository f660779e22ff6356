//! Cache Policy Module
//!
//! The two domain hooks the cache needs: how to rank a value and how to merge
//! an incoming write into a stored value.

use std::marker::PhantomData;

// == Cache Policy ==
/// Strategy injected into [`RankedCache`](crate::cache::RankedCache).
///
/// The cache knows nothing about `V` beyond this contract. Both hooks run
/// while the cache holds its LRU lock and must not panic. `rank` must be
/// deterministic: an evicted value is ranked again to find its slot.
///
/// A panicking `merge` or `rank` on an update leaves the stored value and its
/// ranked slot as they were before the write.
pub trait CachePolicy<V>: Send + Sync {
    /// Immutable snapshot of whatever orders values in the ranking index.
    type Rank: Ord + Clone + Send;

    /// Extracts the rank of `value`.
    fn rank(&self, value: &V) -> Self::Rank;

    /// Merges `incoming` into `current` in place.
    ///
    /// Called when a key that is already cached is written again.
    fn merge(&self, current: &mut V, incoming: V);
}

// == Fn Policy ==
/// A policy built from a rank closure and a merge closure.
///
/// ```ignore
/// let policy = FnPolicy::new(|v: &Item| v.score, |cur: &mut Item, new: Item| *cur = new);
/// ```
pub struct FnPolicy<V, RF, MF> {
    rank: RF,
    merge: MF,
    _value: PhantomData<fn(V)>,
}

impl<V, R, RF, MF> FnPolicy<V, RF, MF>
where
    R: Ord + Clone + Send,
    RF: Fn(&V) -> R + Send + Sync,
    MF: Fn(&mut V, V) + Send + Sync,
{
    pub fn new(rank: RF, merge: MF) -> Self {
        Self {
            rank,
            merge,
            _value: PhantomData,
        }
    }
}

impl<V, R, RF, MF> CachePolicy<V> for FnPolicy<V, RF, MF>
where
    R: Ord + Clone + Send,
    RF: Fn(&V) -> R + Send + Sync,
    MF: Fn(&mut V, V) + Send + Sync,
{
    type Rank = R;

    fn rank(&self, value: &V) -> R {
        (self.rank)(value)
    }

    fn merge(&self, current: &mut V, incoming: V) {
        (self.merge)(current, incoming)
    }
}

// == By Value ==
/// Ranks a value by its own ordering and merges by overwriting.
#[derive(Debug, Clone, Copy, Default)]
pub struct ByValue;

impl<V> CachePolicy<V> for ByValue
where
    V: Ord + Clone + Send,
{
    type Rank = V;

    fn rank(&self, value: &V) -> V {
        value.clone()
    }

    fn merge(&self, current: &mut V, incoming: V) {
        *current = incoming;
    }
}
