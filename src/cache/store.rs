//! Ranked Cache Module
//!
//! The cache facade: keeps the LRU index and the ranking index consistent,
//! counts lookups and notifies observers after every write.

use std::hash::Hash;

use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::cache::{
    CachePolicy, CacheStats, Counters, LruIndex, ObserverRegistry, Ranked, RankingIndex,
    SubscriptionId,
};
use crate::error::{CacheError, Result};

// == Put Outcome ==
/// Summary of a single [`RankedCache::put`].
#[derive(Debug, Clone, PartialEq)]
pub struct PutOutcome<K, V> {
    /// The stored value after the write, as delivered to observers
    pub value: V,
    /// True if the key was already cached and the write was merged
    pub merged: bool,
    /// Entry pushed out of the LRU index to make room, if any
    pub evicted: Option<(K, V)>,
    /// True if the key holds a ranked slot after the write
    pub ranked: bool,
    /// Number of observers that panicked during notification
    pub observer_failures: usize,
}

// == Ranked Cache ==
/// Capacity-bounded LRU cache with a top-N view of its values.
///
/// Both indices sit behind their own lock. Writers take the LRU lock first and
/// update the ranking index before releasing it, so a completed write never
/// leaves a ranked key that is missing from the LRU index. `top_n` only takes
/// the ranking lock; `top_values` takes both, in the same order as writers.
pub struct RankedCache<K, V, P>
where
    P: CachePolicy<V>,
{
    primary: Mutex<LruIndex<K, V>>,
    ranking: Mutex<RankingIndex<P::Rank, K>>,
    observers: ObserverRegistry<V>,
    counters: Counters,
    policy: P,
}

impl<K, V, P> RankedCache<K, V, P>
where
    K: Hash + Eq + Clone + std::fmt::Debug,
    V: Clone,
    P: CachePolicy<V>,
{
    // == Constructor ==
    /// Creates a cache holding `capacity` entries and ranking the top
    /// `top_capacity` of them.
    ///
    /// Both capacities must be positive. A `top_capacity` above `capacity` is
    /// accepted but can never fill up.
    pub fn new(capacity: usize, top_capacity: usize, policy: P) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidArgument(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if top_capacity == 0 {
            return Err(CacheError::InvalidArgument(
                "top capacity must be greater than zero".to_string(),
            ));
        }
        if top_capacity > capacity {
            warn!(
                "Top capacity {} exceeds cache capacity {}; the ranking can never fill",
                top_capacity, capacity
            );
        }

        Ok(Self {
            primary: Mutex::new(LruIndex::new(capacity)),
            ranking: Mutex::new(RankingIndex::new(top_capacity)),
            observers: ObserverRegistry::new(),
            counters: Counters::new(),
            policy,
        })
    }

    // == Get ==
    /// Returns a copy of the value for `key`, marking it most recently used.
    ///
    /// A hit bumps the hit counter once; a miss leaves it untouched.
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.primary.lock().get(key).cloned();
        match value {
            Some(_) => self.counters.record_hit(),
            None => self.counters.record_miss(),
        }
        value
    }

    // == Peek ==
    /// Returns a copy of the value without touching recency or counters.
    pub fn peek(&self, key: &K) -> Option<V> {
        self.primary.lock().peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.primary.lock().contains(key)
    }

    // == Put ==
    /// Writes `value` under `key`.
    ///
    /// A new key is inserted, evicting the least recently used entry when the
    /// cache is full. An existing key has `value` merged into its stored value
    /// through the policy. The ranking index drops the evicted entry and the
    /// pre-merge rank, then takes the post-merge rank. Finally every observer
    /// sees the post-merge value, whether or not anything changed.
    pub fn put(&self, key: K, value: V) -> PutOutcome<K, V> {
        let (current, merged, evicted, ranked) = {
            let mut primary = self.primary.lock();

            // Policy hooks run before anything is written back
            let (current, rank, previous_rank, evicted) = match primary.get_mut(&key) {
                Some(stored) => {
                    let previous = self.policy.rank(stored);
                    let mut next = stored.clone();
                    self.policy.merge(&mut next, value);
                    let rank = self.policy.rank(&next);
                    *stored = next.clone();
                    (next, rank, Some(previous), None)
                }
                None => {
                    let rank = self.policy.rank(&value);
                    let evicted = primary.insert(key.clone(), value.clone());
                    (value, rank, None, evicted)
                }
            };
            let merged = previous_rank.is_some();

            let mut ranking = self.ranking.lock();
            if let Some((evicted_key, evicted_value)) = &evicted {
                self.counters.record_eviction();
                let dropped = ranking.remove_if(&self.policy.rank(evicted_value), evicted_key);
                debug!(key = ?evicted_key, ranked = dropped, "Evicted least recently used entry");
            }
            if let Some(previous) = previous_rank {
                ranking.remove_if(&previous, &key);
            }
            let outcome = ranking.upsert(rank, key.clone());
            if let Ranked::Replaced(ref displaced) = outcome {
                if displaced != &key {
                    trace!(key = ?key, previous = ?displaced, "Equal rank took over ranked slot");
                }
            }

            (current, merged, evicted, outcome.is_tracked())
        };

        self.counters.record_put();
        let observer_failures = self.observers.notify(&current);
        self.counters.record_observer_failures(observer_failures);

        PutOutcome {
            value: current,
            merged,
            evicted,
            ranked,
            observer_failures,
        }
    }

    // == Top N ==
    /// Returns the keys of the `n` highest-ranked values, highest first.
    ///
    /// Fails with [`CacheError::InvalidArgument`] if `n` exceeds the top capacity.
    pub fn top_n(&self, n: usize) -> Result<Vec<K>> {
        self.ranking.lock().top_n(n)
    }

    /// Like [`top_n`](Self::top_n), but resolves each key to its current value.
    ///
    /// Keys and values are read under both locks, so the values come out in
    /// rank order even while writers run. Lookups do not count as hits or
    /// touch recency.
    pub fn top_values(&self, n: usize) -> Result<Vec<V>> {
        let primary = self.primary.lock();
        let ranking = self.ranking.lock();
        Ok(ranking
            .top_n(n)?
            .iter()
            .filter_map(|key| primary.peek(key).cloned())
            .collect())
    }

    // == Hits ==
    /// Cumulative number of successful [`get`](Self::get) calls.
    pub fn hits(&self) -> u64 {
        self.counters.hits()
    }

    // == Subscriptions ==
    /// Registers an observer called with the stored value after every write.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&V) + Send + Sync + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let total_entries = self.len();
        let ranked_entries = self.ranked_len();
        self.counters.snapshot(total_entries, ranked_entries)
    }

    pub fn len(&self) -> usize {
        self.primary.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.lock().is_empty()
    }

    pub fn ranked_len(&self) -> usize {
        self.ranking.lock().len()
    }

    pub fn capacity(&self) -> usize {
        self.primary.lock().capacity()
    }

    pub fn top_capacity(&self) -> usize {
        self.ranking.lock().capacity()
    }

    /// Keys from least to most recently used.
    pub fn keys_by_recency(&self) -> Vec<K> {
        self.primary.lock().keys_by_recency().cloned().collect()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ByValue, FnPolicy};
    use parking_lot::Mutex as TestMutex;
    use std::sync::Arc;

    fn numbers(capacity: usize, top: usize) -> RankedCache<u32, u64, ByValue> {
        RankedCache::new(capacity, top, ByValue).unwrap()
    }

    fn filled() -> RankedCache<u32, u64, ByValue> {
        let cache = numbers(4, 3);
        for key in 1..=4u32 {
            cache.put(key, key as u64 * 100);
        }
        cache
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Player {
        name: &'static str,
        score: u32,
    }

    fn players(capacity: usize, top: usize) -> RankedCache<u32, Player, impl CachePolicy<Player>> {
        let policy = FnPolicy::new(
            |p: &Player| p.score,
            |current: &mut Player, incoming: Player| current.score = incoming.score,
        );
        RankedCache::new(capacity, top, policy).unwrap()
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        assert!(matches!(
            RankedCache::<u32, u64, _>::new(0, 1, ByValue),
            Err(CacheError::InvalidArgument(_))
        ));
        assert!(matches!(
            RankedCache::<u32, u64, _>::new(1, 0, ByValue),
            Err(CacheError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_new_accepts_oversized_top_capacity() {
        let cache = numbers(2, 5);
        assert_eq!(cache.capacity(), 2);
        assert_eq!(cache.top_capacity(), 5);
    }

    #[test]
    fn test_get_counts_hits_only() {
        let cache = numbers(4, 3);
        cache.put(1, 100);
        cache.put(2, 200);

        assert_eq!(cache.get(&1), Some(100));
        assert_eq!(cache.get(&2), Some(200));
        assert_eq!(cache.get(&3), None);
        assert_eq!(cache.hits(), 2);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_peek_does_not_count() {
        let cache = filled();

        assert_eq!(cache.peek(&1), Some(100));
        assert!(cache.contains(&2));
        assert_eq!(cache.hits(), 0);
        assert_eq!(cache.keys_by_recency(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_top_n_descending() {
        let cache = filled();

        assert_eq!(cache.top_n(3).unwrap(), vec![4, 3, 2]);
        assert_eq!(cache.top_values(3).unwrap(), vec![400, 300, 200]);
        assert_eq!(cache.top_n(1).unwrap(), vec![4]);
    }

    #[test]
    fn test_top_n_rejects_oversized_request() {
        let cache = filled();
        assert!(matches!(cache.top_n(4), Err(CacheError::InvalidArgument(_))));
        assert!(matches!(
            cache.top_values(4),
            Err(CacheError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_put_evicts_lru_and_reranks() {
        let cache = filled();

        let outcome = cache.put(5, 500);

        assert_eq!(outcome.evicted, Some((1, 100)));
        assert!(!outcome.merged);
        assert!(outcome.ranked);
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.len(), 4);
        assert_eq!(cache.top_values(3).unwrap(), vec![500, 400, 300]);
    }

    #[test]
    fn test_get_changes_eviction_victim() {
        let cache = filled();

        cache.get(&4);
        cache.get(&1);
        cache.get(&2);
        cache.get(&3);
        let outcome = cache.put(5, 500);

        assert_eq!(outcome.evicted, Some((4, 400)));
        assert_eq!(cache.keys_by_recency(), vec![1, 2, 3, 5]);
        // 400 was ranked, so its slot is freed and 200 survives
        assert_eq!(cache.top_n(3).unwrap(), vec![5, 3, 2]);
    }

    #[test]
    fn test_merge_preserves_other_fields() {
        let cache = players(4, 3);
        cache.put(1, Player { name: "ada", score: 10 });

        let outcome = cache.put(1, Player { name: "ignored", score: 50 });

        assert!(outcome.merged);
        assert_eq!(outcome.value, Player { name: "ada", score: 50 });
        assert_eq!(cache.peek(&1), Some(Player { name: "ada", score: 50 }));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_merge_lowering_rank_leaves_no_stale_slot() {
        let cache = players(4, 2);
        cache.put(1, Player { name: "a", score: 90 });
        cache.put(2, Player { name: "b", score: 80 });

        cache.put(1, Player { name: "a", score: 10 });

        assert_eq!(cache.ranked_len(), 2);
        assert_eq!(cache.top_n(2).unwrap(), vec![2, 1]);

        cache.put(3, Player { name: "c", score: 50 });
        assert_eq!(cache.top_n(2).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_equal_ranks_collapse_to_latest_key() {
        let cache = players(4, 3);
        cache.put(1, Player { name: "a", score: 70 });
        cache.put(2, Player { name: "b", score: 70 });

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.top_n(3).unwrap(), vec![2]);
    }

    #[test]
    fn test_below_minimum_stays_unranked() {
        let cache = numbers(5, 2);
        cache.put(1, 500);
        cache.put(2, 400);

        let outcome = cache.put(3, 100);

        assert!(!outcome.ranked);
        assert_eq!(cache.peek(&3), Some(100));
        assert_eq!(cache.top_n(2).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_panicking_merge_keeps_stored_value() {
        let policy = FnPolicy::new(
            |p: &Player| p.score,
            |current: &mut Player, incoming: Player| {
                current.score = 0;
                if incoming.score == 0 {
                    panic!("rejected update");
                }
                current.score = incoming.score;
            },
        );
        let cache = RankedCache::new(2, 2, policy).unwrap();
        cache.put(1, Player { name: "a", score: 70 });
        cache.put(2, Player { name: "b", score: 40 });

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            cache.put(1, Player { name: "a", score: 0 })
        }));
        assert!(result.is_err());

        assert_eq!(cache.peek(&1), Some(Player { name: "a", score: 70 }));
        assert_eq!(cache.top_n(2).unwrap(), vec![1, 2]);

        // Locks were released; evicting 1 still clears its ranked slot
        cache.get(&2);
        cache.put(3, Player { name: "c", score: 10 });
        assert_eq!(cache.peek(&1), None);
        assert_eq!(cache.top_n(2).unwrap(), vec![2, 3]);
    }

    #[test]
    fn test_eviction_keeps_slot_taken_by_equal_rank() {
        let cache = players(2, 3);
        cache.put(1, Player { name: "a", score: 70 });
        cache.put(2, Player { name: "b", score: 70 });
        assert_eq!(cache.top_n(3).unwrap(), vec![2]);

        cache.get(&2);
        let outcome = cache.put(3, Player { name: "c", score: 10 });

        assert_eq!(outcome.evicted, Some((1, Player { name: "a", score: 70 })));
        assert_eq!(cache.top_n(3).unwrap(), vec![2, 3]);
        assert_eq!(cache.ranked_len(), 2);
    }

    #[test]
    fn test_every_put_notifies() {
        let cache = numbers(4, 3);
        let seen = Arc::new(TestMutex::new(Vec::new()));
        let sink = seen.clone();
        cache.subscribe(move |v: &u64| sink.lock().push(*v));

        cache.put(1, 100);
        cache.put(2, 200);
        cache.put(1, 100);

        assert_eq!(*seen.lock(), vec![100, 200, 100]);
    }

    #[test]
    fn test_unsubscribed_observer_is_silent() {
        let cache = numbers(4, 3);
        let seen = Arc::new(TestMutex::new(0));
        let sink = seen.clone();
        let id = cache.subscribe(move |_| *sink.lock() += 1);

        cache.put(1, 1);
        assert!(cache.unsubscribe(id));
        cache.put(2, 2);

        assert_eq!(*seen.lock(), 1);
    }

    #[test]
    fn test_panicking_observer_does_not_block_others() {
        let cache = numbers(4, 3);
        let seen = Arc::new(TestMutex::new(0));
        cache.subscribe(|_| panic!("boom"));
        let sink = seen.clone();
        cache.subscribe(move |_| *sink.lock() += 1);

        let outcome = cache.put(1, 100);

        assert_eq!(outcome.observer_failures, 1);
        assert_eq!(*seen.lock(), 1);
        assert_eq!(cache.peek(&1), Some(100));
        assert_eq!(cache.stats().observer_failures, 1);
    }

    #[test]
    fn test_observer_may_read_cache() {
        let cache = Arc::new(numbers(4, 3));
        let seen = Arc::new(TestMutex::new(Vec::new()));

        let reader = Arc::downgrade(&cache);
        let sink = seen.clone();
        cache.subscribe(move |_| {
            if let Some(cache) = reader.upgrade() {
                sink.lock().push(cache.top_n(1).unwrap_or_default());
            }
        });

        cache.put(1, 100);
        cache.put(2, 200);

        assert_eq!(*seen.lock(), vec![vec![1], vec![2]]);
    }

    #[test]
    fn test_stats_snapshot() {
        let cache = filled();
        cache.get(&1);
        cache.get(&9);
        cache.put(5, 500);

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.puts, 5);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 4);
        assert_eq!(stats.ranked_entries, 3);
    }
}
