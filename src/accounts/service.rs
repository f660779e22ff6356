//! Account Cache Service
//!
//! Account-facing wrapper over [`RankedCache`].

use crate::accounts::{Account, AccountPolicy};
use crate::cache::{CacheStats, PutOutcome, RankedCache, SubscriptionId};
use crate::config::Config;
use crate::error::Result;

/// Number of accounts returned by [`AccountCache::top_accounts_by_balance`].
pub const TOP_ACCOUNTS: usize = 3;

// == Account Cache ==
/// Caches accounts by id and keeps the richest ones ranked.
pub struct AccountCache {
    cache: RankedCache<u64, Account, AccountPolicy>,
}

impl AccountCache {
    // == Constructor ==
    /// Creates a cache of `capacity` accounts ranking the top `top_capacity`.
    pub fn new(capacity: usize, top_capacity: usize) -> Result<Self> {
        Ok(Self {
            cache: RankedCache::new(capacity, top_capacity, AccountPolicy)?,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.cache_capacity, config.top_capacity)
    }

    // == Put ==
    /// Stores `account`, or updates the balance of the cached account with the same id.
    pub fn put_account(&self, account: Account) -> PutOutcome<u64, Account> {
        self.cache.put(account.id, account)
    }

    // == Get ==
    /// Looks up an account, counting a hit when found.
    pub fn account_by_id(&self, id: u64) -> Option<Account> {
        self.cache.get(&id)
    }

    /// Number of successful [`account_by_id`](Self::account_by_id) lookups so far.
    pub fn account_by_id_hit_count(&self) -> u64 {
        self.cache.hits()
    }

    // == Ranking ==
    /// The [`TOP_ACCOUNTS`] highest balances, richest first.
    pub fn top_accounts_by_balance(&self) -> Result<Vec<Account>> {
        self.top_accounts(TOP_ACCOUNTS)
    }

    /// The `n` highest balances, richest first.
    pub fn top_accounts(&self, n: usize) -> Result<Vec<Account>> {
        self.cache.top_values(n)
    }

    // == Subscriptions ==
    /// Calls `observer` with the stored account after every write.
    pub fn subscribe_for_account_updates<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&Account) + Send + Sync + 'static,
    {
        self.cache.subscribe(observer)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.cache.unsubscribe(id)
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn top_capacity(&self) -> usize {
        self.cache.top_capacity()
    }

    /// Account ids from least to most recently used.
    pub fn ids_by_recency(&self) -> Vec<u64> {
        self.cache.keys_by_recency()
    }
}
