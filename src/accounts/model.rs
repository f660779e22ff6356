//! Account Model
//!
//! The cached account type and how writes to it are merged and ranked.

use serde::{Deserialize, Serialize};

use crate::cache::CachePolicy;

// == Account ==
/// A bank account as held in the cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique account id, used as the cache key
    pub id: u64,
    /// Current balance in minor units
    pub balance: i64,
}

impl Account {
    pub fn new(id: u64, balance: i64) -> Self {
        Self { id, balance }
    }
}

// == Account Policy ==
/// Ranks accounts by balance; a write to a cached account updates its balance.
///
/// Two accounts with the same balance compete for one ranked slot and the most
/// recently written one keeps it.
#[derive(Debug, Clone, Copy, Default)]
pub struct AccountPolicy;

impl CachePolicy<Account> for AccountPolicy {
    type Rank = i64;

    fn rank(&self, account: &Account) -> i64 {
        account.balance
    }

    fn merge(&self, current: &mut Account, incoming: Account) {
        current.balance = incoming.balance;
    }
}
