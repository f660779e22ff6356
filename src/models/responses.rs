//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::accounts::Account;
use crate::cache::{CacheStats, PutOutcome};

/// Response body for the PUT operation (PUT /accounts)
#[derive(Debug, Clone, Serialize)]
pub struct PutAccountResponse {
    /// Success message
    pub message: String,
    /// The account as stored after the write
    pub account: Account,
    /// True if an existing account was updated
    pub updated: bool,
    /// Id of the account evicted to make room, if any
    pub evicted: Option<u64>,
    /// True if the account is part of the balance ranking
    pub ranked: bool,
}

impl PutAccountResponse {
    /// Creates a new PutAccountResponse from the outcome of a write
    pub fn from_outcome(outcome: PutOutcome<u64, Account>) -> Self {
        let verb = if outcome.merged { "updated" } else { "stored" };
        Self {
            message: format!("Account {} {} successfully", outcome.value.id, verb),
            updated: outcome.merged,
            evicted: outcome.evicted.map(|(id, _)| id),
            ranked: outcome.ranked,
            account: outcome.value,
        }
    }
}

/// Response body for GET /accounts/top
#[derive(Debug, Clone, Serialize)]
pub struct TopAccountsResponse {
    /// Accounts by descending balance
    pub accounts: Vec<Account>,
}

impl TopAccountsResponse {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self { accounts }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of writes
    pub puts: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Number of observer invocations that panicked
    pub observer_failures: u64,
    /// Current number of accounts in cache
    pub total_entries: usize,
    /// Current number of ranked accounts
    pub ranked_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            puts: stats.puts,
            evictions: stats.evictions,
            observer_failures: stats.observer_failures,
            total_entries: stats.total_entries,
            ranked_entries: stats.ranked_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
