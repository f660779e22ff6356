//! API Handlers
//!
//! HTTP request handlers for each account cache endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::accounts::{Account, AccountCache, TOP_ACCOUNTS};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    HealthResponse, PutAccountRequest, PutAccountResponse, StatsResponse, TopAccountsResponse,
    TopQuery,
};

/// Application state shared across all handlers.
///
/// The account cache synchronizes internally, so handlers share it through a
/// plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe account cache
    pub accounts: Arc<AccountCache>,
}

impl AppState {
    /// Creates a new AppState with the given account cache.
    pub fn new(accounts: AccountCache) -> Self {
        Self {
            accounts: Arc::new(accounts),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(AccountCache::from_config(config)?))
    }
}

/// Handler for PUT /accounts
///
/// Stores an account, or updates the balance of a cached one.
pub async fn put_account_handler(
    State(state): State<AppState>,
    Json(req): Json<PutAccountRequest>,
) -> Json<PutAccountResponse> {
    let outcome = state.accounts.put_account(req.into_account());
    Json(PutAccountResponse::from_outcome(outcome))
}

/// Handler for GET /accounts/:id
pub async fn get_account_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Account>> {
    state
        .accounts
        .account_by_id(id)
        .map(Json)
        .ok_or_else(|| CacheError::NotFound(id.to_string()))
}

/// Handler for GET /accounts/top
///
/// Returns the `n` richest cached accounts (three unless `?n=` says otherwise).
pub async fn top_accounts_handler(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> Result<Json<TopAccountsResponse>> {
    let n = query.n.unwrap_or(TOP_ACCOUNTS);
    let accounts = state.accounts.top_accounts(n)?;
    Ok(Json(TopAccountsResponse::new(accounts)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.accounts.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
