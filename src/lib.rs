//! Rank Cache - A bounded LRU cache with a top-N ranking view
//!
//! Keeps an authoritative least-recently-used store alongside a small ordered
//! index of the highest-ranked values, and notifies subscribers on every write.

pub mod accounts;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use accounts::{Account, AccountCache};
pub use api::AppState;
pub use cache::RankedCache;
pub use config::Config;
pub use tasks::spawn_stats_reporter;
