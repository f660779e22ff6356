//! Cache Module
//!
//! Provides the ranked LRU cache and its building blocks.

mod lru;
mod observers;
mod policy;
mod ranking;
mod stats;
mod store;


// Re-export public types
pub use lru::LruIndex;
pub use observers::{ObserverRegistry, SubscriptionId};
pub use policy::{ByValue, CachePolicy, FnPolicy};
pub use ranking::{Ranked, RankingIndex};
pub use stats::{CacheStats, Counters};
pub use store::{PutOutcome, RankedCache};
