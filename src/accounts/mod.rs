//! Accounts Module
//!
//! Account balances cached by id, ranked by balance.

mod model;
mod service;

pub use model::{Account, AccountPolicy};
pub use service::{AccountCache, TOP_ACCOUNTS};
