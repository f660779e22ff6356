//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

use crate::accounts::Account;

/// Request body for the PUT operation (PUT /accounts)
///
/// # Fields
/// - `id`: The account id, used as the cache key
/// - `balance`: The new balance
#[derive(Debug, Clone, Deserialize)]
pub struct PutAccountRequest {
    /// The account id
    pub id: u64,
    /// The balance to store
    pub balance: i64,
}

impl PutAccountRequest {
    /// Every id the cache accepts is a valid key, zero included.
    pub fn into_account(self) -> Account {
        Account::new(self.id, self.balance)
    }
}

/// Query string for GET /accounts/top
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopQuery {
    /// Number of accounts to return; defaults to the top-3 listing
    #[serde(default)]
    pub n: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_request_deserialize() {
        let json = r#"{"id": 4, "balance": 400}"#;
        let req: PutAccountRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.id, 4);
        assert_eq!(req.balance, 400);
        assert_eq!(req.into_account(), Account::new(4, 400));
    }

    #[test]
    fn test_put_request_missing_balance() {
        let json = r#"{"id": 4}"#;
        assert!(serde_json::from_str::<PutAccountRequest>(json).is_err());
    }

    #[test]
    fn test_zero_id_and_negative_balance_accepted() {
        let json = r#"{"id": 0, "balance": -50}"#;
        let req: PutAccountRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.into_account(), Account::new(0, -50));
    }

    #[test]
    fn test_put_request_negative_id_rejected() {
        let json = r#"{"id": -1, "balance": 10}"#;
        assert!(serde_json::from_str::<PutAccountRequest>(json).is_err());
    }

    #[test]
    fn test_top_query_default() {
        let query: TopQuery = serde_json::from_str("{}").unwrap();
        assert!(query.n.is_none());
    }
}
