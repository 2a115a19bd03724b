use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::JsonFileStore;

/// What an account may do on the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May create listings
    Manager,
    /// May purchase listings
    User,
}

/// A registered account. Never mutated or deleted once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    /// Stored as submitted. Hashing is out of scope for this service.
    pub password: String,
    pub role: Role,
}

/// The set of registered accounts, persisted as one JSON array.
pub struct AccountStore {
    inner: JsonFileStore<Account>,
}

impl AccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: JsonFileStore::new(path),
        }
    }

    pub fn load(&self) -> Vec<Account> {
        self.inner.load()
    }

    pub fn save(&self, accounts: &[Account]) {
        self.inner.save(accounts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }

    #[test]
    fn test_unknown_role_rejected() {
        let result: Result<Role, _> = serde_json::from_str("\"admin\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_account_round_trip() {
        let account = Account {
            username: "alice".to_string(),
            password: "pw".to_string(),
            role: Role::Manager,
        };
        let json = serde_json::to_string(&account).unwrap();
        assert_eq!(serde_json::from_str::<Account>(&json).unwrap(), account);
    }
}
