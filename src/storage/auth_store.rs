use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An issued auth token paired with the username it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthRecord {
    pub token: String,
    pub username: String,
}

/// In-memory auth token storage, keyed by token.
#[derive(Debug, Clone, Default)]
pub struct AuthStore {
    auths: HashMap<String, AuthRecord>,
}

impl AuthStore {
    pub fn new() -> Self {
        Self { auths: HashMap::new() }
    }

    /// Issues a random token for `username` and stores the record.
    pub fn create_auth(&mut self, username: &str) -> AuthRecord {
        let token = generate_token();
        let record = AuthRecord { token: token.clone(), username: username.to_string() };
        self.auths.insert(token, record.clone());
        debug!("issued auth token for {}", username);
        record
    }

    pub fn get_auth(&self, token: &str) -> Option<&AuthRecord> {
        self.auths.get(token)
    }

    pub fn delete_auth(&mut self, token: &str) {
        self.auths.remove(token);
    }

    pub fn clear(&mut self) {
        self.auths.clear();
    }
}

/// 128 random bits rendered as lowercase hex, standing in for a UUID.
fn generate_token() -> String {
    let bits: u128 = rand::thread_rng().gen();
    format!("{:032x}", bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_get_auth() {
        let mut store = AuthStore::new();
        let record = store.create_auth("alice");
        assert_eq!(record.username, "alice");
        assert_eq!(record.token.len(), 32);

        let stored = store.get_auth(&record.token).unwrap();
        assert_eq!(*stored, record);
    }

    #[test]
    fn test_tokens_are_unique() {
        let mut store = AuthStore::new();
        let a = store.create_auth("alice");
        let b = store.create_auth("alice");
        assert_ne!(a.token, b.token);
        assert!(store.get_auth(&a.token).is_some());
        assert!(store.get_auth(&b.token).is_some());
    }

    #[test]
    fn test_get_auth_absent() {
        let store = AuthStore::new();
        assert!(store.get_auth("no-such-token").is_none());
    }

    #[test]
    fn test_delete_auth() {
        let mut store = AuthStore::new();
        let record = store.create_auth("bob");
        store.delete_auth(&record.token);
        assert!(store.get_auth(&record.token).is_none());

        // Deleting an unknown token is a no-op
        store.delete_auth("no-such-token");
    }

    #[test]
    fn test_clear() {
        let mut store = AuthStore::new();
        let a = store.create_auth("alice");
        let b = store.create_auth("bob");
        store.clear();
        assert!(store.get_auth(&a.token).is_none());
        assert!(store.get_auth(&b.token).is_none());
    }
}
