use std::collections::HashMap;
use std::sync::Mutex;

pub const TOKEN_KEY: &str = "token";
pub const USER_ID_KEY: &str = "user_id";
pub const ROLE_KEY: &str = "role";

/// Persistent client storage for the credential trio, keyed by fixed
/// string names. The host shell supplies the real store (local storage,
/// keychain); the in-memory one backs tests and the demo binary.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.into(), value.into());
    }

    fn remove(&self, key: &str) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
    }
}
