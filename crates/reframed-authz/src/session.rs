//! Session-scoped key/value storage.
//!
//! The authorization context only reads and writes one key. Implementations
//! bridge to whatever the host provides (browser session storage, a test map).
use std::collections::HashMap;
use std::sync::RwLock;

pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    /// Overwrite any previous value.
    fn set(&self, key: &str, value: String);
}

/// Process-local storage. Contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .expect("session storage lock")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries
            .write()
            .expect("session storage lock")
            .insert(key.to_string(), value);
    }
}

impl<T: SessionStorage + ?Sized> SessionStorage for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) {
        (**self).set(key, value)
    }
}
