use std::time::Duration;

use dashmap::DashMap;

use super::expiring::Expiring;

/// Plain string values with optional expiry.
#[derive(Debug, Default)]
pub struct StringStore {
    entries: DashMap<String, Expiring<String>>,
}

impl StringStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value`, replacing any previous value and expiry.
    pub fn set(&self, key: &str, value: String, ttl: Option<Duration>) {
        self.entries
            .insert(key.to_string(), Expiring::new(value, ttl));
    }

    /// Returns the live value, evicting it first if it has expired.
    pub fn get(&self, key: &str) -> Option<String> {
        {
            let entry = self.entries.get(key)?;

            if let Some(value) = entry.live() {
                return Some(value.clone());
            }
        }

        self.evict_if_expired(key);
        None
    }

    /// Same lazy-eviction contract as [`StringStore::get`], without cloning the value.
    pub fn exists(&self, key: &str) -> bool {
        {
            let Some(entry) = self.entries.get(key) else {
                return false;
            };

            if entry.live().is_some() {
                return true;
            }
        }

        self.evict_if_expired(key);
        false
    }

    /// Number of physically stored entries, including expired ones not yet touched.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // The read guard must be released before this runs; `remove_if` takes the
    // shard's write lock. Re-checking under that lock keeps a concurrent SET
    // from being thrown away.
    fn evict_if_expired(&self, key: &str) {
        self.entries.remove_if(key, |_, entry| entry.is_expired());
    }
}
