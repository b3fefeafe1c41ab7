//! The three typed stores and the keyspace that ties them together.
//!
//! Each store owns its own key map. A key belongs to at most one of them at
//! a time; the command layer enforces that through [`Keyspace::key_type`]
//! before it touches a store.

use std::fmt;

pub mod expiring;
pub mod list;
pub mod stream;
pub mod string;

pub use list::ListStore;
pub use stream::{RequestedId, StreamEntry, StreamId, StreamIdError, StreamStore};
pub use string::StringStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyType {
    String,
    List,
    Stream,
}

impl KeyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::String => "string",
            KeyType::List => "list",
            KeyType::Stream => "stream",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All data held by the server, shared by every connection.
#[derive(Debug, Default)]
pub struct Keyspace {
    pub strings: StringStore,
    pub lists: ListStore,
    pub streams: StreamStore,
}

impl Keyspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// The type of the live value under `key`, checking strings, then
    /// streams, then lists. An expired string is evicted on the way.
    pub fn key_type(&self, key: &str) -> Option<KeyType> {
        if self.strings.exists(key) {
            Some(KeyType::String)
        } else if self.streams.exists(key) {
            Some(KeyType::Stream)
        } else if self.lists.exists(key) {
            Some(KeyType::List)
        } else {
            None
        }
    }

    /// True when `key` currently holds a value of a type other than `expected`.
    pub fn holds_other_type(&self, key: &str, expected: KeyType) -> bool {
        self.key_type(key)
            .is_some_and(|key_type| key_type != expected)
    }
}
