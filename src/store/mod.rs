//! Key-value persistence for the user's language preference.
//!
//! The resolver only needs string get/put/remove under one fixed key, so any
//! durable key-value mechanism can back it. Backends absorb their own I/O
//! errors: a failed read looks like "nothing stored" and a failed write
//! reports `false`.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Durable string key-value storage.
pub trait PreferenceStore {
    /// Read the value stored under `key`, if any.
    fn get_string(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    /// Returns whether the write committed.
    fn put_string(&self, key: &str, value: &str) -> bool;

    /// Delete `key`. Returns whether a value was actually removed.
    fn remove(&self, key: &str) -> bool;
}
