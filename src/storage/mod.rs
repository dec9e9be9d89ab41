//! Key-value persistence for zones and settings
//!
//! Two slots exist, one per key. Values are JSON strings with no versioning.
//! Reads that fail to parse fall back to a default; callers never see the
//! parse error.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::core::error::Result;

/// Slot holding the serialized zone list
pub const ZONES_KEY: &str = "zones";

/// Slot holding the serialized settings object
pub const SETTINGS_KEY: &str = "settings";

/// A durable string slot store
pub trait KeyValueStore {
    /// Read a slot; `Ok(None)` when the slot was never written
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Read and parse a slot, returning `None` when it is absent, unreadable or malformed
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::debug!(key, error = %e, "slot unreadable, using default");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key, error = %e, "slot malformed, using default");
            None
        }
    }
}

/// Serialize a value into a slot
pub fn write_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}
