use crate::error::KVError;

/// Key-value cache capability injected into the entity store.
///
/// Point reads, writes and deletes only. Callers never enumerate the cache;
/// entry lifetimes (TTL, eviction) belong to the backend.
pub trait KVStore: Send + Sync {
    /// Get a value by key. `Ok(None)` means not cached.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a value, overwriting any existing entry.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), KVError>;
}
