//! `KeyValueStore` trait — the durable key/value contract guidance state
//! persists through.

use async_trait::async_trait;

use crate::error::StoreError;

/// Durable string key/value store scoped to a single profile.
///
/// A missing key is `Ok(None)`, never an error. Implementations must give
/// read-your-writes consistency: once `set` has returned, a `get` of the
/// same key observes the new value.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Insert or overwrite a value.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
