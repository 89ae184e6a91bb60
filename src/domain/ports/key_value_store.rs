use async_trait::async_trait;

use crate::domain::errors::StorageError;

/// Port trait for string-keyed, string-valued persistent storage
///
/// The service persists the last successfully fetched copy of each user so
/// it can answer from storage when the remote API is unavailable. Any method
/// may fail; the service decides whether a failure is fatal.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    ///
    /// # Returns
    /// * `Ok(Some(value))` if the key exists
    /// * `Ok(None)` if it does not
    /// * `Err(StorageError)` on backend failure
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a value; removing a missing key is not an error
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
