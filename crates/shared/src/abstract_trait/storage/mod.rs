use crate::errors::StorageError;
use std::sync::Arc;

pub type DynStorage = Arc<dyn KeyValueStorage + Send + Sync>;

/// Durable string key-value storage, the equivalent of browser local storage.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;

    /// Writes every entry. Backends that can should apply the batch as one unit.
    fn set_items(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        for (key, value) in entries {
            self.set_item(key, value)?;
        }
        Ok(())
    }

    /// Removes every key, in order, even when an earlier removal failed.
    fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut first_err = None;
        for key in keys {
            if let Err(e) = self.remove_item(key) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
