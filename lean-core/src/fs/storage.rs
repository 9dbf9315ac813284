//! JSON-backed key/value storage.
//!
//! A [`Storage`] is only a path: every operation reads the whole file, applies
//! the change in memory and rewrites the file wholesale through
//! [`save_document`](super::persistence::save_document).

use crate::error::{LeanError, Result};
use crate::fs::persistence::{load_document, save_document};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    /// Creates a storage backed by `path`. The file is created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the value stored under `key`, deserialized into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let data = self.load()?;
        match data.get(key) {
            Some(value) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.update(|data| {
            data.insert(key.to_string(), value);
            true
        })?;
        Ok(())
    }

    pub fn has(&self, key: &str) -> Result<bool> {
        Ok(self.load()?.contains_key(key))
    }

    /// Removes `key`. Returns whether it was present; an absent key leaves the file untouched.
    pub fn delete(&self, key: &str) -> Result<bool> {
        self.update(|data| data.remove(key).is_some())
    }

    /// Removes every key by deleting the backing file.
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            debug!("Clearing storage {}", self.path.display());
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn keys(&self) -> Result<Vec<String>> {
        Ok(self.load()?.keys().cloned().collect())
    }

    /// Applies `mutate` to the stored object and persists it if `mutate` reports a change.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the document was modified and rewritten.
    /// * `Ok(false)` if `mutate` reported no change.
    pub fn update<F>(&self, mutate: F) -> Result<bool>
    where
        F: FnOnce(&mut Map<String, Value>) -> bool,
    {
        let mut data = self.load()?;
        if !mutate(&mut data) {
            return Ok(false);
        }
        debug!("Writing storage {}", self.path.display());
        save_document(&self.path, &data)?;
        Ok(true)
    }

    /// Reads the whole document. A missing file is an empty object.
    pub fn load(&self) -> Result<Map<String, Value>> {
        match load_document::<Value>(&self.path)? {
            None => Ok(Map::new()),
            Some(Value::Object(data)) => Ok(data),
            Some(_) => Err(LeanError::MalformedConfig {
                path: self.path.clone(),
                reason: "expected a JSON object at the top level".to_string(),
            }),
        }
    }
}
