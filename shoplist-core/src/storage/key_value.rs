//! Key-value slots for persisted blobs.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur reading or writing a key-value slot.
#[derive(Error, Debug)]
pub enum KeyValueError {
    #[error("Invalid storage key '{0}': use letters, digits, '_', '-' or '.'")]
    InvalidKey(String),

    #[error("I/O error for {0}: {1}")]
    Io(PathBuf, #[source] io::Error),
}

/// A string-valued key-value slot, the role a platform preference store plays.
pub trait KeyValueStore {
    /// Returns `Ok(None)` if nothing was ever written under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueError>;

    /// Replaces any previous value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), KeyValueError>;

    /// Returns true if a value was removed.
    fn remove(&mut self, key: &str) -> Result<bool, KeyValueError>;
}

/// Key-value store backed by one JSON file per key.
#[derive(Clone, Debug)]
pub struct FileKeyValueStore {
    data_dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.data_dir
    }

    /// Returns the file path for a key.
    pub fn path(&self, key: &str) -> Result<PathBuf, KeyValueError> {
        validate_key(key)?;
        Ok(self.data_dir.join(format!("{}.json", key)))
    }

    /// Checks if a value exists on disk for a key.
    pub fn exists(&self, key: &str) -> bool {
        self.path(key).map(|p| p.exists()).unwrap_or(false)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        let path = self.path(key)?;

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KeyValueError::Io(path, e)),
        }
    }

    /// Creates the data directory if it doesn't exist. The value goes to a
    /// sibling temp file first and is renamed over the target.
    fn set(&mut self, key: &str, value: &str) -> Result<(), KeyValueError> {
        let path = self.path(key)?;

        fs::create_dir_all(&self.data_dir)
            .map_err(|e| KeyValueError::Io(self.data_dir.clone(), e))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(|e| KeyValueError::Io(tmp_path.clone(), e))?;
        fs::rename(&tmp_path, &path).map_err(|e| KeyValueError::Io(path, e))?;

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, KeyValueError> {
        let path = self.path(key)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(KeyValueError::Io(path, e)),
        }
    }
}

/// In-memory key-value store.
#[derive(Clone, Debug, Default)]
pub struct MemoryKeyValueStore {
    values: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, KeyValueError> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), KeyValueError> {
        validate_key(key)?;
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool, KeyValueError> {
        validate_key(key)?;
        Ok(self.values.remove(key).is_some())
    }
}

fn validate_key(key: &str) -> Result<(), KeyValueError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(KeyValueError::InvalidKey(key.to_string()))
    }
}
