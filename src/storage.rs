//! Key-value persistence backends.
//!
//! The tracker persists a handful of string values under fixed keys. The
//! file backend keeps one file per key under `~/.weekly-tracker/`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrackerError;

/// Key holding the JSON array of week records
pub const DATA_KEY: &str = "weeklyTrackerData";

/// Storage collaborator the tracker reads at startup and writes after changes
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError>;
    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), TrackerError>;
}

/// File-per-key store rooted at a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under `~/.weekly-tracker/`. The directory is created on first write.
    pub fn open_default() -> Result<Self, TrackerError> {
        let home = dirs::home_dir().ok_or(TrackerError::HomeDirNotFound)?;
        Ok(Self::new(home.join(".weekly-tracker")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| TrackerError::io(&path, e))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| TrackerError::io(&self.dir, e))?;
        }
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|e| TrackerError::io(&path, e))
    }

    fn remove(&mut self, key: &str) -> Result<(), TrackerError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TrackerError::io(&path, e)),
        }
    }
}

/// In-memory store for tests and embedders that persist elsewhere
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), TrackerError> {
        self.entries.remove(key);
        Ok(())
    }
}
