use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::cache::CacheState;

/// Application name used for the cache directory path
const APP_NAME: &str = "hrcache";

/// Persists the whole `CacheState` as a single JSON blob under a
/// configurable key, the way the web build keeps it in browser storage.
#[derive(Debug, Clone)]
pub struct CacheStorage {
    dir: PathBuf,
}

impl CacheStorage {
    /// Storage rooted at the platform cache directory.
    pub fn new() -> Result<Self> {
        let dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?
            .join(APP_NAME);
        Self::with_dir(dir)
    }

    /// Storage rooted at an explicit directory.
    pub fn with_dir(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    pub fn load(&self, key: &str) -> Result<Option<CacheState>> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache blob: {}", key))?;

        let state: CacheState = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache blob: {}", key))?;

        Ok(Some(state))
    }

    pub fn save(&self, key: &str, state: &CacheState) -> Result<()> {
        let contents = serde_json::to_string_pretty(state)?;
        std::fs::write(self.blob_path(key), contents)?;
        Ok(())
    }

    /// Remove the persisted blob. A missing file is not an error.
    pub fn erase(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(self.blob_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to erase cache blob: {}", key)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Employee;

    fn test_storage() -> (CacheStorage, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let storage = CacheStorage::with_dir(dir.path().to_path_buf()).unwrap();
        (storage, dir)
    }

    #[test]
    fn test_load_missing_blob_returns_none() {
        let (storage, _dir) = test_storage();
        assert!(storage.load("absent").unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (storage, _dir) = test_storage();

        let state = CacheState {
            employees: Some(Employee::demo_roster()),
            last_updated: Some(chrono::Utc::now()),
            ..Default::default()
        };
        storage.save("hr-data", &state).unwrap();

        let loaded = storage.load("hr-data").unwrap().unwrap();
        assert_eq!(loaded.employees.unwrap().len(), 4);
        assert!(loaded.last_updated.is_some());
    }

    #[test]
    fn test_erase_is_idempotent() {
        let (storage, _dir) = test_storage();

        storage.save("hr-data", &CacheState::default()).unwrap();
        storage.erase("hr-data").unwrap();
        assert!(storage.load("hr-data").unwrap().is_none());

        // Second erase finds nothing and still succeeds
        storage.erase("hr-data").unwrap();
    }

    #[test]
    fn test_keys_are_isolated() {
        let (storage, _dir) = test_storage();

        let state = CacheState {
            employees: Some(Employee::demo_roster()),
            ..Default::default()
        };
        storage.save("primary", &state).unwrap();

        assert!(storage.load("secondary").unwrap().is_none());
        assert!(storage.load("primary").unwrap().is_some());
    }
}
