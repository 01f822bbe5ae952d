use log::{debug, warn};
use parking_lot::Mutex;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::outfit::STARTER_OUTFIT;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Invalid outfit cache file: {0}")]
    Format(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Owned outfit ids per wallet, persisted as one JSON array per address.
#[derive(Debug)]
pub struct OwnedOutfitCache {
    dir: PathBuf,
    entries: Mutex<HashMap<String, BTreeSet<u32>>>,
}

impl OwnedOutfitCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn path_for(&self, address: &str) -> PathBuf {
        self.dir.join(format!("ownedOutfits_{}.json", address.to_lowercase()))
    }

    /// Owned set for `address`. A missing or unreadable file yields just the starter outfit.
    pub fn load(&self, address: &str) -> BTreeSet<u32> {
        let key = address.to_lowercase();
        let mut entries = self.entries.lock();
        if let Some(owned) = entries.get(&key) {
            return owned.clone();
        }

        let path = self.path_for(&key);
        let mut owned = match read_ids(&path) {
            Ok(ids) => ids,
            Err(CacheError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => {
                warn!("Ignoring outfit cache {}: {}", path.display(), e);
                BTreeSet::new()
            }
        };
        owned.insert(STARTER_OUTFIT);
        entries.insert(key, owned.clone());
        owned
    }

    pub fn add(&self, address: &str, outfit_id: u32) -> Result<BTreeSet<u32>, CacheError> {
        let mut owned = self.load(address);
        owned.insert(outfit_id);
        self.store(address, owned)
    }

    /// Replaces the owned set, e.g. after reading ownership back from the chain.
    pub fn store(&self, address: &str, mut owned: BTreeSet<u32>) -> Result<BTreeSet<u32>, CacheError> {
        owned.insert(STARTER_OUTFIT);
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(address);
        let ids: Vec<u32> = owned.iter().copied().collect();
        fs::write(&path, serde_json::to_string(&ids)?)?;
        debug!("Cached {} outfits at {}", ids.len(), path.display());

        self.entries.lock().insert(address.to_lowercase(), owned.clone());
        Ok(owned)
    }

    pub fn clear(&self, address: &str) -> Result<(), CacheError> {
        self.entries.lock().remove(&address.to_lowercase());
        match fs::remove_file(self.path_for(address)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn read_ids(path: &Path) -> Result<BTreeSet<u32>, CacheError> {
    let content = fs::read_to_string(path)?;
    let ids: Vec<u32> = serde_json::from_str(&content)?;
    Ok(ids.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ADDR: &str = "0xAbC0000000000000000000000000000000000001";

    #[test]
    fn test_starter_always_present() {
        let dir = tempdir().unwrap();
        let cache = OwnedOutfitCache::new(dir.path());
        assert_eq!(cache.load(ADDR), BTreeSet::from([1]));

        let owned = cache.store(ADDR, BTreeSet::from([4])).unwrap();
        assert_eq!(owned, BTreeSet::from([1, 4]));
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = tempdir().unwrap();
        OwnedOutfitCache::new(dir.path()).add(ADDR, 3).unwrap();

        let reopened = OwnedOutfitCache::new(dir.path());
        assert_eq!(reopened.load(&ADDR.to_lowercase()), BTreeSet::from([1, 3]));
    }

    #[test]
    fn test_clear_and_corrupt_file() {
        let dir = tempdir().unwrap();
        let cache = OwnedOutfitCache::new(dir.path());
        cache.add(ADDR, 5).unwrap();
        cache.clear(ADDR).unwrap();
        assert_eq!(cache.load(ADDR), BTreeSet::from([1]));
        cache.clear(ADDR).unwrap();

        let path = cache.path_for(ADDR);
        fs::write(&path, "not json").unwrap();
        let fresh = OwnedOutfitCache::new(dir.path());
        assert_eq!(fresh.load(ADDR), BTreeSet::from([1]));
    }
}
