use chrono::Utc;
use log::{debug, warn};
use parking_lot::Mutex;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::profile::model::Player;
use crate::profile::storage::core::{Mutation, PlayerStore, StoreError};
use crate::profile::ProfileError;

/// One pretty-printed JSON document per player under `base_path`.
#[derive(Debug)]
pub struct FileStore {
    base_path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn open(base_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path)?;
        debug!("Player store at {}", base_path.display());
        Ok(Self {
            base_path,
            lock: Mutex::new(()),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn path_for(&self, address: &str) -> PathBuf {
        self.base_path.join(format!("{address}.json"))
    }

    fn read(&self, address: &str) -> Result<Option<Player>, StoreError> {
        match fs::read_to_string(self.path_for(address)) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, player: &Player) -> Result<(), StoreError> {
        let path = self.path_for(&player.address);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(player)?)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

impl PlayerStore for FileStore {
    fn get(&self, address: &str) -> Result<Option<Player>, StoreError> {
        let _guard = self.lock.lock();
        self.read(address)
    }

    fn all(&self) -> Result<Vec<Player>, StoreError> {
        let _guard = self.lock.lock();
        let mut players = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            let parsed = fs::read_to_string(&path)
                .map_err(StoreError::from)
                .and_then(|c| serde_json::from_str::<Player>(&c).map_err(StoreError::from));
            match parsed {
                Ok(player) => players.push(player),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }
        Ok(players)
    }

    fn modify(&self, address: &str, f: Mutation<'_>) -> Result<Option<Player>, ProfileError> {
        let _guard = self.lock.lock();
        match f(self.read(address)?)? {
            Some(mut player) => {
                player.address = address.to_string();
                player.updated_at = Utc::now();
                self.write(&player)?;
                Ok(Some(player))
            }
            None => Ok(None),
        }
    }
}
