use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::profile::model::Player;
use crate::profile::storage::core::{Mutation, PlayerStore, StoreError};
use crate::profile::ProfileError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    players: RwLock<HashMap<String, Player>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlayerStore for MemoryStore {
    fn get(&self, address: &str) -> Result<Option<Player>, StoreError> {
        Ok(self.players.read().get(address).cloned())
    }

    fn all(&self) -> Result<Vec<Player>, StoreError> {
        Ok(self.players.read().values().cloned().collect())
    }

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.players.read().len())
    }

    fn modify(&self, address: &str, f: Mutation<'_>) -> Result<Option<Player>, ProfileError> {
        let mut players = self.players.write();
        match f(players.get(address).cloned())? {
            Some(mut player) => {
                player.updated_at = Utc::now();
                players.insert(address.to_string(), player.clone());
                Ok(Some(player))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::model::LeaderboardKind;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fetch_or_create_once() {
        let store = MemoryStore::new();
        let first = store.fetch_or_create("0xaaa", Utc::now()).unwrap();
        let second = store.fetch_or_create("0xaaa", Utc::now()).unwrap();
        assert_eq!(first.created_at, second.created_at);
        assert!(second.last_login >= first.last_login);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_update_missing_player() {
        let store = MemoryStore::new();
        let result = store.update("0xnobody", &mut |_| Ok(()));
        assert!(matches!(result, Err(ProfileError::NotFound)));
        assert!(store.get("0xnobody").unwrap().is_none());
    }

    #[test]
    fn test_failed_update_is_discarded() {
        let store = MemoryStore::new();
        store.fetch_or_create("0xaaa", Utc::now()).unwrap();
        let result = store.update("0xaaa", &mut |p| {
            p.add_xp(500);
            p.select_outfit(4)
        });
        assert!(result.is_err());
        assert_eq!(store.get("0xaaa").unwrap().unwrap().xp, 0);
    }

    #[test]
    fn test_concurrent_xp_is_not_lost() {
        let store = Arc::new(MemoryStore::new());
        store.fetch_or_create("0xaaa", Utc::now()).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..25 {
                        store
                            .update("0xaaa", &mut |p| {
                                p.add_xp(10);
                                Ok(())
                            })
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let player = store.get("0xaaa").unwrap().unwrap();
        assert_eq!(player.xp, 2000);
        assert_eq!(player.level, 21);
    }

    #[test]
    fn test_leaderboard_limit() {
        let store = MemoryStore::new();
        for i in 0..5u64 {
            let address = format!("0x{i}");
            store.fetch_or_create(&address, Utc::now()).unwrap();
            store
                .update(&address, &mut |p| {
                    p.add_xp(i * 100);
                    Ok(())
                })
                .unwrap();
        }
        let top = store.leaderboard(LeaderboardKind::Xp, 3).unwrap();
        let addresses: Vec<&str> = top.iter().map(|e| e.address.as_str()).collect();
        assert_eq!(addresses, vec!["0x4", "0x3", "0x2"]);
    }
}
