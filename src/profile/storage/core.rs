use chrono::{DateTime, Utc};
use log::info;
use thiserror::Error;

use crate::outfit::STARTER_OUTFIT;
use crate::profile::model::{LeaderboardEntry, LeaderboardKind, Player};
use crate::profile::ProfileError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt player document: {0}")]
    Format(#[from] serde_json::Error),
}

/// Read-modify-write step run under the store lock.
pub type Mutation<'a> = &'a mut dyn FnMut(Option<Player>) -> Result<Option<Player>, ProfileError>;

/// Player documents keyed by normalised address.
pub trait PlayerStore: Send + Sync {
    fn get(&self, address: &str) -> Result<Option<Player>, StoreError>;

    fn all(&self) -> Result<Vec<Player>, StoreError>;

    /// Runs `f` on the current document while holding the store lock. A
    /// returned document is written back with `updatedAt` refreshed.
    fn modify(&self, address: &str, f: Mutation<'_>) -> Result<Option<Player>, ProfileError>;

    fn len(&self) -> Result<usize, StoreError> {
        Ok(self.all()?.len())
    }

    /// Returns the player, creating it on first sight, with `lastLogin` set to `now`.
    fn fetch_or_create(&self, address: &str, now: DateTime<Utc>) -> Result<Player, ProfileError> {
        let player = self.modify(address, &mut |existing| {
            let mut player = existing.unwrap_or_else(|| {
                info!("Creating player {}", address);
                Player::new(address, now)
            });
            player.last_login = now;
            Ok(Some(player))
        })?;
        player.ok_or(ProfileError::NotFound)
    }

    /// Applies `f` to an existing player. Errors from `f` leave the stored copy untouched.
    fn update(
        &self,
        address: &str,
        f: &mut dyn FnMut(&mut Player) -> Result<(), ProfileError>,
    ) -> Result<Player, ProfileError> {
        let player = self.modify(address, &mut |existing| {
            let mut player = existing.ok_or(ProfileError::NotFound)?;
            f(&mut player)?;
            player.owned_outfits.insert(STARTER_OUTFIT);
            Ok(Some(player))
        })?;
        player.ok_or(ProfileError::NotFound)
    }

    fn leaderboard(
        &self,
        kind: LeaderboardKind,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, StoreError> {
        let mut players = self.all()?;
        kind.sort(&mut players);
        Ok(players
            .into_iter()
            .take(limit)
            .map(LeaderboardEntry::from)
            .collect())
    }
}
