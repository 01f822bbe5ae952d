//! Persistent player profiles: the document, its XP/level rules and the
//! stores that keep one document per wallet address.

pub mod address;
pub mod model;
pub mod storage;

pub use address::normalize_address;
pub use model::{
    Achievement, GameStats, LandRecord, LeaderboardEntry, LeaderboardKind, OwnedBlock, Player,
    PlayerUpdate, PlayerView, Rank, StatsUpdate, XpGain, MAX_USERNAME_LEN,
};
pub use storage::{FileStore, MemoryStore, PlayerStore, StoreError};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Player not found")]
    NotFound,

    #[error("Invalid wallet address: {0:?}")]
    InvalidAddress(String),

    #[error("Username must be at most {MAX_USERNAME_LEN} characters")]
    UsernameTooLong,

    #[error("XP amount must be a non-negative number")]
    InvalidXp,

    #[error("You do not own this outfit")]
    OutfitNotOwned(u32),

    #[error("Invalid outfit or not purchasable")]
    NotPurchasable(u32),

    #[error("Outfit already owned")]
    AlreadyOwned(u32),

    #[error(transparent)]
    Store(#[from] StoreError),
}
