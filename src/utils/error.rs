use thiserror::Error;

use crate::wallet::WalletError;

/// Errors raised by the client-side game hooks (land, resources, marketplace).
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Listing not found: {0}")]
    ListingNotFound(String),

    #[error("Land plot not found: {0}")]
    PlotNotFound(u32),

    #[error("Chunk ({0}, {1}) is outside the land grid")]
    OutsideLandGrid(i32, i32),

    #[error("No resource mapping for block type: {0}")]
    NoResourceMapping(String),

    #[error("Invalid resource type: {0}")]
    InvalidResource(String),

    #[error("Invalid rent duration: {0} days")]
    InvalidRentDuration(u32),

    #[error("Outfit {0} is not mintable")]
    NotMintable(u32),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

pub type Result<T> = std::result::Result<T, GameError>;
