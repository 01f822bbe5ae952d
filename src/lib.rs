pub mod chain;
pub mod config;
pub mod game;
pub mod land;
pub mod marketplace;
pub mod outfit;
pub mod player;
pub mod profile;
pub mod resource;
pub mod server;
pub mod utils;
pub mod wallet;
pub mod world;

// Re-export commonly used types
pub use chain::{ChainError, RpcClient};
pub use config::{AppConfig, ChainConfig, GameplayConfig, ServerConfig, WorldGenConfig};
pub use game::GameSession;
pub use land::{LandRegistry, LandStatus};
pub use marketplace::{Marketplace, MarketplaceStats};
pub use outfit::{Outfit, OwnedOutfitCache, OUTFITS};
pub use player::{Player, PlayerInput};
pub use profile::{FileStore, MemoryStore, PlayerStore, ProfileError, StoreError};
pub use resource::{ResourceHarvester, ResourceKind};
pub use server::{router, AppState};
pub use utils::error::GameError;
pub use wallet::{SimulatedWallet, WalletConnector, WalletError, WalletSession};
pub use world::{BlockId, Chunk, ChunkCoord, TerrainGenerator, World};
