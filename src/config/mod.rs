pub mod chain;
pub mod core;
pub mod gameplay;
pub mod server;
pub mod worldgen;

pub use chain::{ChainConfig, ContractAddresses};
pub use self::core::{default_config_path, AppConfig};
pub use gameplay::GameplayConfig;
pub use server::{ServerConfig, StoreKind};
pub use worldgen::WorldGenConfig;
