pub mod terrain;

pub use terrain::{BiomeType, TerrainGenerator};
