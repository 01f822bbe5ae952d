pub mod block_id;
pub mod blocks_data;
pub mod chunk;
pub mod chunk_coord;
pub mod core;
pub mod generator;

// Re-export commonly used types
pub use block_id::{BlockId, Rarity};
pub use blocks_data::{block_by_name, BlockType, BLOCK_TYPES};
pub use chunk::{Chunk, SerializedChunk};
pub use chunk_coord::{ChunkCoord, CHUNK_SIZE, WORLD_HEIGHT, WORLD_SIZE};
pub use self::core::World;
pub use generator::{BiomeType, TerrainGenerator};
