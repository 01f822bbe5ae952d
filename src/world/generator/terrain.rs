use glam::IVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

use crate::config::WorldGenConfig;
use crate::world::block_id::BlockId;
use crate::world::chunk::Chunk;
use crate::world::chunk_coord::{ChunkCoord, CHUNK_SIZE};

/// Depth of the dirt band beneath the surface block.
const DIRT_DEPTH: i32 = 3;
/// Ores only appear at or below this height.
const ORE_CEILING: i32 = 5;
const DIAMOND_CEILING: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiomeType {
    Water,
    Desert,
    Forest,
    Mountain,
}

impl BiomeType {
    pub fn surface_block(&self) -> BlockId {
        match self {
            Self::Forest => BlockId::GRASS,
            Self::Desert => BlockId::SAND,
            Self::Mountain => BlockId::STONE,
            Self::Water => BlockId::WATER,
        }
    }
}

/// Closed-form sine heightmap with biome surfaces, ore pockets and trees.
#[derive(Debug, Clone)]
pub struct TerrainGenerator {
    config: WorldGenConfig,
}

impl Default for TerrainGenerator {
    fn default() -> Self {
        Self::new(WorldGenConfig::default())
    }
}

impl TerrainGenerator {
    pub fn new(config: WorldGenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WorldGenConfig {
        &self.config
    }

    /// Surface height at a world position; never below 1.
    pub fn height_at(&self, x: f64, z: f64) -> i32 {
        let c = &self.config;
        let base = (x * c.base_frequency).sin() * (z * c.base_frequency).cos() * c.base_amplitude;
        let detail =
            (x * c.detail_frequency).sin() * (z * c.detail_frequency).cos() * c.detail_amplitude;
        ((c.base_height + base + detail).floor() as i32).max(1)
    }

    pub fn biome_at(&self, x: f64, z: f64) -> BiomeType {
        let f = self.config.biome_frequency;
        let n = (x * f).sin() + (z * f).cos();
        if n < -0.5 {
            BiomeType::Water
        } else if n < 0.0 {
            BiomeType::Desert
        } else if n < 0.5 {
            BiomeType::Forest
        } else {
            BiomeType::Mountain
        }
    }

    pub fn spawn_distance(x: i32, z: i32) -> f64 {
        ((x * x + z * z) as f64).sqrt()
    }

    pub fn in_spawn_area(&self, x: i32, z: i32) -> bool {
        Self::spawn_distance(x, z) <= self.config.spawn_safe_radius
    }

    /// Ground height the spawn platform's grass sits at.
    pub fn spawn_height(&self) -> i32 {
        self.config.spawn_platform_height
    }

    pub fn generate_chunk(&self, coord: ChunkCoord) -> Chunk {
        let mut chunk = Chunk::new(coord);
        let mut rng = self.chunk_rng(coord);
        let origin = coord.origin();

        for lx in 0..CHUNK_SIZE {
            for lz in 0..CHUNK_SIZE {
                let x = origin.x + lx;
                let z = origin.y + lz;

                if self.in_spawn_area(x, z) {
                    self.place_spawn_column(&mut chunk, x, z);
                    continue;
                }

                let height = self.height_at(x as f64, z as f64);
                let biome = self.biome_at(x as f64, z as f64);

                for y in 0..=height {
                    let id = if y == height {
                        biome.surface_block()
                    } else if y >= height - DIRT_DEPTH {
                        BlockId::DIRT
                    } else if y <= ORE_CEILING {
                        Self::pick_ore(y, rng.gen())
                    } else {
                        BlockId::STONE
                    };
                    chunk.set_block(IVec3::new(x, y, z), id);
                }

                let clear_of_spawn =
                    Self::spawn_distance(x, z) > self.config.spawn_safe_radius * 2.0;
                if biome == BiomeType::Forest
                    && rng.gen::<f64>() < self.config.tree_chance
                    && clear_of_spawn
                {
                    chunk.add_tree(IVec3::new(x, height + 1, z));
                }
            }
        }

        chunk
    }

    fn place_spawn_column(&self, chunk: &mut Chunk, x: i32, z: i32) {
        if !(-2..=2).contains(&x) || !(-2..=2).contains(&z) {
            return;
        }
        let top = self.config.spawn_platform_height;
        for y in top - 2..=top {
            let id = if y == top { BlockId::GRASS } else { BlockId::STONE };
            chunk.set_block(IVec3::new(x, y, z), id);
        }
    }

    fn pick_ore(y: i32, roll: f64) -> BlockId {
        if roll < 0.05 && y <= DIAMOND_CEILING {
            BlockId::DIAMOND
        } else if roll < 0.1 {
            BlockId::GOLD
        } else if roll < 0.2 {
            BlockId::EMERALD
        } else {
            BlockId::STONE
        }
    }

    fn chunk_rng(&self, coord: ChunkCoord) -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(
            self.config
                .world_seed
                .wrapping_add((coord.x() as u64).wrapping_mul(341873128712))
                .wrapping_add((coord.z() as u64).wrapping_mul(132897987541)),
        )
    }
}
