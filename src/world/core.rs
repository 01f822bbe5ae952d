use glam::IVec3;
use log::debug;
use parking_lot::RwLock;
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::WorldGenConfig;
use crate::world::block_id::BlockId;
use crate::world::chunk::Chunk;
use crate::world::chunk_coord::{ChunkCoord, WORLD_HEIGHT};
use crate::world::generator::TerrainGenerator;

/// The loaded portion of the voxel world.
pub struct World {
    generator: Arc<TerrainGenerator>,
    chunks: RwLock<HashMap<ChunkCoord, Chunk>>,
}

impl World {
    pub fn new(generator: Arc<TerrainGenerator>) -> Self {
        Self {
            generator,
            chunks: RwLock::new(HashMap::new()),
        }
    }

    /// Builds the fixed-radius world around spawn described by `config`.
    pub fn generate(config: WorldGenConfig) -> Self {
        let radius = config.load_distance;
        let world = Self::new(Arc::new(TerrainGenerator::new(config)));
        world.load_around(ChunkCoord::new(0, 0), radius);
        world
    }

    pub fn generator(&self) -> &TerrainGenerator {
        &self.generator
    }

    /// Generates every missing chunk within `radius` of `center`, in parallel.
    /// Returns how many chunks were added.
    pub fn load_around(&self, center: ChunkCoord, radius: i32) -> usize {
        let missing: Vec<ChunkCoord> = {
            let chunks = self.chunks.read();
            center
                .square_around(radius)
                .filter(|c| !chunks.contains_key(c))
                .collect()
        };

        let generated: Vec<Chunk> = missing
            .par_iter()
            .map(|coord| self.generator.generate_chunk(*coord))
            .collect();

        let count = generated.len();
        let mut chunks = self.chunks.write();
        for chunk in generated {
            chunks.insert(chunk.coord, chunk);
        }
        debug!("Loaded {} chunks around {:?}", count, center);
        count
    }

    pub fn unload_outside(&self, center: ChunkCoord, radius: i32) -> usize {
        let mut chunks = self.chunks.write();
        let before = chunks.len();
        chunks.retain(|coord, _| {
            (coord.x() - center.x()).abs() <= radius && (coord.z() - center.z()).abs() <= radius
        });
        before - chunks.len()
    }

    pub fn is_loaded(&self, coord: ChunkCoord) -> bool {
        self.chunks.read().contains_key(&coord)
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.read().len()
    }

    pub fn block_count(&self) -> usize {
        self.chunks.read().values().map(Chunk::len).sum()
    }

    pub fn block_at(&self, pos: IVec3) -> BlockId {
        self.chunks
            .read()
            .get(&ChunkCoord::containing(pos))
            .map_or(BlockId::AIR, |c| c.get_block(pos))
    }

    /// Removes a block, returning its type. `None` for air or unloaded chunks.
    pub fn mine_block(&self, pos: IVec3) -> Option<BlockId> {
        self.chunks
            .write()
            .get_mut(&ChunkCoord::containing(pos))
            .and_then(|c| c.take_block(pos))
    }

    /// Places `id` into an empty cell of a loaded chunk, within the world height.
    pub fn place_block(&self, pos: IVec3, id: BlockId) -> bool {
        if !(0..WORLD_HEIGHT).contains(&pos.y) {
            return false;
        }
        let mut chunks = self.chunks.write();
        match chunks.get_mut(&ChunkCoord::containing(pos)) {
            Some(chunk) if chunk.get_block(pos).is_air() && !id.is_air() => {
                chunk.set_block(pos, id);
                true
            }
            _ => false,
        }
    }

    /// Terrain surface height used by the player controller.
    pub fn ground_height(&self, x: f32, z: f32) -> f32 {
        self.generator.height_at(x as f64, z as f64) as f32
    }
}
