use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::world::block_id::BlockId;
use crate::world::chunk_coord::{ChunkCoord, WORLD_HEIGHT};

/// A generated 16×16 column of blocks plus the decorations placed on it.
#[derive(Debug, Clone)]
pub struct Chunk {
    pub coord: ChunkCoord,
    blocks: HashMap<IVec3, BlockId>,
    trees: Vec<IVec3>,
}

/// Flat form of a chunk, in generation order, for instanced drawing or saving.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerializedChunk {
    pub coord: ChunkCoord,
    pub blocks: Vec<(IVec3, BlockId)>,
    pub trees: Vec<IVec3>,
}

impl Chunk {
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            blocks: HashMap::new(),
            trees: Vec::new(),
        }
    }

    /// Cells outside `0..WORLD_HEIGHT` are ignored.
    pub fn set_block(&mut self, pos: IVec3, id: BlockId) {
        if !(0..WORLD_HEIGHT).contains(&pos.y) {
            return;
        }
        if id.is_air() {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(pos, id);
        }
    }

    pub fn get_block(&self, pos: IVec3) -> BlockId {
        self.blocks.get(&pos).copied().unwrap_or(BlockId::AIR)
    }

    /// Removes the block at `pos`, returning what was there.
    pub fn take_block(&mut self, pos: IVec3) -> Option<BlockId> {
        self.blocks.remove(&pos)
    }

    pub fn add_tree(&mut self, base: IVec3) {
        self.trees.push(base);
    }

    pub fn trees(&self) -> &[IVec3] {
        &self.trees
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Highest solid block in the column at world `x`, `z`.
    pub fn column_top(&self, x: i32, z: i32) -> Option<i32> {
        self.blocks
            .keys()
            .filter(|p| p.x == x && p.z == z)
            .map(|p| p.y)
            .max()
    }

    pub fn iter(&self) -> impl Iterator<Item = (IVec3, BlockId)> + '_ {
        self.blocks.iter().map(|(p, id)| (*p, *id))
    }

    pub fn serialize(&self) -> SerializedChunk {
        let mut blocks: Vec<_> = self.iter().collect();
        blocks.sort_by_key(|(p, _)| (p.x, p.z, p.y));
        SerializedChunk {
            coord: self.coord,
            blocks,
            trees: self.trees.clone(),
        }
    }

    pub fn from_serialized(data: SerializedChunk) -> Self {
        Self {
            coord: data.coord,
            blocks: data.blocks.into_iter().collect(),
            trees: data.trees,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_take() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        let pos = IVec3::new(1, 5, 2);
        chunk.set_block(pos, BlockId::STONE);
        chunk.set_block(IVec3::new(1, 6, 2), BlockId::GRASS);

        assert_eq!(chunk.get_block(pos), BlockId::STONE);
        assert_eq!(chunk.column_top(1, 2), Some(6));
        assert_eq!(chunk.take_block(pos), Some(BlockId::STONE));
        assert_eq!(chunk.get_block(pos), BlockId::AIR);
        assert_eq!(chunk.take_block(pos), None);
    }

    #[test]
    fn test_setting_air_clears() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set_block(IVec3::ZERO, BlockId::DIRT);
        chunk.set_block(IVec3::ZERO, BlockId::AIR);
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_ignores_cells_outside_height() {
        let mut chunk = Chunk::new(ChunkCoord::new(0, 0));
        chunk.set_block(IVec3::new(0, -1, 0), BlockId::STONE);
        chunk.set_block(IVec3::new(0, WORLD_HEIGHT, 0), BlockId::STONE);
        assert!(chunk.is_empty());
    }

    #[test]
    fn test_serialized_round_trip_keeps_blocks() {
        let mut chunk = Chunk::new(ChunkCoord::new(1, -1));
        chunk.set_block(IVec3::new(16, 3, -5), BlockId::GOLD);
        chunk.add_tree(IVec3::new(17, 9, -4));

        let restored = Chunk::from_serialized(chunk.serialize());
        assert_eq!(restored.get_block(IVec3::new(16, 3, -5)), BlockId::GOLD);
        assert_eq!(restored.trees(), chunk.trees());
    }
}
