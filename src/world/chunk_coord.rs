use glam::{IVec2, IVec3};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;

/// Width of a chunk (and a land plot) in blocks.
pub const CHUNK_SIZE: i32 = 16;
pub const WORLD_HEIGHT: i32 = 64;
/// Land plots per side of the purchasable world.
pub const WORLD_SIZE: i32 = 10;

/// Column coordinate of a 16×16 chunk. Chunks span the full world height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord(pub IVec2);

impl Serialize for ChunkCoord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.0.x, self.0.y).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChunkCoord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (x, z) = <(i32, i32)>::deserialize(deserializer)?;
        Ok(ChunkCoord::new(x, z))
    }
}

impl PartialOrd for ChunkCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChunkCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x().cmp(&other.x()).then(self.z().cmp(&other.z()))
    }
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self(IVec2::new(x, z))
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn z(&self) -> i32 {
        self.0.y
    }

    pub fn from_block(x: i32, z: i32) -> Self {
        Self::new(x.div_euclid(CHUNK_SIZE), z.div_euclid(CHUNK_SIZE))
    }

    pub fn from_world(x: f32, z: f32) -> Self {
        Self::from_block(x.floor() as i32, z.floor() as i32)
    }

    pub fn containing(pos: IVec3) -> Self {
        Self::from_block(pos.x, pos.z)
    }

    /// World-space block coordinate of the chunk's minimum corner.
    pub fn origin(&self) -> IVec2 {
        self.0 * CHUNK_SIZE
    }

    /// Land token id, numbered x-major across the `WORLD_SIZE` grid.
    pub fn land_id(&self) -> Option<u32> {
        self.in_land_grid()
            .then(|| (self.x() * WORLD_SIZE + self.z()) as u32)
    }

    pub fn from_land_id(id: u32) -> Option<Self> {
        let id = i32::try_from(id).ok().filter(|&id| id < WORLD_SIZE * WORLD_SIZE)?;
        Some(Self::new(id / WORLD_SIZE, id % WORLD_SIZE))
    }

    pub fn in_land_grid(&self) -> bool {
        (0..WORLD_SIZE).contains(&self.x()) && (0..WORLD_SIZE).contains(&self.z())
    }

    /// Every coordinate within `radius` chunks of `self` (a square).
    pub fn square_around(&self, radius: i32) -> impl Iterator<Item = ChunkCoord> + '_ {
        (-radius..=radius)
            .flat_map(move |dx| (-radius..=radius).map(move |dz| Self(self.0 + IVec2::new(dx, dz))))
    }
}

impl From<IVec2> for ChunkCoord {
    fn from(vec: IVec2) -> Self {
        Self(vec)
    }
}

impl From<ChunkCoord> for IVec2 {
    fn from(coord: ChunkCoord) -> Self {
        coord.0
    }
}
