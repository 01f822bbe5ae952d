use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

use crate::world::blocks_data::{BlockType, BLOCK_TYPES};

/// Rarity tier shared by blocks, outfits, resources and listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    /// Chance that mining a resource of this tier yields a mint.
    pub fn harvest_chance(&self) -> f64 {
        match self {
            Self::Common => 0.8,
            Self::Uncommon => 0.5,
            Self::Rare => 0.3,
            Self::Epic => 0.1,
            Self::Legendary => 0.05,
        }
    }
}

impl Display for Rarity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
    pub const GRASS: BlockId = BlockId(1);
    pub const DIRT: BlockId = BlockId(2);
    pub const STONE: BlockId = BlockId(3);
    pub const DIAMOND: BlockId = BlockId(4);
    pub const GOLD: BlockId = BlockId(5);
    pub const RUBY: BlockId = BlockId(6);
    pub const EMERALD: BlockId = BlockId(7);
    pub const OBSIDIAN: BlockId = BlockId(8);
    pub const RAINBOW: BlockId = BlockId(9);
    pub const SAND: BlockId = BlockId(10);
    pub const WATER: BlockId = BlockId(11);

    pub fn get_id(&self) -> u16 {
        self.0
    }

    pub fn is_air(&self) -> bool {
        *self == Self::AIR
    }

    pub fn block_type(&self) -> Option<&'static BlockType> {
        BLOCK_TYPES.iter().find(|b| b.id == *self)
    }

    pub fn name(&self) -> &'static str {
        self.block_type().map_or("Air", |b| b.name)
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::AIR
    }
}

impl Display for BlockId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u16> for BlockId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<BlockId> for u16 {
    fn from(id: BlockId) -> u16 {
        id.0
    }
}
