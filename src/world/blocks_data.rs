// blocks_data.rs - Block definitions for the Blockcraft world

use serde::Serialize;

use crate::world::block_id::{BlockId, Rarity};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockType {
    pub id: BlockId,
    pub name: &'static str,
    pub color: &'static str,
    pub rarity: Rarity,
    pub mintable: bool,
    pub tradeable: bool,
    pub description: &'static str,
}

const fn block(
    id: BlockId,
    name: &'static str,
    color: &'static str,
    rarity: Rarity,
    mintable: bool,
    description: &'static str,
) -> BlockType {
    BlockType {
        id,
        name,
        color,
        rarity,
        mintable,
        tradeable: mintable,
        description,
    }
}

#[rustfmt::skip]
pub static BLOCK_TYPES: [BlockType; 11] = [
    block(BlockId::GRASS, "Grass", "#4CAF50", Rarity::Common, false, "Basic grass block for terrain"),
    block(BlockId::DIRT, "Dirt", "#8D6E63", Rarity::Common, false, "Simple dirt block"),
    block(BlockId::STONE, "Stone", "#9E9E9E", Rarity::Common, false, "Basic stone block"),
    block(BlockId::DIAMOND, "Diamond Block", "#00E5FF", Rarity::Rare, true, "Sparkling diamond block - mint as NFT!"),
    block(BlockId::GOLD, "Gold Block", "#FFD700", Rarity::Rare, true, "Precious gold block - tradeable NFT"),
    block(BlockId::RUBY, "Ruby Block", "#E91E63", Rarity::Epic, true, "Rare ruby block with magical properties"),
    block(BlockId::EMERALD, "Emerald Block", "#4CAF50", Rarity::Epic, true, "Mystical emerald block"),
    block(BlockId::OBSIDIAN, "Obsidian Block", "#1A1A1A", Rarity::Epic, true, "Volcanic obsidian with unique patterns"),
    block(BlockId::RAINBOW, "Rainbow Block", "#FF6B6B", Rarity::Legendary, true, "Ultra-rare rainbow block - changes colors!"),
    // Terrain-only surfaces, never offered in the hotbar.
    block(BlockId::SAND, "Sand", "#F4A460", Rarity::Common, false, "Desert sand"),
    block(BlockId::WATER, "Water", "#4169E1", Rarity::Common, false, "Still water"),
];

/// Blocks a player can select and place (the first nine).
pub fn hotbar_blocks() -> &'static [BlockType] {
    &BLOCK_TYPES[..9]
}

pub fn mintable_blocks() -> impl Iterator<Item = &'static BlockType> {
    BLOCK_TYPES.iter().filter(|b| b.mintable)
}

/// Accepts both the full name ("Gold Block") and the short form ("Gold").
pub fn block_by_name(name: &str) -> Option<&'static BlockType> {
    let wanted = name.trim();
    BLOCK_TYPES.iter().find(|b| {
        b.name.eq_ignore_ascii_case(wanted)
            || b.name
                .strip_suffix(" Block")
                .is_some_and(|short| short.eq_ignore_ascii_case(wanted))
    })
}
