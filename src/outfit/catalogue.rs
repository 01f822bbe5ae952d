use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;

use crate::utils::units::{parse_ether, WEI_PER_ETHER};
use crate::utils::GameError;
use crate::wallet::ContractCall;
use crate::world::Rarity;

/// Every player owns the Explorer outfit.
pub const STARTER_OUTFIT: u32 = 1;

const DEFAULT_MINT_PRICE: u128 = WEI_PER_ETHER / 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutfitColors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutfitParts {
    pub head: &'static str,
    pub body: &'static str,
    pub legs: &'static str,
    pub feet: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outfit {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    pub mintable: bool,
    pub colors: OutfitColors,
    pub parts: OutfitParts,
    /// Mint price in ETH, as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<&'static str>,
}

impl Outfit {
    pub fn price_wei(&self) -> u128 {
        self.price
            .and_then(|p| parse_ether(p).ok())
            .unwrap_or(DEFAULT_MINT_PRICE)
    }

    pub fn total_supply(&self) -> u32 {
        match self.rarity {
            Rarity::Legendary => 100,
            Rarity::Epic => 500,
            _ => 1000,
        }
    }

    /// OpenSea-style metadata, inlined as a data URI.
    pub fn metadata_uri(&self) -> String {
        let metadata = json!({
            "name": self.name,
            "description": self.description,
            "external_url": "https://blockcraft.game",
            "attributes": [
                { "trait_type": "Rarity", "value": self.rarity },
                { "trait_type": "Type", "value": "Outfit" },
                { "trait_type": "Game", "value": "Blockcraft" },
                { "trait_type": "Head", "value": self.parts.head },
                { "trait_type": "Body", "value": self.parts.body },
                { "trait_type": "Legs", "value": self.parts.legs },
                { "trait_type": "Feet", "value": self.parts.feet },
                { "trait_type": "Primary Color", "value": self.colors.primary },
                { "trait_type": "Secondary Color", "value": self.colors.secondary },
                { "trait_type": "Accent Color", "value": self.colors.accent },
            ]
        });
        format!("data:application/json;utf8,{metadata}")
    }
}

pub static OUTFITS: [Outfit; 5] = [
    Outfit {
        id: 1,
        name: "Explorer",
        description: "A basic explorer outfit for new adventurers",
        rarity: Rarity::Common,
        mintable: false,
        colors: OutfitColors {
            primary: "#8B4513",
            secondary: "#DEB887",
            accent: "#654321",
        },
        parts: OutfitParts {
            head: "brown_cap",
            body: "leather_vest",
            legs: "brown_pants",
            feet: "leather_boots",
        },
        price: None,
    },
    Outfit {
        id: 2,
        name: "Cyber Punk",
        description: "Futuristic cyber outfit with neon accents",
        rarity: Rarity::Rare,
        mintable: true,
        colors: OutfitColors {
            primary: "#0F0F23",
            secondary: "#00FFFF",
            accent: "#FF00FF",
        },
        parts: OutfitParts {
            head: "cyber_helmet",
            body: "neon_jacket",
            legs: "tech_pants",
            feet: "cyber_boots",
        },
        price: Some("0.0001"),
    },
    Outfit {
        id: 3,
        name: "Royal Knight",
        description: "Noble knight armor with golden details",
        rarity: Rarity::Epic,
        mintable: true,
        colors: OutfitColors {
            primary: "#4A4A4A",
            secondary: "#FFD700",
            accent: "#8B0000",
        },
        parts: OutfitParts {
            head: "knight_helmet",
            body: "plate_armor",
            legs: "armored_legs",
            feet: "steel_boots",
        },
        price: Some("0.0002"),
    },
    Outfit {
        id: 4,
        name: "Space Marine",
        description: "Advanced space marine combat suit",
        rarity: Rarity::Epic,
        mintable: true,
        colors: OutfitColors {
            primary: "#2E2E2E",
            secondary: "#0080FF",
            accent: "#FF4500",
        },
        parts: OutfitParts {
            head: "space_helmet",
            body: "combat_suit",
            legs: "tactical_pants",
            feet: "mag_boots",
        },
        price: Some("0.0003"),
    },
    Outfit {
        id: 5,
        name: "Rainbow Mystic",
        description: "Legendary mystic outfit that changes colors",
        rarity: Rarity::Legendary,
        mintable: true,
        colors: OutfitColors {
            primary: "#FF6B6B",
            secondary: "#4ECDC4",
            accent: "#45B7D1",
        },
        parts: OutfitParts {
            head: "mystic_crown",
            body: "rainbow_robe",
            legs: "mystic_pants",
            feet: "ethereal_boots",
        },
        price: Some("0.0005"),
    },
];

pub fn outfit_by_id(id: u32) -> Option<&'static Outfit> {
    OUTFITS.iter().find(|o| o.id == id)
}

/// Catalogue entry as seen by one player.
#[derive(Debug, Clone, Serialize)]
pub struct OutfitView {
    #[serde(flatten)]
    pub outfit: &'static Outfit,
    pub owned: bool,
    pub selected: bool,
}

impl OutfitView {
    pub fn catalogue(owned: &BTreeSet<u32>, selected: u32) -> Vec<Self> {
        OUTFITS
            .iter()
            .map(|outfit| Self {
                outfit,
                owned: outfit.id == STARTER_OUTFIT || owned.contains(&outfit.id),
                selected: outfit.id == selected,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceOutfit {
    pub id: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub rarity: Rarity,
    pub price: Option<&'static str>,
    pub colors: OutfitColors,
    pub total_minted: u32,
    pub total_supply: u32,
}

impl MarketplaceOutfit {
    pub fn listings() -> Vec<Self> {
        OUTFITS
            .iter()
            .filter(|o| o.mintable)
            .map(|o| Self {
                id: o.id,
                name: o.name,
                description: o.description,
                rarity: o.rarity,
                price: o.price,
                colors: o.colors,
                total_minted: 0,
                total_supply: o.total_supply(),
            })
            .collect()
    }
}

/// `mint(to, metadataURI, name, rarity)` on the outfits contract, paying the outfit price.
pub fn mint_call(outfit: &Outfit, contract: &str, to: &str) -> Result<ContractCall, GameError> {
    if !outfit.mintable {
        return Err(GameError::NotMintable(outfit.id));
    }
    Ok(ContractCall::new(contract, "mint")
        .address_arg(to)
        .arg(outfit.metadata_uri().as_str())
        .arg(outfit.name)
        .arg(outfit.rarity.as_str())
        .value(outfit.price_wei()))
}
