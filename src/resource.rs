//! Harvestable resources. Mining a block may mint an ERC-1155 resource
//! token, gated by a rarity roll.

use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::utils::error::{GameError, Result};
use crate::wallet::{ContractCall, TxHash, WalletConnector};
use crate::world::{block_by_name, BlockId, Rarity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Wood,
    Stone,
    Iron,
    Gold,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInfo {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub rarity: Rarity,
    pub color: &'static str,
    pub base_value: u64,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        Self::Wood,
        Self::Stone,
        Self::Iron,
        Self::Gold,
        Self::Diamond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wood => "wood",
            Self::Stone => "stone",
            Self::Iron => "iron",
            Self::Gold => "gold",
            Self::Diamond => "diamond",
        }
    }

    /// Token id on the resources contract.
    pub fn contract_id(&self) -> u32 {
        match self {
            Self::Wood => 1,
            Self::Stone => 2,
            Self::Iron => 3,
            Self::Gold => 4,
            Self::Diamond => 5,
        }
    }

    pub fn info(&self) -> ResourceInfo {
        let (rarity, color, base_value) = match self {
            Self::Wood => (Rarity::Common, "#8B4513", 10),
            Self::Stone => (Rarity::Common, "#696969", 15),
            Self::Iron => (Rarity::Uncommon, "#C0C0C0", 50),
            Self::Gold => (Rarity::Rare, "#FFD700", 100),
            Self::Diamond => (Rarity::Legendary, "#B9F2FF", 500),
        };
        ResourceInfo {
            kind: *self,
            rarity,
            color,
            base_value,
        }
    }

    pub fn from_block(block: BlockId) -> Option<Self> {
        match block {
            BlockId::GRASS => Some(Self::Wood),
            BlockId::DIRT | BlockId::STONE | BlockId::OBSIDIAN => Some(Self::Stone),
            BlockId::DIAMOND => Some(Self::Diamond),
            BlockId::GOLD => Some(Self::Gold),
            BlockId::EMERALD => Some(Self::Iron),
            _ => None,
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = GameError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::InvalidResource(s.to_string()))
    }
}

/// Resource yielded by a block given by display name ("Diamond", "Gold Block", ...).
pub fn resource_for_block_name(name: &str) -> Result<ResourceKind> {
    block_by_name(name)
        .and_then(|b| ResourceKind::from_block(b.id))
        .ok_or_else(|| GameError::NoResourceMapping(name.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Harvest {
    Minted {
        resource: ResourceKind,
        amount: u32,
        hash: TxHash,
    },
    /// Rarity roll failed; nothing was sent.
    Skipped { resource: ResourceKind },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    pub amount: u32,
    pub resource: ResourceInfo,
    pub value: u64,
}

#[derive(Debug)]
pub struct ResourceHarvester {
    contract: String,
    rng: ChaCha8Rng,
    inventory: BTreeMap<ResourceKind, u32>,
    last_harvested: Option<String>,
}

impl ResourceHarvester {
    pub fn seeded(contract: impl Into<String>, seed: u64) -> Self {
        Self::with_rng(contract, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(contract: impl Into<String>, rng: ChaCha8Rng) -> Self {
        Self {
            contract: contract.into(),
            rng,
            inventory: BTreeMap::new(),
            last_harvested: None,
        }
    }

    pub fn last_harvested(&self) -> Option<&str> {
        self.last_harvested.as_deref()
    }

    /// Mines `amount` of the resource behind `block`.
    pub async fn harvest<W: WalletConnector>(
        &mut self,
        wallet: &W,
        block: BlockId,
        amount: u32,
    ) -> Result<Harvest> {
        let to = wallet.session().require_address()?.to_string();
        let resource = ResourceKind::from_block(block)
            .ok_or_else(|| GameError::NoResourceMapping(block.name().to_string()))?;

        self.last_harvested = Some(format!("{amount}x {resource}"));

        let chance = resource.info().rarity.harvest_chance();
        if !self.rng.gen_bool(chance) {
            debug!("Harvest roll failed for {}", resource);
            return Ok(Harvest::Skipped { resource });
        }

        let call = ContractCall::new(&self.contract, "mintResource")
            .address_arg(to)
            .arg(resource.contract_id())
            .arg(amount);
        let hash = wallet.write_contract(call).await?;

        *self.inventory.entry(resource).or_default() += amount;
        info!("Harvested {}x {}", amount, resource);
        Ok(Harvest::Minted {
            resource,
            amount,
            hash,
        })
    }

    pub fn inventory(&self) -> Vec<InventoryItem> {
        self.inventory
            .iter()
            .map(|(&kind, &amount)| {
                let resource = kind.info();
                InventoryItem {
                    kind,
                    amount,
                    resource,
                    value: resource.base_value * u64::from(amount),
                }
            })
            .collect()
    }

    pub fn total_value(&self) -> u64 {
        self.inventory().iter().map(|item| item.value).sum()
    }
}
