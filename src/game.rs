//! One client session: the world, the avatar and the NFT hooks that act
//! through the connected wallet.

use glam::IVec3;
use log::{debug, warn};

use crate::config::AppConfig;
use crate::land::{LandChunk, LandRegistry};
use crate::marketplace::Marketplace;
use crate::player::{Player, PlayerInput};
use crate::resource::{Harvest, ResourceHarvester, ResourceKind};
use crate::utils::GameError;
use crate::wallet::{self, Contract, WalletConnector};
use crate::world::blocks_data::hotbar_blocks;
use crate::world::{BlockId, ChunkCoord, World};

const DEMO_CONTRACT: &str = "0x9a3a4D73d33be7Ca333974377f473f3951fe8EbF";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mined {
    pub block: BlockId,
    pub harvest: Option<Harvest>,
}

pub struct GameSession<W> {
    pub world: World,
    pub player: Player,
    pub land: LandRegistry,
    pub resources: ResourceHarvester,
    pub marketplace: Marketplace,
    pub wallet: W,
    selected_block: BlockId,
    load_distance: i32,
}

impl<W: WalletConnector> GameSession<W> {
    /// Generates the world around spawn and drops the player above the platform.
    pub fn new(config: &AppConfig, wallet: W, mock_seed: u64) -> Self {
        let world = World::generate(config.worldgen.clone());
        let spawn_ground = world.generator().spawn_height() as f32;
        let contracts = &config.chain.contracts;
        let address = |c: Contract| contracts.get(c).unwrap_or(DEMO_CONTRACT).to_string();

        Self {
            player: Player::new(config.gameplay.clone(), spawn_ground),
            land: LandRegistry::generate(address(Contract::Land), mock_seed),
            resources: ResourceHarvester::seeded(address(Contract::Resources), mock_seed),
            marketplace: Marketplace::default(),
            selected_block: hotbar_blocks()[0].id,
            load_distance: config.worldgen.load_distance,
            world,
            wallet,
        }
    }

    pub fn selected_block(&self) -> BlockId {
        self.selected_block
    }

    /// Advances the player one frame and streams chunks around them. Chunks
    /// more than one ring past the load distance are dropped.
    pub fn tick(&mut self, dt: f32, input: &PlayerInput) {
        if let Some(block) = input.selected_slot.and_then(|slot| hotbar_blocks().get(slot)) {
            self.selected_block = block.id;
        }

        let world = &self.world;
        self.player
            .update(dt, input, |x, z| world.ground_height(x, z));

        let pos = self.player.position;
        let center = ChunkCoord::from_world(pos.x, pos.z);
        let added = self.world.load_around(center, self.load_distance);
        let dropped = self.world.unload_outside(center, self.load_distance + 1);
        if added > 0 || dropped > 0 {
            debug!("Streamed {} chunks in, {} out", added, dropped);
        }
    }

    /// Breaks the block at `pos`. With a wallet connected, mappable blocks
    /// also roll for a resource mint.
    pub async fn mine(&mut self, pos: IVec3) -> Option<Mined> {
        let block = self.world.mine_block(pos)?;
        let mut mined = Mined {
            block,
            harvest: None,
        };
        if !self.wallet.session().is_connected() || ResourceKind::from_block(block).is_none() {
            return Some(mined);
        }

        match self.resources.harvest(&self.wallet, block, 1).await {
            Ok(harvest) => mined.harvest = Some(harvest),
            Err(GameError::Wallet(e)) => {
                warn!("Resource mint failed: {}", wallet::user_message(&e.to_string()))
            }
            Err(e) => warn!("Resource mint failed: {}", e),
        }
        Some(mined)
    }

    pub fn place(&mut self, pos: IVec3) -> bool {
        self.world.place_block(pos, self.selected_block)
    }

    /// Land plot under the player's feet, if inside the grid.
    pub fn current_plot(&self) -> Option<&LandChunk> {
        let pos = self.player.position;
        ChunkCoord::from_world(pos.x, pos.z)
            .land_id()
            .and_then(|id| self.land.chunk(id))
    }
}
