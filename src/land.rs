//! Ownable/rentable land plots. Plot state is mock data generated per
//! session; buy and rent go out as contract writes through the wallet.

use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::utils::units::WEI_PER_ETHER;
use crate::utils::error::{GameError, Result};
use crate::wallet::{ContractCall, TxHash, WalletConnector};
use crate::world::{ChunkCoord, WORLD_SIZE};

pub const LAND_PRICE: u128 = WEI_PER_ETHER / 1_000;
pub const RENT_PRICE_PER_DAY: u128 = WEI_PER_ETHER / 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandChunk {
    pub id: u32,
    pub x: i32,
    pub z: i32,
    pub owner: Option<String>,
    pub renter: Option<String>,
    pub is_for_sale: bool,
    pub sale_price: Option<u32>,
    pub rent_price: Option<u32>,
    pub rent_duration: Option<u32>,
}

impl LandChunk {
    pub fn coord(&self) -> ChunkCoord {
        ChunkCoord::new(self.x, self.z)
    }

    pub fn status(&self) -> LandStatus {
        let owned = self.owner.is_some();
        let rented = self.renter.is_some();
        LandStatus {
            owned,
            rented,
            available: !owned && !rented,
            price: if owned { None } else { self.sale_price },
            rent_price: if owned && !rented { self.rent_price } else { None },
            owner: self.owner.clone(),
            renter: self.renter.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LandStatus {
    pub owned: bool,
    pub rented: bool,
    pub available: bool,
    pub price: Option<u32>,
    pub rent_price: Option<u32>,
    pub owner: Option<String>,
    pub renter: Option<String>,
}

#[derive(Debug)]
pub struct LandRegistry {
    contract: String,
    chunks: Vec<LandChunk>,
    last_action: Option<String>,
    last_hash: Option<TxHash>,
}

impl LandRegistry {
    /// Fills the grid with random sale/rent/owner state.
    pub fn generate(contract: impl Into<String>, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut chunks = Vec::with_capacity((WORLD_SIZE * WORLD_SIZE) as usize);

        for id in 0..(WORLD_SIZE * WORLD_SIZE) as u32 {
            let Some(coord) = ChunkCoord::from_land_id(id) else {
                continue;
            };
            chunks.push(LandChunk {
                id,
                x: coord.x(),
                z: coord.z(),
                is_for_sale: rng.gen_bool(0.3),
                sale_price: rng.gen_bool(0.5).then(|| rng.gen_range(100..1100)),
                rent_price: rng.gen_bool(0.4).then(|| rng.gen_range(10..60)),
                owner: rng.gen_bool(0.2).then(|| random_address(&mut rng)),
                renter: None,
                rent_duration: None,
            });
        }

        Self {
            contract: contract.into(),
            chunks,
            last_action: None,
            last_hash: None,
        }
    }

    pub fn chunks(&self) -> &[LandChunk] {
        &self.chunks
    }

    pub fn chunk(&self, plot_id: u32) -> Option<&LandChunk> {
        self.chunks.get(plot_id as usize)
    }

    pub fn status(&self, plot_id: u32) -> Result<LandStatus> {
        self.chunk(plot_id)
            .map(LandChunk::status)
            .ok_or(GameError::PlotNotFound(plot_id))
    }

    pub fn for_sale(&self) -> impl Iterator<Item = &LandChunk> {
        self.chunks.iter().filter(|c| c.is_for_sale && c.owner.is_none())
    }

    pub fn owned_by<'a>(&'a self, address: &'a str) -> impl Iterator<Item = &'a LandChunk> + 'a {
        self.chunks
            .iter()
            .filter(move |c| c.owner.as_deref().is_some_and(|o| o.eq_ignore_ascii_case(address)))
    }

    pub fn last_action(&self) -> Option<&str> {
        self.last_action.as_deref()
    }

    pub fn last_hash(&self) -> Option<&str> {
        self.last_hash.as_deref()
    }

    /// `mintLand(plotId)` paying the flat land price.
    pub async fn buy_land<W: WalletConnector>(&mut self, wallet: &W, plot_id: u32) -> Result<TxHash> {
        let buyer = wallet.session().require_address()?.to_string();
        if self.chunk(plot_id).is_none() {
            return Err(GameError::PlotNotFound(plot_id));
        }

        info!("Purchasing land plot {}", plot_id);
        self.last_action = Some(format!("Buying Plot {plot_id}"));

        let call = ContractCall::new(&self.contract, "mintLand")
            .arg(plot_id)
            .value(LAND_PRICE);
        let hash = self.send(wallet, call).await?;

        if let Some(chunk) = self.chunks.get_mut(plot_id as usize) {
            chunk.owner = Some(buyer);
            chunk.is_for_sale = false;
        }
        Ok(hash)
    }

    /// `rentLand(plotId, duration)` paying the daily rate for each day.
    pub async fn rent_land<W: WalletConnector>(
        &mut self,
        wallet: &W,
        plot_id: u32,
        days: u32,
    ) -> Result<TxHash> {
        let renter = wallet.session().require_address()?.to_string();
        if self.chunk(plot_id).is_none() {
            return Err(GameError::PlotNotFound(plot_id));
        }
        if days == 0 {
            return Err(GameError::InvalidRentDuration(days));
        }

        info!("Renting land plot {} for {} days", plot_id, days);
        self.last_action = Some(format!("Renting Plot {plot_id}"));

        let call = ContractCall::new(&self.contract, "rentLand")
            .arg(plot_id)
            .arg(days)
            .value(RENT_PRICE_PER_DAY * u128::from(days));
        let hash = self.send(wallet, call).await?;

        if let Some(chunk) = self.chunks.get_mut(plot_id as usize) {
            chunk.renter = Some(renter);
            chunk.rent_duration = Some(days);
        }
        Ok(hash)
    }

    /// `mintLand(chunkX, chunkZ)` for the land under a world chunk.
    pub async fn mint_land_at<W: WalletConnector>(
        &mut self,
        wallet: &W,
        coord: ChunkCoord,
    ) -> Result<TxHash> {
        let buyer = wallet.session().require_address()?.to_string();
        let plot_id = coord
            .land_id()
            .ok_or(GameError::OutsideLandGrid(coord.x(), coord.z()))?;

        self.last_action = Some(format!("Minting Land ({}, {})", coord.x(), coord.z()));
        let call = ContractCall::new(&self.contract, "mintLand")
            .arg(coord.x() as u32)
            .arg(coord.z() as u32)
            .value(LAND_PRICE);
        let hash = self.send(wallet, call).await?;

        if let Some(chunk) = self.chunks.get_mut(plot_id as usize) {
            chunk.owner = Some(buyer);
            chunk.is_for_sale = false;
        }
        Ok(hash)
    }

    async fn send<W: WalletConnector>(&mut self, wallet: &W, call: ContractCall) -> Result<TxHash> {
        let function = call.function;
        match wallet.write_contract(call).await {
            Ok(hash) => {
                self.last_hash = Some(hash.clone());
                Ok(hash)
            }
            Err(e) => {
                warn!("Land {} failed: {}", function, e);
                Err(e.into())
            }
        }
    }
}

/// 20 random bytes as a lowercase hex address.
fn random_address(rng: &mut impl Rng) -> String {
    format!("0x{:032x}{:08x}", rng.gen::<u128>(), rng.gen::<u32>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::address::is_evm_address;
    use crate::wallet::{AbiValue, SimulatedWallet, WalletError};

    const BUYER: &str = "0x2222222222222222222222222222222222222222";

    fn connected_wallet() -> SimulatedWallet {
        let wallet = SimulatedWallet::default();
        wallet.connect(BUYER, 84532, WEI_PER_ETHER);
        wallet
    }

    #[test]
    fn test_grid_layout() {
        let registry = LandRegistry::generate("0xland", 7);
        assert_eq!(registry.chunks().len(), 100);
        let plot = registry.chunk(23).unwrap();
        assert_eq!((plot.x, plot.z), (2, 3));
        assert!(registry.chunks().iter().all(|c| {
            c.sale_price.map_or(true, |p| (100..1100).contains(&p))
                && c.rent_price.map_or(true, |p| (10..60).contains(&p))
        }));
    }

    #[test]
    fn test_same_seed_same_plots() {
        let a = LandRegistry::generate("0xland", 42);
        let b = LandRegistry::generate("0xland", 42);
        assert_eq!(a.chunks(), b.chunks());
    }

    #[test]
    fn test_mock_owners_are_full_addresses() {
        let registry = LandRegistry::generate("0xland", 11);
        let owners: Vec<&str> = registry
            .chunks()
            .iter()
            .filter_map(|c| c.owner.as_deref())
            .collect();
        assert!(!owners.is_empty());
        assert!(owners.iter().all(|o| is_evm_address(o)));
    }

    #[test]
    fn test_status_is_consistent() {
        let registry = LandRegistry::generate("0xland", 3);
        for chunk in registry.chunks() {
            let status = chunk.status();
            assert_eq!(status.available, !status.owned && !status.rented);
            if status.owned {
                assert!(status.price.is_none());
                assert!(status.owner.is_some());
            }
        }
        assert!(matches!(registry.status(100), Err(GameError::PlotNotFound(100))));
    }

    #[tokio::test]
    async fn test_buy_requires_wallet() {
        let mut registry = LandRegistry::generate("0xland", 1);
        let result = registry.buy_land(&SimulatedWallet::default(), 5).await;
        assert!(matches!(result, Err(GameError::Wallet(WalletError::NotConnected))));
        assert!(registry.last_action().is_none());
    }

    #[tokio::test]
    async fn test_buy_and_rent() {
        let wallet = connected_wallet();
        let mut registry = LandRegistry::generate("0xland", 1);

        registry.buy_land(&wallet, 5).await.unwrap();
        assert_eq!(registry.last_action(), Some("Buying Plot 5"));
        assert!(registry.status(5).unwrap().owned);
        assert!(registry.owned_by(BUYER).any(|c| c.id == 5));

        registry.rent_land(&wallet, 6, 3).await.unwrap();
        let calls = wallet.calls();
        assert_eq!(calls[0].function, "mintLand");
        assert_eq!(calls[0].value, LAND_PRICE);
        assert_eq!(calls[1].function, "rentLand");
        assert_eq!(calls[1].args, vec![AbiValue::Uint(6), AbiValue::Uint(3)]);
        assert_eq!(calls[1].value, 300_000_000_000_000);
        assert!(registry.status(6).unwrap().rented);
    }

    #[tokio::test]
    async fn test_rent_rejects_zero_days() {
        let wallet = connected_wallet();
        let mut registry = LandRegistry::generate("0xland", 1);
        let result = registry.rent_land(&wallet, 6, 0).await;
        assert!(matches!(result, Err(GameError::InvalidRentDuration(0))));
        assert!(wallet.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mint_land_at_coord() {
        let wallet = connected_wallet();
        let mut registry = LandRegistry::generate("0xland", 1);
        registry.mint_land_at(&wallet, ChunkCoord::new(4, 9)).await.unwrap();
        assert_eq!(wallet.calls()[0].args, vec![AbiValue::Uint(4), AbiValue::Uint(9)]);
        assert!(registry.status(49).unwrap().owned);

        let outside = registry.mint_land_at(&wallet, ChunkCoord::new(-1, 0)).await;
        assert!(matches!(outside, Err(GameError::OutsideLandGrid(-1, 0))));
    }
}
