//! Demo marketplace. Listings are fixed mock data; purchases are simulated
//! locally and never reach the marketplace contract.

use log::info;
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::utils::error::{GameError, Result};
use crate::utils::units::parse_ether;
use crate::wallet::{short_address, WalletConnector};
use crate::world::Rarity;

const DEMO_CONTRACT: &str = "0x9a3a4D73d33be7Ca333974377f473f3951fe8EbF";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    Outfit,
    Resource,
    Land,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ListingKind,
    /// Asking price in wei.
    pub price: u128,
    pub seller: String,
    pub rarity: Rarity,
    pub token_id: u64,
    pub contract_address: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceStats {
    pub total_listings: usize,
    pub total_volume: u128,
    pub floor_price: u128,
    pub avg_price: u128,
    pub active_listings: usize,
}

#[derive(Debug, Clone)]
pub struct MarketplaceTimings {
    pub confirmation_delay: Duration,
    pub success_ttl: Duration,
}

impl Default for MarketplaceTimings {
    fn default() -> Self {
        Self {
            confirmation_delay: Duration::from_secs(1),
            success_ttl: Duration::from_secs(5),
        }
    }
}

pub fn mock_listings() -> Vec<Listing> {
    #[rustfmt::skip]
    let rows: [(&str, &str, ListingKind, &str, &str, Rarity, u64); 8] = [
        ("1", "Cyber Punk Outfit", ListingKind::Outfit, "0.0001", "0x1234...5678", Rarity::Rare, 1),
        ("2", "Royal Knight Armor", ListingKind::Outfit, "0.0003", "0x2345...6789", Rarity::Epic, 2),
        ("3", "Diamond Block", ListingKind::Resource, "0.0002", "0x3456...7890", Rarity::Rare, 3),
        ("4", "Land Chunk #42", ListingKind::Land, "0.001", "0x4567...8901", Rarity::Common, 42),
        ("5", "Rainbow Mystic Robes", ListingKind::Outfit, "0.0005", "0x5678...9012", Rarity::Legendary, 5),
        ("6", "Gold Ore", ListingKind::Resource, "0.00015", "0x6789...0123", Rarity::Rare, 6),
        ("7", "Prime Land (0,0)", ListingKind::Land, "0.002", "0x7890...1234", Rarity::Rare, 7),
        ("8", "Space Marine Suit", ListingKind::Outfit, "0.00025", "0x8901...2345", Rarity::Epic, 8),
    ];

    rows.into_iter()
        .map(|(id, name, kind, price, seller, rarity, token_id)| Listing {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            price: parse_ether(price).unwrap_or_default(),
            seller: seller.to_string(),
            rarity,
            token_id,
            contract_address: DEMO_CONTRACT.to_string(),
            is_active: true,
        })
        .collect()
}

#[derive(Debug)]
pub struct Marketplace {
    listings: Vec<Listing>,
    purchased: Vec<String>,
    last_action: Option<String>,
    success: Option<(String, Instant)>,
    timings: MarketplaceTimings,
}

impl Default for Marketplace {
    fn default() -> Self {
        Self::new(MarketplaceTimings::default())
    }
}

impl Marketplace {
    pub fn new(timings: MarketplaceTimings) -> Self {
        Self {
            listings: mock_listings(),
            purchased: Vec::new(),
            last_action: None,
            success: None,
            timings,
        }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn purchased(&self) -> &[String] {
        &self.purchased
    }

    /// Cleared together with the success message once that expires.
    pub fn last_action(&self) -> Option<&str> {
        match &self.success {
            Some((_, at)) if at.elapsed() >= self.timings.success_ttl => None,
            _ => self.last_action.as_deref(),
        }
    }

    /// Message from the last purchase, until its display time runs out.
    pub fn success_message(&self) -> Option<&str> {
        self.success
            .as_ref()
            .filter(|(_, at)| at.elapsed() < self.timings.success_ttl)
            .map(|(msg, _)| msg.as_str())
    }

    pub async fn buy<W: WalletConnector>(&mut self, wallet: &W, listing_id: &str) -> Result<()> {
        wallet.session().require_address()?;
        let name = self
            .listings
            .iter()
            .find(|l| l.id == listing_id)
            .map(|l| l.name.clone())
            .ok_or_else(|| GameError::ListingNotFound(listing_id.to_string()))?;

        info!("Buying {} (demo mode)", name);
        self.success = None;
        self.last_action = Some(format!("Buying {name}"));

        tokio::time::sleep(self.timings.confirmation_delay).await;

        self.purchased.push(listing_id.to_string());
        self.last_action = Some(format!("Successfully purchased {name}!"));
        self.success = Some((format!("You now own {name}!"), Instant::now()));
        Ok(())
    }

    pub fn list_for_sale<W: WalletConnector>(
        &mut self,
        wallet: &W,
        token_id: u64,
        price: u128,
        contract: &str,
    ) -> Result<()> {
        wallet.session().require_address()?;
        info!("Listing token #{} of {} for {} wei (demo mode)", token_id, contract, price);
        self.success = None;
        self.last_action = Some(format!("Listing Token #{token_id}"));
        Ok(())
    }

    pub fn cancel_listing<W: WalletConnector>(&mut self, wallet: &W, listing_id: &str) -> Result<()> {
        wallet.session().require_address()?;
        info!("Cancelling listing {} (demo mode)", listing_id);
        self.success = None;
        self.last_action = Some("Cancelling listing".to_string());
        Ok(())
    }

    /// Listings whose seller matches `address`, in full or shortened form.
    pub fn user_listings(&self, address: &str) -> Vec<&Listing> {
        let short = short_address(address);
        self.listings
            .iter()
            .filter(|l| l.seller.eq_ignore_ascii_case(address) || l.seller.eq_ignore_ascii_case(&short))
            .collect()
    }

    pub fn stats(&self) -> MarketplaceStats {
        let total_listings = self.listings.len();
        let total_volume: u128 = self.listings.iter().map(|l| l.price).sum();
        MarketplaceStats {
            total_listings,
            total_volume,
            floor_price: self.listings.iter().map(|l| l.price).min().unwrap_or(0),
            avg_price: total_volume.checked_div(total_listings as u128).unwrap_or(0),
            active_listings: self.listings.iter().filter(|l| l.is_active).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::units::format_ether;
    use crate::wallet::{SimulatedWallet, WalletError};

    fn quick() -> Marketplace {
        Marketplace::new(MarketplaceTimings {
            confirmation_delay: Duration::ZERO,
            success_ttl: Duration::from_millis(50),
        })
    }

    fn wallet(address: &str) -> SimulatedWallet {
        let wallet = SimulatedWallet::default();
        wallet.connect(address, 84532, 0);
        wallet
    }

    #[test]
    fn test_stats() {
        let stats = Marketplace::default().stats();
        assert_eq!(stats.total_listings, 8);
        assert_eq!(stats.active_listings, 8);
        assert_eq!(format_ether(stats.total_volume), "0.0045");
        assert_eq!(format_ether(stats.floor_price), "0.0001");
        assert_eq!(format_ether(stats.avg_price), "0.0005625");
    }

    #[tokio::test]
    async fn test_buy_flow() {
        let wallet = wallet("0x4444444444444444444444444444444444444444");
        let mut market = quick();

        market.buy(&wallet, "3").await.unwrap();
        assert_eq!(market.purchased(), &["3".to_string()]);
        assert_eq!(market.success_message(), Some("You now own Diamond Block!"));
        assert_eq!(market.last_action(), Some("Successfully purchased Diamond Block!"));

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(market.success_message(), None);
        assert_eq!(market.last_action(), None);
    }

    #[tokio::test]
    async fn test_buy_errors() {
        let mut market = quick();
        let disconnected = market.buy(&SimulatedWallet::default(), "1").await;
        assert!(matches!(disconnected, Err(GameError::Wallet(WalletError::NotConnected))));

        let wallet = wallet("0x4444444444444444444444444444444444444444");
        let missing = market.buy(&wallet, "99").await;
        assert!(matches!(missing, Err(GameError::ListingNotFound(id)) if id == "99"));
        assert!(market.purchased().is_empty());
    }

    #[test]
    fn test_list_cancel_and_user_listings() {
        let wallet = wallet("0x1234aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa5678");
        let mut market = quick();

        market.list_for_sale(&wallet, 12, 1, DEMO_CONTRACT).unwrap();
        assert_eq!(market.last_action(), Some("Listing Token #12"));
        market.cancel_listing(&wallet, "1").unwrap();
        assert_eq!(market.last_action(), Some("Cancelling listing"));

        let mine = market.user_listings("0x1234AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA5678");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, "1");
        assert!(market.user_listings("0xdead").is_empty());
    }
}
