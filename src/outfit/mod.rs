//! Avatar outfits: the static catalogue, ownership views and the on-disk
//! cache of what a wallet owns.

pub mod cache;
pub mod catalogue;

pub use cache::OwnedOutfitCache;
pub use catalogue::{
    mint_call, outfit_by_id, MarketplaceOutfit, Outfit, OutfitColors, OutfitParts, OutfitView,
    OUTFITS, STARTER_OUTFIT,
};
