use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::info;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::outfit::{outfit_by_id, MarketplaceOutfit, OutfitView};
use crate::profile::{normalize_address, ProfileError};
use crate::server::{ApiError, ApiResultExt, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/player/:address", get(player_outfits))
        .route("/player/:address/select", post(select_outfit))
        .route("/player/:address/purchase", post(purchase_outfit))
        .route("/marketplace", get(marketplace))
}

async fn player_outfits(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const FAILURE: &str = "Failed to fetch outfits";
    let address = normalize_address(&address).or_fail(FAILURE)?;
    let player = state
        .with_store(FAILURE, move |store| {
            store.get(&address)?.ok_or(ProfileError::NotFound)
        })
        .await?;

    Ok(Json(json!({
        "success": true,
        "outfits": OutfitView::catalogue(&player.owned_outfits, player.selected_outfit),
        "selectedOutfit": player.selected_outfit,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectRequest {
    outfit_id: u32,
}

async fn select_outfit(
    State(state): State<AppState>,
    Path(address): Path<String>,
    payload: Result<Json<SelectRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const FAILURE: &str = "Failed to select outfit";
    let Json(request) = payload?;
    let address = normalize_address(&address).or_fail(FAILURE)?;

    let id = request.outfit_id;
    state
        .with_store(FAILURE, move |store| {
            store.update(&address, &mut |player| player.select_outfit(id))
        })
        .await?;
    Ok(Json(json!({
        "success": true,
        "selectedOutfit": request.outfit_id,
        "message": "Outfit equipped successfully!",
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PurchaseRequest {
    outfit_id: u32,
    transaction_hash: Option<String>,
}

async fn purchase_outfit(
    State(state): State<AppState>,
    Path(address): Path<String>,
    payload: Result<Json<PurchaseRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const FAILURE: &str = "Failed to purchase outfit";
    let Json(request) = payload?;
    let address = normalize_address(&address).or_fail(FAILURE)?;
    let reward = state.settings.outfit_purchase_xp;
    let id = request.outfit_id;

    let buyer = address.clone();
    state
        .with_store(FAILURE, move |store| {
            store.update(&buyer, &mut |player| {
                if !outfit_by_id(id).is_some_and(|o| o.mintable) {
                    return Err(ProfileError::NotPurchasable(id));
                }
                if !player.unlock_outfit(id) {
                    return Err(ProfileError::AlreadyOwned(id));
                }
                player.add_xp(reward);
                Ok(())
            })
        })
        .await?;

    info!("{} purchased outfit {}", address, id);
    Ok(Json(json!({
        "success": true,
        "message": "Outfit purchased successfully!",
        "outfitId": id,
        "transactionHash": request.transaction_hash,
    })))
}

async fn marketplace() -> Json<Value> {
    Json(json!({ "success": true, "marketplace": MarketplaceOutfit::listings() }))
}
