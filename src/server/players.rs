use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::profile::{
    normalize_address, LeaderboardKind, PlayerUpdate, ProfileError, StatsUpdate,
};
use crate::server::{ApiError, ApiResultExt, AppState};

const MAX_LEADERBOARD: usize = 100;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/leaderboard/:kind", get(leaderboard))
        .route("/:address", get(get_player).put(update_player))
        .route("/:address/xp", post(add_xp))
        .route("/:address/stats", post(update_stats))
}

async fn get_player(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Value>, ApiError> {
    const FAILURE: &str = "Failed to fetch player data";
    let address = normalize_address(&address).or_fail(FAILURE)?;
    let player = state
        .with_store(FAILURE, move |store| store.fetch_or_create(&address, Utc::now()))
        .await?;
    Ok(Json(json!({ "success": true, "player": player.view() })))
}

async fn update_player(
    State(state): State<AppState>,
    Path(address): Path<String>,
    payload: Result<Json<PlayerUpdate>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const FAILURE: &str = "Failed to update player data";
    let Json(update) = payload?;
    let address = normalize_address(&address).or_fail(FAILURE)?;
    let now = Utc::now();

    let player = state
        .with_store(FAILURE, move |store| {
            store.update(&address, &mut |player| {
                player.apply_update(update.clone())?;
                player.last_login = now;
                Ok(())
            })
        })
        .await?;
    Ok(Json(json!({ "success": true, "player": player })))
}

#[derive(Debug, Deserialize)]
struct XpRequest {
    amount: Option<i64>,
    reason: Option<String>,
}

async fn add_xp(
    State(state): State<AppState>,
    Path(address): Path<String>,
    payload: Result<Json<XpRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const FAILURE: &str = "Failed to add XP";
    let Json(request) = payload?;
    let address = normalize_address(&address).or_fail(FAILURE)?;

    let amount = request.amount;
    let (player, gain) = state
        .with_store(FAILURE, move |store| {
            let mut gain = None;
            let player = store.update(&address, &mut |player| {
                let amount = amount
                    .and_then(|a| u64::try_from(a).ok())
                    .ok_or(ProfileError::InvalidXp)?;
                gain = Some((amount, player.add_xp(amount)));
                Ok(())
            })?;
            Ok((player, gain))
        })
        .await?;

    let (added, gain) = gain.ok_or_else(|| ApiError::internal(FAILURE, "update did not run"))?;
    Ok(Json(json!({
        "success": true,
        "xpAdded": added,
        "totalXP": player.xp,
        "leveledUp": gain.leveled_up,
        "newLevel": gain.new_level,
        "reason": request.reason,
    })))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatsRequest {
    #[serde(default)]
    stats_update: StatsUpdate,
}

async fn update_stats(
    State(state): State<AppState>,
    Path(address): Path<String>,
    payload: Result<Json<StatsRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    const FAILURE: &str = "Failed to update stats";
    let Json(request) = payload?;
    let address = normalize_address(&address).or_fail(FAILURE)?;

    let player = state
        .with_store(FAILURE, move |store| {
            store.update(&address, &mut |player| {
                player.apply_stats(&request.stats_update);
                Ok(())
            })
        })
        .await?;
    Ok(Json(json!({ "success": true, "gameStats": player.game_stats })))
}

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    limit: Option<String>,
}

async fn leaderboard(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    query: Result<Query<LeaderboardQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    let Query(query) = query?;
    let limit = query
        .limit
        .and_then(|l| l.trim().parse::<usize>().ok())
        .filter(|&l| l > 0)
        .unwrap_or(state.settings.leaderboard_limit)
        .min(MAX_LEADERBOARD);

    let kind = LeaderboardKind::from_param(&kind);
    let entries = state
        .with_store("Failed to fetch leaderboard", move |store| {
            Ok(store.leaderboard(kind, limit)?)
        })
        .await?;
    Ok(Json(json!({ "success": true, "leaderboard": entries })))
}
