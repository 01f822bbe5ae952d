use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::chain::BlockTag;
use crate::profile::address::is_evm_address;
use crate::server::{ApiError, ApiResultExt, AppState};

const NFT_NOTICE: &str = "NFT fetching not fully implemented - use direct contract calls for now";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/verify-transaction", post(verify_transaction))
        .route("/events/:contract_address", get(contract_events))
        .route("/nfts/:wallet_address", get(wallet_nfts))
        .route("/network-stats", get(network_stats))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest {
    transaction_hash: Option<String>,
    /// Wei, either a JSON string or number.
    expected_value: Option<Value>,
    expected_to: Option<String>,
}

fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

async fn verify_transaction(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload?;
    let hash = request
        .transaction_hash
        .filter(|h| !h.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Transaction hash required"))?;
    let expected_value = request.expected_value.as_ref().and_then(value_as_string);
    let expected_to = request.expected_to.filter(|t| !t.is_empty());

    let verification = state
        .chain
        .verify_transaction(hash.trim(), expected_value.as_deref(), expected_to.as_deref())
        .await
        .or_fail("Failed to verify transaction")?;

    Ok(Json(json!({
        "success": true,
        "verified": verification.verified,
        "transaction": verification.transaction,
        "verificationDetails": verification.verification_details,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsQuery {
    from_block: Option<String>,
    to_block: Option<String>,
}

async fn contract_events(
    State(state): State<AppState>,
    Path(contract_address): Path<String>,
    query: Result<Query<EventsQuery>, QueryRejection>,
) -> Result<Json<Value>, ApiError> {
    const FAILURE: &str = "Failed to fetch contract events";
    let Query(query) = query?;
    if !is_evm_address(&contract_address) {
        return Err(ApiError::bad_request("Invalid contract address"));
    }
    let parse = |tag: Option<String>| match tag {
        Some(t) => BlockTag::parse(&t),
        None => Ok(BlockTag::Latest),
    };
    let from = parse(query.from_block).or_fail(FAILURE)?;
    let to = parse(query.to_block).or_fail(FAILURE)?;

    let events = state
        .chain
        .contract_events(&contract_address, from, to)
        .await
        .or_fail(FAILURE)?;
    Ok(Json(json!({ "success": true, "events": events })))
}

async fn wallet_nfts(Path(_wallet_address): Path<String>) -> Json<Value> {
    Json(json!({
        "success": true,
        "nfts": { "blocks": [], "outfits": [], "land": [] },
        "message": NFT_NOTICE,
    }))
}

async fn network_stats(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    const FAILURE: &str = "Failed to fetch network stats";
    let chain = &state.chain;
    let (chain_id, block_number, fees) =
        tokio::try_join!(chain.chain_id(), chain.block_number(), chain.fee_data())
            .or_fail(FAILURE)?;

    let wei = |v: Option<u128>| v.map(|v| v.to_string());
    Ok(Json(json!({
        "success": true,
        "stats": {
            "chainId": chain_id.to_string(),
            "blockNumber": block_number,
            "gasPrice": {
                "gasPrice": wei(fees.gas_price),
                "maxFeePerGas": wei(fees.max_fee_per_gas),
                "maxPriorityFeePerGas": wei(fees.max_priority_fee_per_gas),
            }
        }
    })))
}
