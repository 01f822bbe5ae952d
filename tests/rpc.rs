mod common;

use serde_json::json;

use blockcraft::chain::BlockTag;
use blockcraft::ChainError;
use common::FakeNode;

const CONTRACT: &str = "0x9a3a4D73d33be7Ca333974377f473f3951fe8EbF";

#[tokio::test]
async fn test_basic_quantities() {
    let node = FakeNode::start().await;
    node.respond("eth_blockNumber", json!("0x1b4"));
    node.respond("eth_chainId", json!("0x14a34"));
    node.respond("eth_gasPrice", json!("0x3b9aca00"));

    let client = node.client();
    assert_eq!(client.block_number().await.unwrap(), 436);
    assert_eq!(client.chain_id().await.unwrap(), 84532);
    assert_eq!(client.gas_price().await.unwrap(), 1_000_000_000);
}

#[tokio::test]
async fn test_rpc_errors_surface() {
    let node = FakeNode::start().await;
    node.fail("eth_blockNumber", -32000, "header not found");

    let err = node.client().block_number().await.unwrap_err();
    match err {
        ChainError::Rpc { code, message } => {
            assert_eq!(code, -32000);
            assert_eq!(message, "header not found");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_fee_data_with_base_fee() {
    let node = FakeNode::start().await;
    node.respond("eth_gasPrice", json!("0x77359400"));
    node.respond("eth_getBlockByNumber", json!({ "number": "0x10", "baseFeePerGas": "0x3b9aca00" }));
    node.respond("eth_maxPriorityFeePerGas", json!("0x77359400"));

    let fees = node.client().fee_data().await.unwrap();
    assert_eq!(fees.gas_price, Some(2_000_000_000));
    assert_eq!(fees.max_priority_fee_per_gas, Some(2_000_000_000));
    assert_eq!(fees.max_fee_per_gas, Some(4_000_000_000));
}

#[tokio::test]
async fn test_priority_fee_falls_back_to_one_gwei() {
    let node = FakeNode::start().await;
    node.respond("eth_gasPrice", json!("0x1"));
    node.respond("eth_getBlockByNumber", json!({ "number": "0x10", "baseFeePerGas": "0x64" }));

    let fees = node.client().fee_data().await.unwrap();
    assert_eq!(fees.max_priority_fee_per_gas, Some(1_000_000_000));
    assert_eq!(fees.max_fee_per_gas, Some(1_000_000_200));
}

#[tokio::test]
async fn test_legacy_chain_has_no_eip1559_fees() {
    let node = FakeNode::start().await;
    node.respond("eth_gasPrice", json!("0x1"));
    node.respond("eth_getBlockByNumber", json!({ "number": "0x10" }));

    let fees = node.client().fee_data().await.unwrap();
    assert_eq!(fees.gas_price, Some(1));
    assert_eq!(fees.max_fee_per_gas, None);
    assert!(node.params_for("eth_maxPriorityFeePerGas").is_empty());
}

#[tokio::test]
async fn test_verify_transaction_matches() {
    let node = FakeNode::start().await;
    node.stage_transfer(CONTRACT);

    let client = node.client();
    let verification = client
        .verify_transaction("0xfeed", Some("1000"), Some(&CONTRACT.to_lowercase()))
        .await
        .unwrap();
    assert!(verification.verified);
    assert_eq!(verification.transaction.value, "1000");
    assert_eq!(verification.transaction.gas_used, "21000");
    assert_eq!(verification.transaction.block_number, 100);
    assert_eq!(verification.transaction.confirmations, 11);
    assert_eq!(verification.verification_details.value_match, Some(true));
    assert_eq!(verification.verification_details.to_match, Some(true));
}

#[tokio::test]
async fn test_verify_transaction_mismatch() {
    let node = FakeNode::start().await;
    node.stage_transfer(CONTRACT);

    let verification = node
        .client()
        .verify_transaction("0xfeed", Some("999"), None)
        .await
        .unwrap();
    assert!(!verification.verified);
    assert_eq!(verification.verification_details.value_match, Some(false));
    assert_eq!(verification.verification_details.to_match, None);
}

#[tokio::test]
async fn test_verify_transaction_states() {
    let node = FakeNode::start().await;
    node.respond("eth_getTransactionByHash", json!(null));
    let client = node.client();
    assert!(matches!(
        client.verify_transaction("0x01", None, None).await,
        Err(ChainError::TransactionNotFound)
    ));

    node.stage_transfer(CONTRACT);
    node.respond("eth_getTransactionReceipt", json!(null));
    assert!(matches!(
        client.verify_transaction("0xfeed", None, None).await,
        Err(ChainError::NotConfirmed)
    ));

    node.respond(
        "eth_getTransactionReceipt",
        json!({ "transactionHash": "0xfeed", "status": "0x0", "gasUsed": "0x1", "blockNumber": "0x64" }),
    );
    assert!(matches!(
        client.verify_transaction("0xfeed", None, None).await,
        Err(ChainError::TransactionFailed)
    ));
}

#[tokio::test]
async fn test_latest_events_scan_recent_blocks() {
    let node = FakeNode::start().await;
    node.respond("eth_blockNumber", json!("0x64"));
    node.respond(
        "eth_getLogs",
        json!([{
            "address": CONTRACT,
            "blockNumber": "0x60",
            "transactionHash": "0xabc",
            "topics": ["0xddf252ad"],
            "data": "0x"
        }]),
    );

    let logs = node
        .client()
        .contract_events(CONTRACT, BlockTag::Latest, BlockTag::Latest)
        .await
        .unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].block_number, 96);

    let params = node.params_for("eth_getLogs");
    assert_eq!(
        params[0],
        json!([{ "address": CONTRACT, "fromBlock": "0x5a", "toBlock": "latest" }])
    );
}

#[tokio::test]
async fn test_explicit_event_range() {
    let node = FakeNode::start().await;
    node.respond("eth_getLogs", json!([]));

    node.client()
        .contract_events(CONTRACT, BlockTag::Number(5), BlockTag::Number(20))
        .await
        .unwrap();
    assert_eq!(
        node.params_for("eth_getLogs")[0][0]["fromBlock"],
        json!("0x5")
    );
    assert!(node.params_for("eth_blockNumber").is_empty());
}
