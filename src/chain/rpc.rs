use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::chain::types::{Block, BlockTag, FeeData, Log, LogFilter, Receipt, Transaction};
use crate::chain::ChainError;
use crate::config::ChainConfig;
use crate::utils::units::{parse_quantity, WEI_PER_GWEI};

/// Priority fee assumed when the node doesn't support `eth_maxPriorityFeePerGas`.
pub const DEFAULT_PRIORITY_FEE: u128 = WEI_PER_GWEI;

/// Blocks scanned back from the head when an event query starts at `latest`.
pub const RECENT_EVENT_BLOCKS: u64 = 10;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 client for an EVM node.
#[derive(Debug)]
pub struct RpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ChainError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn from_config(config: &ChainConfig) -> Result<Self, ChainError> {
        Self::new(
            config.rpc_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ChainError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params });
        debug!("RPC {} #{}", method, id);

        let response: RpcResponse = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = response.error {
            return Err(ChainError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        serde_json::from_value(response.result).map_err(|e| ChainError::InvalidResponse {
            method: method.to_string(),
            reason: e.to_string(),
        })
    }

    async fn call_quantity(&self, method: &str, params: Value) -> Result<u128, ChainError> {
        let raw: String = self.call(method, params).await?;
        parse_quantity(&raw).map_err(|e| ChainError::InvalidResponse {
            method: method.to_string(),
            reason: e.to_string(),
        })
    }

    pub async fn block_number(&self) -> Result<u64, ChainError> {
        let number = self.call_quantity("eth_blockNumber", json!([])).await?;
        u64::try_from(number).map_err(|e| ChainError::InvalidResponse {
            method: "eth_blockNumber".into(),
            reason: e.to_string(),
        })
    }

    pub async fn chain_id(&self) -> Result<u64, ChainError> {
        let id = self.call_quantity("eth_chainId", json!([])).await?;
        u64::try_from(id).map_err(|e| ChainError::InvalidResponse {
            method: "eth_chainId".into(),
            reason: e.to_string(),
        })
    }

    pub async fn gas_price(&self) -> Result<u128, ChainError> {
        self.call_quantity("eth_gasPrice", json!([])).await
    }

    pub async fn max_priority_fee(&self) -> Result<u128, ChainError> {
        match self.call_quantity("eth_maxPriorityFeePerGas", json!([])).await {
            Ok(fee) => Ok(fee),
            Err(ChainError::Rpc { code, message }) => {
                debug!("eth_maxPriorityFeePerGas unavailable ({code}: {message}), using 1 gwei");
                Ok(DEFAULT_PRIORITY_FEE)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn latest_block(&self) -> Result<Block, ChainError> {
        let block: Option<Block> = self
            .call("eth_getBlockByNumber", json!(["latest", false]))
            .await?;
        block.ok_or_else(|| ChainError::InvalidResponse {
            method: "eth_getBlockByNumber".into(),
            reason: "node returned no latest block".into(),
        })
    }

    /// Legacy gas price plus EIP-1559 figures when the head block carries a base fee.
    pub async fn fee_data(&self) -> Result<FeeData, ChainError> {
        let (gas_price, block) = tokio::try_join!(self.gas_price(), self.latest_block())?;

        let mut fees = FeeData {
            gas_price: Some(gas_price),
            ..Default::default()
        };
        if let Some(base_fee) = block.base_fee_per_gas {
            let priority = self.max_priority_fee().await?;
            fees.max_priority_fee_per_gas = Some(priority);
            fees.max_fee_per_gas = Some(base_fee.saturating_mul(2).saturating_add(priority));
        }
        Ok(fees)
    }

    pub async fn transaction(&self, hash: &str) -> Result<Option<Transaction>, ChainError> {
        self.call("eth_getTransactionByHash", json!([hash])).await
    }

    pub async fn receipt(&self, hash: &str) -> Result<Option<Receipt>, ChainError> {
        self.call("eth_getTransactionReceipt", json!([hash])).await
    }

    pub async fn logs(&self, filter: &LogFilter) -> Result<Vec<Log>, ChainError> {
        self.call("eth_getLogs", json!([filter])).await
    }

    /// Logs emitted by `address`. A `latest` start means the last few blocks.
    pub async fn contract_events(
        &self,
        address: &str,
        from: BlockTag,
        to: BlockTag,
    ) -> Result<Vec<Log>, ChainError> {
        let from_block = match from {
            BlockTag::Latest => {
                let head = self.block_number().await?;
                BlockTag::Number(head.saturating_sub(RECENT_EVENT_BLOCKS))
            }
            number => number,
        };
        let filter = LogFilter {
            address: address.to_string(),
            from_block,
            to_block: to,
        };
        let logs = self.logs(&filter).await?;
        if logs.is_empty() {
            debug!("No events for {} in {:?}..{:?}", address, from_block, to);
        }
        Ok(logs)
    }
}
