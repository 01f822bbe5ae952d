use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::chain::ChainError;
use crate::utils::units::{parse_quantity, to_quantity};

fn quantity<'de, D: Deserializer<'de>>(de: D) -> Result<u128, D::Error> {
    let raw = String::deserialize(de)?;
    parse_quantity(&raw).map_err(serde::de::Error::custom)
}

fn quantity_u64<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    let value = quantity(de)?;
    u64::try_from(value).map_err(serde::de::Error::custom)
}

fn opt_quantity<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u128>, D::Error> {
    match Option::<String>::deserialize(de)? {
        Some(raw) => parse_quantity(&raw).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

fn opt_quantity_u64<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
    opt_quantity(de)?
        .map(u64::try_from)
        .transpose()
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub from: String,
    pub to: Option<String>,
    #[serde(deserialize_with = "quantity")]
    pub value: u128,
    /// `None` while pending.
    #[serde(default, deserialize_with = "opt_quantity_u64")]
    pub block_number: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub transaction_hash: String,
    /// 1 on success, 0 on revert. Missing on pre-Byzantium receipts.
    #[serde(default, deserialize_with = "opt_quantity_u64")]
    pub status: Option<u64>,
    #[serde(deserialize_with = "quantity")]
    pub gas_used: u128,
    #[serde(deserialize_with = "quantity_u64")]
    pub block_number: u64,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status == Some(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: String,
    #[serde(deserialize_with = "quantity_u64")]
    pub block_number: u64,
    pub transaction_hash: String,
    pub topics: Vec<String>,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    #[serde(deserialize_with = "quantity_u64")]
    pub number: u64,
    #[serde(default, deserialize_with = "opt_quantity")]
    pub base_fee_per_gas: Option<u128>,
}

/// Fee figures as exposed by the network-stats endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeData {
    pub gas_price: Option<u128>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Latest,
    Number(u64),
}

impl BlockTag {
    /// Accepts `latest` or a decimal / `0x` block number.
    pub fn parse(value: &str) -> Result<Self, ChainError> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }
        let number = if value.starts_with("0x") {
            parse_quantity(value)
                .ok()
                .and_then(|n| u64::try_from(n).ok())
        } else {
            value.parse::<u64>().ok()
        };
        number
            .map(Self::Number)
            .ok_or_else(|| ChainError::InvalidBlock(value.to_string()))
    }
}

impl Serialize for BlockTag {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Latest => ser.serialize_str("latest"),
            Self::Number(n) => ser.serialize_str(&to_quantity(*n)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogFilter {
    pub address: String,
    pub from_block: BlockTag,
    pub to_block: BlockTag,
}
