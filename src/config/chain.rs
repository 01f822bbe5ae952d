use serde::{Deserialize, Serialize};

pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;
pub const BASE_SEPOLIA_RPC: &str = "https://sepolia.base.org";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractAddresses {
    pub outfits: Option<String>,
    pub land: Option<String>,
    pub resources: Option<String>,
    pub marketplace: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChainConfig {
    pub chain_id: u64,
    pub chain_name: String,
    pub rpc_url: String,
    pub explorer_url: String,
    pub request_timeout_secs: u64,
    pub contracts: ContractAddresses,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: BASE_SEPOLIA_CHAIN_ID,
            chain_name: "Base Sepolia".to_string(),
            rpc_url: BASE_SEPOLIA_RPC.to_string(),
            explorer_url: "https://sepolia.basescan.org".to_string(),
            request_timeout_secs: 15,
            contracts: ContractAddresses::default(),
        }
    }
}
