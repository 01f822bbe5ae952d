use serde::Serialize;

use crate::config::chain::BASE_SEPOLIA_CHAIN_ID;
use crate::utils::units::format_ether;
use crate::wallet::WalletError;

/// What the connected wallet currently reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSession {
    pub address: Option<String>,
    pub chain_id: u64,
    /// Native balance in wei.
    pub balance: u128,
}

impl WalletSession {
    pub fn connected(address: impl Into<String>, chain_id: u64, balance: u128) -> Self {
        Self {
            address: Some(address.into()),
            chain_id,
            balance,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn is_on_base_sepolia(&self) -> bool {
        self.chain_id == BASE_SEPOLIA_CHAIN_ID
    }

    pub fn require_address(&self) -> Result<&str, WalletError> {
        self.address.as_deref().ok_or(WalletError::NotConnected)
    }

    pub fn require_chain(&self, expected: u64) -> Result<(), WalletError> {
        if self.chain_id == expected {
            Ok(())
        } else {
            Err(WalletError::WrongChain {
                expected,
                actual: self.chain_id,
            })
        }
    }

    pub fn short_address(&self) -> String {
        self.address.as_deref().map(short_address).unwrap_or_default()
    }

    pub fn balance_display(&self) -> String {
        format!("{} ETH", format_ether(self.balance))
    }
}

/// `0x1234...abcd` form used in headers and listings.
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}
