use log::debug;
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::future::Future;

use crate::wallet::{WalletError, WalletSession};

pub type TxHash = String;

/// Argument of a contract function call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AbiValue {
    Address(String),
    Uint(u128),
    Str(String),
}

impl From<u128> for AbiValue {
    fn from(v: u128) -> Self {
        Self::Uint(v)
    }
}

impl From<u32> for AbiValue {
    fn from(v: u32) -> Self {
        Self::Uint(v.into())
    }
}

impl From<&str> for AbiValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

/// A contract write the wallet is asked to sign and send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractCall {
    pub contract: String,
    pub function: &'static str,
    pub args: Vec<AbiValue>,
    /// Attached native value in wei.
    pub value: u128,
}

impl ContractCall {
    pub fn new(contract: impl Into<String>, function: &'static str) -> Self {
        Self {
            contract: contract.into(),
            function,
            args: Vec::new(),
            value: 0,
        }
    }

    pub fn arg(mut self, value: impl Into<AbiValue>) -> Self {
        self.args.push(value.into());
        self
    }

    pub fn address_arg(mut self, address: impl Into<String>) -> Self {
        self.args.push(AbiValue::Address(address.into()));
        self
    }

    pub fn value(mut self, wei: u128) -> Self {
        self.value = wei;
        self
    }
}

pub trait WalletConnector: Send + Sync {
    fn session(&self) -> WalletSession;

    fn write_contract(
        &self,
        call: ContractCall,
    ) -> impl Future<Output = Result<TxHash, WalletError>> + Send;
}

/// In-process wallet that signs nothing. Calls are recorded and answered
/// with hashes derived from the sender, the call and a nonce.
#[derive(Debug, Default)]
pub struct SimulatedWallet {
    session: RwLock<WalletSession>,
    calls: Mutex<Vec<ContractCall>>,
    reject_next: Mutex<bool>,
}

impl SimulatedWallet {
    pub fn new(session: WalletSession) -> Self {
        Self {
            session: RwLock::new(session),
            ..Default::default()
        }
    }

    pub fn connect(&self, address: impl Into<String>, chain_id: u64, balance: u128) {
        *self.session.write() = WalletSession::connected(address, chain_id, balance);
    }

    pub fn disconnect(&self) {
        let mut session = self.session.write();
        session.address = None;
        session.balance = 0;
    }

    pub fn switch_chain(&self, chain_id: u64) {
        self.session.write().chain_id = chain_id;
    }

    /// The next write is refused as if the user pressed reject.
    pub fn reject_next(&self) {
        *self.reject_next.lock() = true;
    }

    pub fn calls(&self) -> Vec<ContractCall> {
        self.calls.lock().clone()
    }

    fn sign(&self, call: ContractCall) -> Result<TxHash, WalletError> {
        let mut session = self.session.write();
        let from = session.require_address()?.to_string();

        if std::mem::take(&mut *self.reject_next.lock()) {
            return Err(WalletError::Rejected);
        }
        if call.value > session.balance {
            return Err(WalletError::InsufficientFunds);
        }
        session.balance -= call.value;

        let mut calls = self.calls.lock();
        let mut hasher = Sha256::new();
        hasher.update(from.as_bytes());
        hasher.update(call.contract.as_bytes());
        hasher.update(call.function.as_bytes());
        hasher.update(calls.len().to_le_bytes());
        let hash = format!("0x{:x}", hasher.finalize());

        debug!("Simulated {}.{} from {} -> {}", call.contract, call.function, from, hash);
        calls.push(call);
        Ok(hash)
    }
}

impl WalletConnector for SimulatedWallet {
    fn session(&self) -> WalletSession {
        self.session.read().clone()
    }

    async fn write_contract(&self, call: ContractCall) -> Result<TxHash, WalletError> {
        self.sign(call)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::units::WEI_PER_ETHER;

    const ALICE: &str = "0x1111111111111111111111111111111111111111";

    #[tokio::test]
    async fn test_requires_connection() {
        let wallet = SimulatedWallet::default();
        let result = wallet.write_contract(ContractCall::new("0xc", "mint")).await;
        assert_eq!(result, Err(WalletError::NotConnected));
        assert!(wallet.calls().is_empty());
    }

    #[tokio::test]
    async fn test_hashes_are_deterministic_and_unique() {
        let a = SimulatedWallet::default();
        let b = SimulatedWallet::default();
        a.connect(ALICE, 84532, WEI_PER_ETHER);
        b.connect(ALICE, 84532, WEI_PER_ETHER);

        let call = ContractCall::new("0xc", "mintLand").arg(7u32);
        let first = a.write_contract(call.clone()).await.unwrap();
        let second = a.write_contract(call.clone()).await.unwrap();
        assert_eq!(first, b.write_contract(call).await.unwrap());
        assert_ne!(first, second);
        assert_eq!(first.len(), 66);
        assert_eq!(a.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_reject_and_funds() {
        let wallet = SimulatedWallet::default();
        wallet.connect(ALICE, 84532, 10);

        wallet.reject_next();
        let rejected = wallet.write_contract(ContractCall::new("0xc", "mint")).await;
        assert_eq!(rejected, Err(WalletError::Rejected));

        let broke = wallet
            .write_contract(ContractCall::new("0xc", "mint").value(11))
            .await;
        assert_eq!(broke, Err(WalletError::InsufficientFunds));

        wallet
            .write_contract(ContractCall::new("0xc", "mint").value(4))
            .await
            .unwrap();
        assert_eq!(wallet.session().balance, 6);
    }

    #[test]
    fn test_switch_chain_keeps_account() {
        let wallet = SimulatedWallet::default();
        wallet.connect(ALICE, 1, 5);
        assert!(!wallet.session().is_on_base_sepolia());

        wallet.switch_chain(84532);
        let session = wallet.session();
        assert!(session.is_on_base_sepolia());
        assert_eq!(session.address.as_deref(), Some(ALICE));
        assert_eq!(session.balance, 5);
    }
}
