//! Wallet session state and the seam through which contract writes are signed.

pub mod connector;
pub mod contracts;
pub mod session;

pub use connector::{AbiValue, ContractCall, SimulatedWallet, TxHash, WalletConnector};
pub use contracts::Contract;
pub use session::{short_address, WalletSession};

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("Please connect your wallet first")]
    NotConnected,

    #[error("Wrong network: wallet is on chain {actual}, expected {expected}")]
    WrongChain { expected: u64, actual: u64 },

    #[error("User rejected the request")]
    Rejected,

    #[error("insufficient funds for gas * price + value")]
    InsufficientFunds,

    #[error("No address configured for the {0} contract")]
    MissingContract(Contract),
}

/// Turns raw wallet/provider error text into the line shown to the player.
pub fn user_message(error: &str) -> &'static str {
    if error.contains("User rejected") || error.contains("User denied") {
        "You cancelled the transaction"
    } else if error.contains("insufficient funds") {
        "Insufficient funds"
    } else {
        "Please try again"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            user_message("MetaMask Tx Signature: User denied transaction signature."),
            "You cancelled the transaction"
        );
        assert_eq!(
            user_message(&WalletError::Rejected.to_string()),
            "You cancelled the transaction"
        );
        assert_eq!(
            user_message(&WalletError::InsufficientFunds.to_string()),
            "Insufficient funds"
        );
        assert_eq!(user_message("nonce too low"), "Please try again");
    }
}
