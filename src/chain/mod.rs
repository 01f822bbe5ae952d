//! Read side of the chain: a JSON-RPC client for an EVM node and
//! transaction verification on top of it.

pub mod rpc;
pub mod types;
pub mod verify;

pub use rpc::RpcClient;
pub use types::{Block, BlockTag, FeeData, Log, LogFilter, Receipt, Transaction};
pub use verify::{Verification, VerificationDetails, VerifiedTransaction};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Unexpected RPC response for {method}: {reason}")]
    InvalidResponse { method: String, reason: String },

    #[error("Invalid block parameter: {0}")]
    InvalidBlock(String),

    #[error("Transaction not found")]
    TransactionNotFound,

    #[error("Transaction not yet confirmed")]
    NotConfirmed,

    #[error("Transaction failed")]
    TransactionFailed,
}
