use serde::Serialize;

use crate::chain::{ChainError, RpcClient};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifiedTransaction {
    pub hash: String,
    pub from: String,
    pub to: Option<String>,
    /// Wei, as a decimal string.
    pub value: String,
    pub gas_used: String,
    pub block_number: u64,
    pub confirmations: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_match: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_match: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    pub verified: bool,
    pub transaction: VerifiedTransaction,
    pub verification_details: VerificationDetails,
}

impl RpcClient {
    /// Checks that `hash` was mined successfully and optionally that it paid
    /// `expected_value` wei to `expected_to`.
    pub async fn verify_transaction(
        &self,
        hash: &str,
        expected_value: Option<&str>,
        expected_to: Option<&str>,
    ) -> Result<Verification, ChainError> {
        let tx = self
            .transaction(hash)
            .await?
            .ok_or(ChainError::TransactionNotFound)?;
        let receipt = self.receipt(hash).await?.ok_or(ChainError::NotConfirmed)?;
        if !receipt.succeeded() {
            return Err(ChainError::TransactionFailed);
        }

        let value = tx.value.to_string();
        let mut details = VerificationDetails::default();
        if let Some(expected) = expected_value {
            details.value_match = Some(value == expected.trim());
        }
        if let Some(expected) = expected_to {
            details.to_match = Some(
                tx.to
                    .as_deref()
                    .is_some_and(|to| to.eq_ignore_ascii_case(expected)),
            );
        }
        let verified = details.value_match != Some(false) && details.to_match != Some(false);

        let head = self.block_number().await?;
        let confirmations = head.saturating_add(1).saturating_sub(receipt.block_number);

        Ok(Verification {
            verified,
            transaction: VerifiedTransaction {
                hash: tx.hash,
                from: tx.from,
                to: tx.to,
                value,
                gas_used: receipt.gas_used.to_string(),
                block_number: receipt.block_number,
                confirmations,
            },
            verification_details: details,
        })
    }
}
