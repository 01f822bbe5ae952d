use crate::profile::ProfileError;

/// Lowercases a wallet address for use as a document key.
///
/// Only ASCII alphanumerics are accepted, which keeps keys safe to use as
/// file names.
pub fn normalize_address(address: &str) -> Result<String, ProfileError> {
    let trimmed = address.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(ProfileError::InvalidAddress(address.to_string()));
    }
    Ok(trimmed.to_ascii_lowercase())
}

/// `0x` followed by 40 hex digits.
pub fn is_evm_address(address: &str) -> bool {
    address
        .strip_prefix("0x")
        .is_some_and(|hex| hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}
