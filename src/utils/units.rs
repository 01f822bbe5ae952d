//! Ether denominations and JSON-RPC hex quantities.

use thiserror::Error;

pub const ETHER_DECIMALS: usize = 18;
pub const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;
pub const WEI_PER_GWEI: u128 = 1_000_000_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnitError {
    #[error("Invalid ether amount: {0:?}")]
    InvalidAmount(String),

    #[error("Too many decimal places in {0:?} (max 18)")]
    TooPrecise(String),

    #[error("Amount out of range: {0:?}")]
    Overflow(String),

    #[error("Invalid hex quantity: {0:?}")]
    InvalidQuantity(String),
}

/// Parses a decimal ether string ("0.0001") into wei.
pub fn parse_ether(amount: &str) -> Result<u128, UnitError> {
    let trimmed = amount.trim();
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((w, f)) => (w, f),
        None => (trimmed, ""),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return Err(UnitError::InvalidAmount(amount.to_string()));
    }
    if fraction.len() > ETHER_DECIMALS {
        return Err(UnitError::TooPrecise(amount.to_string()));
    }

    let whole_wei = if whole.is_empty() {
        0
    } else {
        whole
            .parse::<u128>()
            .ok()
            .and_then(|w| w.checked_mul(WEI_PER_ETHER))
            .ok_or_else(|| UnitError::Overflow(amount.to_string()))?
    };

    let fraction_wei = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = ETHER_DECIMALS);
        padded
            .parse::<u128>()
            .map_err(|_| UnitError::InvalidAmount(amount.to_string()))?
    };

    whole_wei
        .checked_add(fraction_wei)
        .ok_or_else(|| UnitError::Overflow(amount.to_string()))
}

/// Formats wei as a decimal ether string, keeping at least one fractional digit.
pub fn format_ether(wei: u128) -> String {
    let whole = wei / WEI_PER_ETHER;
    let fraction = wei % WEI_PER_ETHER;
    if fraction == 0 {
        return format!("{whole}.0");
    }
    let digits = format!("{:0width$}", fraction, width = ETHER_DECIMALS);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}

/// Parses a `0x`-prefixed JSON-RPC quantity.
pub fn parse_quantity(value: &str) -> Result<u128, UnitError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .ok_or_else(|| UnitError::InvalidQuantity(value.to_string()))?;
    if digits.is_empty() {
        return Err(UnitError::InvalidQuantity(value.to_string()));
    }
    u128::from_str_radix(digits, 16).map_err(|_| UnitError::InvalidQuantity(value.to_string()))
}

pub fn to_quantity(value: u64) -> String {
    format!("{value:#x}")
}
