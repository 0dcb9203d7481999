use ethers::types::Address;
use std::str::FromStr;

use crate::models::{Result, RiskScoreError};

/// Check that `address` is a 20-byte hex EVM address with a `0x` prefix.
pub fn validate_address(address: &str) -> Result<()> {
    let address = address.trim();
    if !address.starts_with("0x") || address.len() != 42 {
        return Err(RiskScoreError::InvalidAddress(format!(
            "Invalid EVM address format: {}",
            address
        )));
    }

    Address::from_str(address)
        .map(|_| ())
        .map_err(|_| RiskScoreError::InvalidAddress(format!("Invalid hex in address: {}", address)))
}

pub fn normalize_address(address: &str) -> String {
    address.trim().to_lowercase()
}
