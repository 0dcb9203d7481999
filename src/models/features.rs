use serde::{Deserialize, Serialize};

/// Sentinel for `days_since_last_tx` when no usable timestamp exists.
pub const NO_ACTIVITY_DAYS: f64 = 999.0;

/// Fixed-shape feature vector derived from one wallet's transaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub wallet_id: String,
    pub total_transactions: u64,
    /// Transactions sent to a known protocol contract.
    pub compound_transactions: u64,
    pub failed_tx_ratio: f64,
    pub avg_gas_used: f64,
    pub total_value_eth: f64,
    pub account_age_days: f64,
    pub days_since_last_tx: f64,
    pub unique_contracts: u64,
    /// Transactions moving strictly more than one ether.
    pub high_value_txs: u64,
}

impl FeatureRecord {
    /// The record for a wallet with no transactions at all.
    pub fn inactive(wallet_id: impl Into<String>) -> Self {
        Self {
            wallet_id: wallet_id.into(),
            total_transactions: 0,
            compound_transactions: 0,
            failed_tx_ratio: 0.0,
            avg_gas_used: 0.0,
            total_value_eth: 0.0,
            account_age_days: 0.0,
            days_since_last_tx: NO_ACTIVITY_DAYS,
            unique_contracts: 0,
            high_value_txs: 0,
        }
    }
}
